//! Posts, likes and comments.

use tracing::{debug, instrument};

use chirp_core::optimistic;
use chirp_core::{Comment, Page, Post, PostContent, PostId, Result, UserId};

use crate::client::RestClient;
use crate::wire::{self, ContentRequest, RawComment, RawList, RawPost};

/// Typed operations on posts.
#[derive(Debug, Clone)]
pub struct PostsClient {
    client: RestClient,
}

impl PostsClient {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// One page of the viewer's home feed.
    #[instrument(skip(self))]
    pub async fn feed_page(&self, page: u32) -> Result<Page<Post>> {
        self.fetch_posts(&wire::feed_page(page)).await
    }

    /// One page of all posts, newest first.
    #[instrument(skip(self))]
    pub async fn posts_page(&self, page: u32) -> Result<Page<Post>> {
        self.fetch_posts(&wire::posts_page(page, None)).await
    }

    /// One page of posts written by `author`.
    #[instrument(skip(self))]
    pub async fn user_posts_page(&self, author: UserId, page: u32) -> Result<Page<Post>> {
        self.fetch_posts(&wire::posts_page(page, Some(author))).await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, id: PostId) -> Result<Post> {
        let raw: RawPost = self.client.get(&wire::post(id)).await?;
        raw.into_post()
    }

    #[instrument(skip(self, content))]
    pub async fn create_post(&self, content: &PostContent) -> Result<Post> {
        let body = ContentRequest {
            content: content.as_str(),
        };
        let raw: RawPost = self.client.post_json(wire::POSTS, &body).await?;
        let post = raw.into_post()?;
        debug!(post = %post.id, "Post created");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn like(&self, id: PostId) -> Result<()> {
        self.client.post_empty(&wire::post_like(id)).await
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, id: PostId) -> Result<()> {
        self.client.delete(&wire::post_like(id)).await
    }

    /// Like or unlike the local copy at once, then confirm with the backend.
    ///
    /// On failure `post` is restored to what it was before the call.
    pub async fn set_liked(&self, post: &mut Post, liked: bool) -> Result<()> {
        if post.is_liked == liked {
            return Ok(());
        }
        let id = post.id;
        optimistic::apply(post, |p| p.set_liked(liked), async move {
            if liked {
                self.like(id).await
            } else {
                self.unlike(id).await
            }
        })
        .await
    }

    pub async fn toggle_like(&self, post: &mut Post) -> Result<()> {
        let liked = !post.is_liked;
        self.set_liked(post, liked).await
    }

    /// Comments on a post, oldest first.
    #[instrument(skip(self))]
    pub async fn comments(&self, id: PostId) -> Result<Vec<Comment>> {
        let list: RawList<RawComment> = self.client.get(&wire::post_comments(id)).await?;
        Ok(list.into_page(|c| c.into_comment(id))?.items)
    }

    #[instrument(skip(self, content))]
    pub async fn add_comment(&self, id: PostId, content: &PostContent) -> Result<Comment> {
        let body = ContentRequest {
            content: content.as_str(),
        };
        let raw: RawComment = self.client.post_json(&wire::post_comments(id), &body).await?;
        raw.into_comment(id)
    }

    /// Comment on `post`, counting the comment on the local copy up front.
    pub async fn add_comment_to(&self, post: &mut Post, content: &PostContent) -> Result<Comment> {
        let id = post.id;
        optimistic::apply(post, Post::record_comment, self.add_comment(id, content)).await
    }

    async fn fetch_posts(&self, endpoint: &str) -> Result<Page<Post>> {
        let list: RawList<RawPost> = self.client.get(endpoint).await?;
        list.into_page(RawPost::into_post)
    }
}
