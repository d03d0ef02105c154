//! Page sources backed by the posts endpoints.

use async_trait::async_trait;

use chirp_core::{Page, PageSource, Post, Result, UserId};

use crate::posts::PostsClient;

/// The viewer's home feed.
#[derive(Debug, Clone)]
pub struct HomeFeed {
    posts: PostsClient,
}

impl HomeFeed {
    pub fn new(posts: PostsClient) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PageSource for HomeFeed {
    async fn fetch_page(&self, page: u32) -> Result<Page<Post>> {
        self.posts.feed_page(page).await
    }
}

/// All posts, or the posts of one author.
#[derive(Debug, Clone)]
pub struct PostList {
    posts: PostsClient,
    author: Option<UserId>,
}

impl PostList {
    pub fn all(posts: PostsClient) -> Self {
        Self {
            posts,
            author: None,
        }
    }

    pub fn by_author(posts: PostsClient, author: UserId) -> Self {
        Self {
            posts,
            author: Some(author),
        }
    }
}

#[async_trait]
impl PageSource for PostList {
    async fn fetch_page(&self, page: u32) -> Result<Page<Post>> {
        match self.author {
            Some(author) => self.posts.user_posts_page(author, page).await,
            None => self.posts.posts_page(page).await,
        }
    }
}
