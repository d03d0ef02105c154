//! Wiring of the transport, session and resource clients.

use std::sync::Arc;

use tracing::instrument;

use chirp_core::{FeedController, LoadOutcome, PageSource, Result, TokenStore, UserId};

use crate::client::RestClient;
use crate::config::ClientConfig;
use crate::feed::{HomeFeed, PostList};
use crate::posts::PostsClient;
use crate::session::SessionStore;
use crate::users::UsersClient;

/// Entry point bundling every client over one transport.
///
/// ```no_run
/// use std::sync::Arc;
/// use chirp_core::{ApiUrl, MemoryTokenStore};
/// use chirp_rest::{Chirp, ClientConfig};
///
/// # async fn example() -> chirp_core::Result<()> {
/// let config = ClientConfig::new(ApiUrl::new("https://chirp.example.com/api")?);
/// let chirp = Chirp::connect(config, Arc::new(MemoryTokenStore::new())).await?;
///
/// let feed = chirp.home_feed();
/// chirp.load_feed(&feed).await?;
/// for post in feed.posts() {
///     println!("{}: {}", post.author.username, post.content);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Chirp {
    client: RestClient,
    session: SessionStore,
    posts: PostsClient,
    users: UsersClient,
}

impl Chirp {
    /// Build the clients. The session stays `Resolving` until
    /// [`SessionStore::initialize`] runs.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = RestClient::new(config, tokens)?;
        Ok(Self {
            session: SessionStore::new(client.clone()),
            posts: PostsClient::new(client.clone()),
            users: UsersClient::new(client.clone()),
            client,
        })
    }

    /// Build the clients and resolve the session from the stored token.
    #[instrument(skip(config, tokens), fields(api = %config.api_url))]
    pub async fn connect(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let chirp = Self::new(config, tokens)?;
        chirp.session.initialize().await;
        Ok(chirp)
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn posts(&self) -> &PostsClient {
        &self.posts
    }

    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    pub fn home_feed(&self) -> FeedController<HomeFeed> {
        FeedController::new(HomeFeed::new(self.posts.clone()))
    }

    pub fn all_posts(&self) -> FeedController<PostList> {
        FeedController::new(PostList::all(self.posts.clone()))
    }

    pub fn author_feed(&self, author: UserId) -> FeedController<PostList> {
        FeedController::new(PostList::by_author(self.posts.clone(), author))
    }

    /// Load the first page of `feed` once the session has resolved.
    pub async fn load_feed<S: PageSource>(&self, feed: &FeedController<S>) -> Result<LoadOutcome> {
        let state = self.session.wait_resolved().await;
        feed.load_first_page(&state).await
    }
}
