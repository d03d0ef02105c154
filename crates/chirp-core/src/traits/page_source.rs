//! Page source trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::model::{Page, Post};

/// A paginated list of posts the feed controller can pull from.
///
/// Pages are numbered from 1. Implementations perform exactly one request
/// per call and never retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the given page.
    async fn fetch_page(&self, page: u32) -> Result<Page<Post>>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    async fn fetch_page(&self, page: u32) -> Result<Page<Post>> {
        (**self).fetch_page(page).await
    }
}
