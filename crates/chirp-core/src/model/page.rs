//! Paginated list results.

use serde::{Deserialize, Serialize};

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page, in backend order.
    pub items: Vec<T>,

    /// Total number of items across all pages, when the backend reports it.
    pub count: Option<u64>,

    /// Continuation marker; `Some` if more pages exist.
    pub next: Option<String>,

    /// Reference to the previous page, if any.
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// A page with no continuation, used when an endpoint returns a bare list.
    pub fn complete(items: Vec<T>) -> Self {
        let count = Some(items.len() as u64);
        Self {
            items,
            count,
            next: None,
            previous: None,
        }
    }

    /// Returns true if the backend signalled another page.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}
