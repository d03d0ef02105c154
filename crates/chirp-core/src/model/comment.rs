//! Comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;
use crate::types::{CommentId, PostId};

/// A comment on a post. Append-only from the client's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: Author,
    /// The post this comment belongs to.
    pub post: PostId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
