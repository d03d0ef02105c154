//! Core value types.
//!
//! These types enforce invariants at construction time, so an invalid base
//! address or a user id passed where a post id is expected cannot compile
//! or cannot exist.

mod api_url;
mod ids;

pub use api_url::ApiUrl;
pub use ids::{CommentId, PostId, UserId};
