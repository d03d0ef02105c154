//! Canonical domain types.
//!
//! Backend payload variants are normalized into these shapes at the REST
//! boundary; nothing above that boundary sees raw JSON.

mod comment;
mod page;
mod post;
mod session;
mod user;

pub use comment::Comment;
pub use page::Page;
pub use post::{MAX_CONTENT_CHARS, Post, PostContent};
pub use session::SessionState;
pub use user::{Author, User};
