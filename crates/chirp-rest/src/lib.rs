//! chirp-rest - REST transport and clients for the chirp micro-blogging backend.
//!
//! [`RestClient`] sends requests and classifies failures, [`SessionStore`]
//! tracks who is signed in, and [`PostsClient`]/[`UsersClient`] expose the
//! resource endpoints. [`Chirp`] wires them together over one transport.

mod chirp;
mod client;
mod config;
mod feed;
mod posts;
mod session;
mod users;
pub mod wire;

pub use chirp::Chirp;
pub use client::{FALLBACK_ERROR_MESSAGE, RequestOptions, RestClient, extract_error_message};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use feed::{HomeFeed, PostList};
pub use posts::PostsClient;
pub use session::SessionStore;
pub use users::{AvatarUpload, ProfileUpdate, UsersClient};
