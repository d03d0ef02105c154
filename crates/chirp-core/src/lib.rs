//! chirp-core - Core types and traits for the chirp micro-blogging client.
//!
//! This crate holds everything that does not touch the network: canonical
//! domain types, the error taxonomy, credential and token types, the
//! optimistic-update helper and the feed pagination controller. The REST
//! transport lives in `chirp-rest`.

pub mod credentials;
pub mod error;
pub mod feed;
pub mod model;
pub mod optimistic;
pub mod token;
pub mod traits;
pub mod types;

pub use credentials::{LoginCredentials, PasswordChange, RegisterCredentials};
pub use error::{
    ApiError, AuthError, Error, InvalidInputError, NetworkError, ServerError, StorageError,
    ValidationError,
};
pub use feed::{FeedController, FeedPhase, LoadOutcome, SkipReason};
pub use model::{Author, Comment, MAX_CONTENT_CHARS, Page, Post, PostContent, SessionState, User};
pub use token::AuthToken;
pub use traits::{MemoryTokenStore, PageSource, TokenStore};
pub use types::{ApiUrl, CommentId, PostId, UserId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
