//! Core traits at the seams between the library and its environment.

mod page_source;
mod token_store;

pub use page_source::PageSource;
pub use token_store::{MemoryTokenStore, TokenStore};
