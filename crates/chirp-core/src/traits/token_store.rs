//! Credential token persistence.

use std::sync::{PoisonError, RwLock};

use crate::{AuthToken, Result};

/// Durable storage for the single active credential token.
///
/// At most one token is held at a time; `save` replaces any previous one.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    fn load(&self) -> Result<Option<AuthToken>>;

    /// Store `token`, replacing any previous one.
    fn save(&self, token: &AuthToken) -> Result<()>;

    /// Remove the stored token. Succeeds if none is stored.
    fn clear(&self) -> Result<()>;
}

/// In-process token store, for tests and embedders without durable storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `token`.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_previous_token() {
        let store = MemoryTokenStore::with_token(AuthToken::new("old"));
        store.save(&AuthToken::new("new")).unwrap();
        assert_eq!(store.load().unwrap(), Some(AuthToken::new("new")));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
