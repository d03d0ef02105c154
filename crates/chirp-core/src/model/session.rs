//! Session state shared between the session store and its dependents.

use super::User;
use crate::types::UserId;

/// Authentication state of the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A stored token is being checked against the backend. User-scoped data
    /// must not be requested yet.
    #[default]
    Resolving,

    /// No valid token.
    Anonymous,

    /// Token accepted; the identity it belongs to.
    Authenticated(User),
}

impl SessionState {
    /// Returns true once resolution has finished, either way.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Resolving)
    }

    /// The authenticated identity, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Id of the viewing identity; `None` when anonymous or resolving.
    pub fn viewer_id(&self) -> Option<UserId> {
        self.user().map(|u| u.id)
    }
}
