//! User profiles and author summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user profile as returned by the backend, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Only present on the viewer's own profile.
    pub email: Option<String>,
    /// Avatar image reference (URL).
    pub avatar: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    /// Whether the current viewer follows this user, when the backend says so.
    pub is_following: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Applies a follow-edge change from the viewer to this user to the local copy.
    ///
    /// A no-op when the edge is already in the requested state. The follower
    /// count never drops below zero.
    pub fn set_followed(&mut self, following: bool) {
        if self.is_following == Some(following) {
            return;
        }
        let was_following = self.is_following.unwrap_or(false);
        self.is_following = Some(following);
        match (was_following, following) {
            (false, true) => self.followers_count += 1,
            (true, false) => self.followers_count = self.followers_count.saturating_sub(1),
            _ => {}
        }
    }

    /// The author summary used on posts and comments written by this user.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Reference to the author of a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub avatar: Option<String>,
}
