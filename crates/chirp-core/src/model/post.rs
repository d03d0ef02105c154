//! Posts and post content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;
use crate::error::ValidationError;
use crate::types::PostId;

/// Maximum number of characters in a post or comment.
pub const MAX_CONTENT_CHARS: usize = 280;

/// A post, normalized from the backend payload.
///
/// Displayed lists hold their own copy so like and comment counts can change
/// locally before the backend confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub content: String,
    pub likes_count: u64,
    pub comments_count: u64,
    /// Whether the current viewer likes this post.
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Sets the viewer's like on the local copy, adjusting the like count.
    ///
    /// A no-op when the post is already in the requested state, so repeated
    /// unlikes never push the count below zero.
    pub fn set_liked(&mut self, liked: bool) {
        if self.is_liked == liked {
            return;
        }
        self.is_liked = liked;
        if liked {
            self.likes_count += 1;
        } else {
            self.likes_count = self.likes_count.saturating_sub(1);
        }
    }

    /// Counts one more comment on the local copy.
    pub fn record_comment(&mut self) {
        self.comments_count += 1;
    }
}

/// Validated text for a new post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Trims `text` and checks it is non-empty and within
    /// [`MAX_CONTENT_CHARS`] characters.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        let actual = text.chars().count();
        if actual > MAX_CONTENT_CHARS {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_CHARS,
                actual,
            });
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn post(is_liked: bool, likes: u64) -> Post {
        Post {
            id: PostId::new(1),
            author: Author {
                id: UserId::new(1),
                username: "alice".to_string(),
                avatar: None,
            },
            content: "hello".to_string(),
            likes_count: likes,
            comments_count: 0,
            is_liked,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn like_then_unlike_returns_to_original() {
        let mut p = post(false, 5);
        p.set_liked(true);
        assert!(p.is_liked);
        assert_eq!(p.likes_count, 6);
        p.set_liked(false);
        assert!(!p.is_liked);
        assert_eq!(p.likes_count, 5);
    }

    #[test]
    fn repeated_unlike_never_goes_below_zero() {
        let mut p = post(true, 0);
        p.set_liked(false);
        p.set_liked(false);
        p.set_liked(false);
        assert_eq!(p.likes_count, 0);
    }

    #[test]
    fn content_is_trimmed() {
        let content = PostContent::new("  hi there \n").unwrap();
        assert_eq!(content.as_str(), "hi there");
    }

    #[test]
    fn blank_content_rejected() {
        assert_eq!(
            PostContent::new("   "),
            Err(ValidationError::Empty { field: "content" })
        );
    }

    #[test]
    fn content_limit_counts_characters_not_bytes() {
        let at_limit = "é".repeat(MAX_CONTENT_CHARS);
        assert!(PostContent::new(&at_limit).is_ok());

        let over = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(
            PostContent::new(&over),
            Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_CHARS,
                actual: MAX_CONTENT_CHARS + 1,
            })
        );
    }
}
