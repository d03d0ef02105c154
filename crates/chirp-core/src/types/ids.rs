//! Numeric identifiers assigned by the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|e| {
                    InvalidInputError::Id {
                        value: s.to_string(),
                        reason: e.to_string(),
                    }
                    .into()
                })
            }
        }
    };
}

id_type!(
    /// Identifier of a user account.
    UserId
);

id_type!(
    /// Identifier of a post.
    PostId
);

id_type!(
    /// Identifier of a comment.
    CommentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let id: PostId = "42".parse().unwrap();
        assert_eq!(id, PostId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric() {
        let err = "abc".parse::<UserId>().unwrap_err();
        assert!(err.to_string().contains("invalid id 'abc'"));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&CommentId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
