//! Endpoint paths, request bodies and response normalization.
//!
//! The backend has shipped several payload shapes for the same resource
//! (author as object, bare id, or flattened `user_id`/`username`; avatar
//! under four names; lists bare or paginated). This module is the only place
//! that knows about them: everything is mapped into the canonical
//! `chirp_core` types before it leaves the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use chirp_core::{
    Author, AuthToken, Comment, CommentId, Page, Post, PostId, Result, ServerError, User, UserId,
};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const LOGOUT: &str = "/auth/logout/";
pub const ME: &str = "/users/me/";
pub const POSTS: &str = "/posts/";
pub const CHANGE_PASSWORD: &str = "/users/me/change-password/";

pub fn feed_page(page: u32) -> String {
    format!("/feed/?page={page}")
}

pub fn posts_page(page: u32, author: Option<UserId>) -> String {
    match author {
        Some(author) => format!("/posts/?page={page}&author={author}"),
        None => format!("/posts/?page={page}"),
    }
}

pub fn post(id: PostId) -> String {
    format!("/posts/{id}/")
}

pub fn post_like(id: PostId) -> String {
    format!("/posts/{id}/like/")
}

pub fn post_comments(id: PostId) -> String {
    format!("/posts/{id}/comments/")
}

pub fn user(id: UserId) -> String {
    format!("/users/{id}/")
}

pub fn user_follow(id: UserId) -> String {
    format!("/users/{id}/follow/")
}

pub fn user_followers(id: UserId, page: u32) -> String {
    format!("/users/{id}/followers/?page={page}")
}

pub fn user_following(id: UserId, page: u32) -> String {
    format!("/users/{id}/following/?page={page}")
}

pub fn search_users(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("/users/search/?q={encoded}")
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ContentRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
    pub new_password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProfilePatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response from login and register.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<RawUser>,
}

impl AuthResponse {
    /// The issued token; a success response without one is malformed.
    pub fn into_token(self) -> Result<AuthToken> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(AuthToken::new(token)),
            _ => Err(ServerError::new(200, "authentication response carried no token").into()),
        }
    }
}

/// A list endpoint's body: paginated envelope or bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawList<T> {
    Paginated {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> RawList<T> {
    /// Normalize into a [`Page`], converting each item.
    pub fn into_page<U>(self, mut convert: impl FnMut(T) -> Result<U>) -> Result<Page<U>> {
        match self {
            RawList::Paginated { count, next, previous, results } => Ok(Page {
                items: results.into_iter().map(&mut convert).collect::<Result<_>>()?,
                count,
                next,
                previous,
            }),
            RawList::Bare(items) => Ok(Page::complete(
                items.into_iter().map(convert).collect::<Result<_>>()?,
            )),
        }
    }
}

/// Picks the first avatar reference that is a non-empty string.
fn first_avatar(candidates: [&Option<Value>; 4]) -> Option<String> {
    candidates
        .into_iter()
        .filter_map(|v| v.as_ref().and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// A user profile as the backend sends it.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<Value>,
    #[serde(default)]
    pub avatar: Option<Value>,
    #[serde(default)]
    pub user_avatar: Option<Value>,
    #[serde(default)]
    pub profile_image: Option<Value>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub is_following: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RawUser {
    pub fn into_user(self) -> Result<User> {
        let avatar = first_avatar([
            &self.profile_picture,
            &self.avatar,
            &self.user_avatar,
            &self.profile_image,
        ]);
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email.filter(|e| !e.is_empty()),
            avatar,
            followers_count: self.followers_count,
            following_count: self.following_count,
            is_following: self.is_following,
            created_at: self.created_at,
        })
    }
}

/// Author summary embedded in posts and comments.
#[derive(Debug, Deserialize)]
pub struct RawAuthorProfile {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<Value>,
    #[serde(default)]
    pub avatar: Option<Value>,
    #[serde(default)]
    pub user_avatar: Option<Value>,
    #[serde(default)]
    pub profile_image: Option<Value>,
}

/// An author reference: either an embedded profile or a bare id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawAuthorRef {
    Id(UserId),
    Profile(RawAuthorProfile),
}

/// The author fields a post or comment payload may carry.
#[derive(Debug, Default, Deserialize)]
pub struct RawAuthorFields {
    #[serde(default)]
    pub author: Option<RawAuthorRef>,
    #[serde(default)]
    pub user: Option<RawAuthorRef>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
}

impl RawAuthorFields {
    /// Resolve the author: an embedded profile under `author`, then under
    /// `user`, then any bare id with the flattened `username`.
    pub fn resolve(self) -> Option<Author> {
        let RawAuthorFields {
            author,
            user,
            user_id,
            username,
        } = self;

        let mut bare_id = None;
        for candidate in [author, user].into_iter().flatten() {
            match candidate {
                RawAuthorRef::Profile(profile) => {
                    let avatar = first_avatar([
                        &profile.profile_picture,
                        &profile.avatar,
                        &profile.user_avatar,
                        &profile.profile_image,
                    ]);
                    return Some(Author {
                        id: profile.id,
                        username: profile
                            .username
                            .or_else(|| username.clone())
                            .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
                        avatar,
                    });
                }
                RawAuthorRef::Id(id) => {
                    bare_id.get_or_insert(id);
                }
            }
        }

        bare_id.or(user_id).map(|id| Author {
            id,
            username: username.unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
            avatar: None,
        })
    }
}

const UNKNOWN_USERNAME: &str = "unknown";

/// A post as the backend sends it.
#[derive(Debug, Deserialize)]
pub struct RawPost {
    pub id: PostId,
    #[serde(flatten)]
    pub author: RawAuthorFields,
    pub content: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl RawPost {
    pub fn into_post(self) -> Result<Post> {
        let author = self.author.resolve().ok_or_else(|| {
            ServerError::new(200, format!("post {} has no author reference", self.id))
        })?;
        Ok(Post {
            id: self.id,
            author,
            content: self.content,
            likes_count: self.likes_count,
            comments_count: self.comments_count,
            is_liked: self.is_liked,
            created_at: self.created_at,
        })
    }
}

/// A comment as the backend sends it.
#[derive(Debug, Deserialize)]
pub struct RawComment {
    pub id: CommentId,
    #[serde(flatten)]
    pub author: RawAuthorFields,
    /// Some serializers omit the parent post; the caller knows it.
    #[serde(default)]
    pub post: Option<PostId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl RawComment {
    /// Convert, attributing the comment to `post` when the payload does not
    /// name its parent.
    pub fn into_comment(self, post: PostId) -> Result<Comment> {
        let author = self.author.resolve().ok_or_else(|| {
            ServerError::new(200, format!("comment {} has no author reference", self.id))
        })?;
        Ok(Comment {
            id: self.id,
            author,
            post: self.post.unwrap_or(post),
            content: self.content,
            created_at: self.created_at,
        })
    }
}
