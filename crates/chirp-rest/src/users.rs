//! Profiles, follows and user search.

use std::fmt;

use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use chirp_core::optimistic;
use chirp_core::{InvalidInputError, Page, PasswordChange, Result, User, UserId, ValidationError};

use crate::client::{RequestOptions, RestClient};
use crate::wire::{self, ChangePasswordRequest, ProfilePatch, RawList, RawUser};

/// An image to upload as the profile picture.
#[derive(Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/png`. Left to the backend when absent.
    pub mime: Option<String>,
}

impl fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Changes to the viewer's own profile. Absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar: Option<AvatarUpload>,
}

/// Typed operations on users.
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: RestClient,
}

impl UsersClient {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        let raw: RawUser = self.client.get(&wire::user(id)).await?;
        raw.into_user()
    }

    /// The viewer's own profile.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        let raw: RawUser = self.client.get(wire::ME).await?;
        raw.into_user()
    }

    /// Update the viewer's profile.
    ///
    /// Sent as multipart when an avatar is included, as JSON otherwise.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let username = match update.username {
            Some(name) if name.trim().is_empty() => {
                return Err(ValidationError::Empty { field: "username" }.into());
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let raw: RawUser = match update.avatar {
            Some(avatar) => {
                debug!(file = %avatar.file_name, len = avatar.bytes.len(), "Uploading avatar");
                let mut part = Part::bytes(avatar.bytes).file_name(avatar.file_name);
                if let Some(mime) = avatar.mime {
                    part = part
                        .mime_str(&mime)
                        .map_err(|e| InvalidInputError::Request {
                            reason: format!("invalid MIME type '{mime}': {e}"),
                        })?;
                }
                let mut form = Form::new().part("profile_picture", part);
                if let Some(name) = username {
                    form = form.text("username", name);
                }
                self.client
                    .request(wire::ME, RequestOptions::patch().multipart(form))
                    .await?
            }
            None => {
                let Some(name) = username else {
                    return Err(ValidationError::Empty {
                        field: "profile update",
                    }
                    .into());
                };
                let body = ProfilePatch {
                    username: Some(name.as_str()),
                };
                self.client.patch_json(wire::ME, &body).await?
            }
        };
        raw.into_user()
    }

    /// Change the viewer's password.
    ///
    /// The new password and its confirmation are compared before any request
    /// is sent.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        change.validate()?;
        let body = ChangePasswordRequest {
            old_password: change.old_password(),
            new_password: change.new_password(),
            new_password_confirm: change.new_password_confirm(),
        };
        self.client
            .request_empty(wire::CHANGE_PASSWORD, RequestOptions::post().json(&body)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, id: UserId) -> Result<()> {
        self.client.post_empty(&wire::user_follow(id)).await
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, id: UserId) -> Result<()> {
        self.client.delete(&wire::user_follow(id)).await
    }

    /// Follow or unfollow, updating the local copy of `user` first.
    ///
    /// On failure `user` is restored to what it was before the call.
    pub async fn set_following(&self, user: &mut User, following: bool) -> Result<()> {
        if user.is_following == Some(following) {
            return Ok(());
        }
        let id = user.id;
        optimistic::apply(user, |u| u.set_followed(following), async move {
            if following {
                self.follow(id).await
            } else {
                self.unfollow(id).await
            }
        })
        .await
    }

    pub async fn toggle_follow(&self, user: &mut User) -> Result<()> {
        let following = !user.is_following.unwrap_or(false);
        self.set_following(user, following).await
    }

    #[instrument(skip(self))]
    pub async fn followers(&self, id: UserId, page: u32) -> Result<Page<User>> {
        self.fetch_users(&wire::user_followers(id, page)).await
    }

    #[instrument(skip(self))]
    pub async fn following(&self, id: UserId, page: u32) -> Result<Page<User>> {
        self.fetch_users(&wire::user_following(id, page)).await
    }

    /// Users whose handle matches `query`. A blank query matches nobody and
    /// sends no request.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<User>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.fetch_users(&wire::search_users(query)).await?.items)
    }

    async fn fetch_users(&self, endpoint: &str) -> Result<Page<User>> {
        let list: RawList<RawUser> = self.client.get(endpoint).await?;
        list.into_page(RawUser::into_user)
    }
}
