//! Login, registration and password-change inputs.

use std::fmt;

use crate::error::ValidationError;

/// Login credentials.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use chirp_core::LoginCredentials;
///
/// let creds = LoginCredentials::new("alice", "hunter22");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form input.
#[derive(Clone)]
pub struct RegisterCredentials {
    username: String,
    email: String,
    password: String,
    password_confirm: String,
}

impl RegisterCredentials {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// # Security
    ///
    /// Use this only when constructing the registration request.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// # Security
    ///
    /// Use this only when constructing the registration request.
    pub fn password_confirm(&self) -> &str {
        &self.password_confirm
    }

    /// Checks the form locally. Must pass before any request is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .finish()
    }
}

/// Password change form input.
#[derive(Clone)]
pub struct PasswordChange {
    old_password: String,
    new_password: String,
    new_password_confirm: String,
}

impl PasswordChange {
    pub fn new(
        old_password: impl Into<String>,
        new_password: impl Into<String>,
        new_password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            old_password: old_password.into(),
            new_password: new_password.into(),
            new_password_confirm: new_password_confirm.into(),
        }
    }

    pub fn old_password(&self) -> &str {
        &self.old_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    pub fn new_password_confirm(&self) -> &str {
        &self.new_password_confirm
    }

    /// Checks the form locally. Must pass before any request is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.old_password.is_empty() {
            return Err(ValidationError::Empty {
                field: "current password",
            });
        }
        if self.new_password.is_empty() {
            return Err(ValidationError::Empty {
                field: "new password",
            });
        }
        if self.new_password != self.new_password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_credentials_hide_password_in_debug() {
        let creds = LoginCredentials::new("alice", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let creds = RegisterCredentials::new("bob", "bob@example.com", "abcdef", "abcdeg");
        assert_eq!(creds.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn register_accepts_matching_confirmation() {
        let creds = RegisterCredentials::new("bob", "bob@example.com", "abcdef", "abcdef");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn register_debug_hides_both_passwords() {
        let creds = RegisterCredentials::new("bob", "bob@example.com", "pw-one", "pw-two");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("pw-one"));
        assert!(!debug.contains("pw-two"));
    }

    #[test]
    fn password_change_requires_old_password() {
        let change = PasswordChange::new("", "newpass", "newpass");
        assert_eq!(
            change.validate(),
            Err(ValidationError::Empty {
                field: "current password"
            })
        );
    }

    #[test]
    fn password_change_rejects_mismatch() {
        let change = PasswordChange::new("old", "newpass", "newpasz");
        assert_eq!(change.validate(), Err(ValidationError::PasswordMismatch));
    }
}
