//! Session store: the authenticated identity derived from the stored token.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use chirp_core::{
    AuthError, Error, LoginCredentials, RegisterCredentials, Result, SessionState, User,
};

use crate::client::{RequestOptions, RestClient};
use crate::wire::{self, AuthResponse, LoginRequest, RawUser, RegisterRequest};

/// Handle to the session state machine.
///
/// The state moves from `Resolving` to `Anonymous` or `Authenticated`.
/// Clones share the same state; hand one to every consumer that needs to
/// know who is viewing.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    client: RestClient,
    state: watch::Sender<SessionState>,
    /// Bumped by every operation that sets the identity. A background
    /// identity fetch only applies its result if the epoch is unchanged.
    epoch: AtomicU64,
}

impl SessionStore {
    pub fn new(client: RestClient) -> Self {
        let (state, _) = watch::channel(SessionState::Resolving);
        Self {
            inner: Arc::new(SessionInner {
                client,
                state,
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn client(&self) -> &RestClient {
        &self.inner.client
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.inner.state.borrow(), SessionState::Authenticated(_))
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Wait until the state is no longer `Resolving`.
    pub async fn wait_resolved(&self) -> SessionState {
        let mut rx = self.subscribe();
        let resolved = rx
            .wait_for(SessionState::is_resolved)
            .await
            .map(|state| state.clone());
        // Unreachable while `self` holds the sender.
        resolved.unwrap_or_else(|_| self.state())
    }

    /// Resolve the identity from the stored token.
    ///
    /// Any failure clears the token and leaves the session `Anonymous`;
    /// nothing is surfaced to the caller.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> SessionState {
        let epoch = self.begin();
        self.inner.state.send_replace(SessionState::Resolving);

        let token = match self.inner.client.tokens().load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read stored token, discarding it");
                self.clear_token();
                None
            }
        };
        if token.is_none() {
            debug!("No stored token");
            self.settle(epoch, SessionState::Anonymous);
            return self.state();
        }

        match self.fetch_identity().await {
            Ok(user) => {
                info!(user = %user.username, "Session restored");
                self.settle(epoch, SessionState::Authenticated(user));
            }
            Err(e) => {
                info!(error = %e, "Stored token not accepted, signing out locally");
                if self.is_current(epoch) {
                    self.clear_token();
                }
                self.settle(epoch, SessionState::Anonymous);
            }
        }
        self.state()
    }

    /// Sign in with a username and password.
    ///
    /// A rejection leaves the session and the stored token untouched.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User> {
        self.begin();
        let body = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let options = RequestOptions::post().json(&body)?.without_auth();
        let response: AuthResponse = self
            .inner
            .client
            .request(wire::LOGIN, options)
            .await
            .map_err(credentials_rejected)?;

        self.establish(response).await
    }

    /// Create an account and sign in with it.
    ///
    /// The password confirmation is checked before any request is sent.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<User> {
        credentials.validate()?;
        self.begin();
        let body = RegisterRequest {
            username: credentials.username(),
            email: credentials.email(),
            password: credentials.password(),
            password_confirm: credentials.password_confirm(),
        };
        let options = RequestOptions::post().json(&body)?.without_auth();
        let response: AuthResponse = self.inner.client.request(wire::REGISTER, options).await?;

        self.establish(response).await
    }

    /// Sign out. Whatever the backend answers, the token is cleared and the
    /// session ends `Anonymous`.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.begin();
        match self.inner.client.tokens().load() {
            Ok(Some(_)) => {
                if let Err(e) = self.inner.client.post_empty(wire::LOGOUT).await {
                    warn!(error = %e, "Server-side logout failed");
                }
            }
            Ok(None) => debug!("No stored token, skipping server-side logout"),
            Err(e) => warn!(error = %e, "Could not read stored token"),
        }
        self.clear_token();
        self.inner.state.send_replace(SessionState::Anonymous);
        info!("Logged out");
    }

    /// Re-fetch the identity if a token is stored.
    ///
    /// A rejected token signs out locally and yields `Ok(None)`; other
    /// failures are returned and leave the state as it was.
    #[instrument(skip(self))]
    pub async fn refresh_identity(&self) -> Result<Option<User>> {
        let epoch = self.begin();
        if self.inner.client.tokens().load()?.is_none() {
            self.settle(epoch, SessionState::Anonymous);
            return Ok(None);
        }

        match self.fetch_identity().await {
            Ok(user) => {
                self.settle(epoch, SessionState::Authenticated(user.clone()));
                Ok(Some(user))
            }
            Err(e) if e.is_token_rejected() => {
                info!("Token rejected, signing out locally");
                if self.is_current(epoch) {
                    self.clear_token();
                }
                self.settle(epoch, SessionState::Anonymous);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn establish(&self, response: AuthResponse) -> Result<User> {
        let token = response.into_token()?;
        self.inner.client.tokens().save(&token)?;

        match self.fetch_identity().await {
            Ok(user) => {
                info!(user = %user.username, "Logged in");
                self.inner
                    .state
                    .send_replace(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Identity fetch after login failed");
                self.clear_token();
                self.inner.state.send_replace(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    async fn fetch_identity(&self) -> Result<User> {
        let raw: RawUser = self.inner.client.get(wire::ME).await?;
        raw.into_user()
    }

    fn begin(&self) -> u64 {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.epoch.load(Ordering::SeqCst) == epoch
    }

    fn settle(&self, epoch: u64, state: SessionState) {
        if self.is_current(epoch) {
            self.inner.state.send_replace(state);
        } else {
            debug!("Session changed while resolving, dropping stale result");
        }
    }

    fn clear_token(&self) {
        if let Err(e) = self.inner.client.tokens().clear() {
            warn!(error = %e, "Could not clear stored token");
        }
    }
}

/// Login answers 400 or 401 when the username/password pair is wrong.
fn credentials_rejected(err: Error) -> Error {
    match err {
        Error::Api(api) if matches!(api.status, 400 | 401) => AuthError::InvalidCredentials {
            message: Some(api.message),
        }
        .into(),
        Error::Auth(AuthError::TokenRejected { message }) => {
            AuthError::InvalidCredentials { message }.into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chirp_core::{ApiError, ApiUrl, AuthToken, MemoryTokenStore, StorageError, TokenStore};

    use crate::ClientConfig;

    fn store_with(tokens: Arc<dyn TokenStore>) -> SessionStore {
        let config = ClientConfig::new(ApiUrl::new("http://localhost:9/api").unwrap());
        SessionStore::new(RestClient::new(config, tokens).unwrap())
    }

    fn store() -> SessionStore {
        store_with(Arc::new(MemoryTokenStore::new()))
    }

    /// Holds unreadable data until cleared.
    #[derive(Default)]
    struct CorruptTokenStore {
        cleared: Mutex<bool>,
    }

    impl TokenStore for CorruptTokenStore {
        fn load(&self) -> Result<Option<AuthToken>> {
            if *self.cleared.lock().unwrap() {
                Ok(None)
            } else {
                Err(StorageError::new("token file is not valid JSON").into())
            }
        }

        fn save(&self, _token: &AuthToken) -> Result<()> {
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.cleared.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn starts_resolving() {
        let session = store();
        assert_eq!(session.state(), SessionState::Resolving);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_without_token_is_anonymous() {
        let session = store();
        assert_eq!(session.initialize().await, SessionState::Anonymous);
        assert_eq!(session.wait_resolved().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn initialize_discards_unreadable_token() {
        let tokens = Arc::new(CorruptTokenStore::default());
        let session = store_with(tokens.clone());

        assert_eq!(session.initialize().await, SessionState::Anonymous);
        assert!(*tokens.cleared.lock().unwrap());
        assert!(session.client().tokens().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn register_mismatch_fails_before_network() {
        let session = store();
        let credentials = RegisterCredentials::new("alice", "a@example.com", "one", "two");
        let err = session.register(&credentials).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn bad_request_on_login_means_invalid_credentials() {
        let err = credentials_rejected(ApiError::new(400, "Unable to log in").into());
        let Error::Auth(AuthError::InvalidCredentials { message }) = err else {
            panic!("expected invalid credentials");
        };
        assert_eq!(message.as_deref(), Some("Unable to log in"));
        let err = credentials_rejected(ApiError::new(429, "slow down").into());
        assert!(matches!(err, Error::Api(_)));
    }
}
