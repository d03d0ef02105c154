//! Session plumbing shared by the commands.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use chirp_core::{ApiUrl, AuthError, Error, User};
use chirp_rest::{Chirp, ClientConfig};

use crate::cli::GlobalArgs;
use storage::FileTokenStore;

/// Build the clients and resolve the stored session.
pub async fn connect(args: &GlobalArgs) -> Result<Chirp> {
    let api_url = ApiUrl::new(&args.api_url).context("Invalid API URL")?;

    let mut config = ClientConfig::new(api_url)
        .with_user_agent(concat!("chirp-cli/", env!("CHIRP_VERSION")));
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }

    let tokens = FileTokenStore::open().context("Failed to open token storage")?;
    debug!(path = %tokens.path().display(), "Using token file");
    let chirp = Chirp::connect(config, Arc::new(tokens)).await?;
    debug!(api = %chirp.client().api_url(), "Session resolved");
    Ok(chirp)
}

/// The signed-in user, or an error telling how to sign in.
pub fn require_user(chirp: &Chirp) -> Result<User> {
    chirp
        .session()
        .current_user()
        .ok_or(Error::from(AuthError::NotAuthenticated))
        .context("Not logged in. Run 'chirp login' first")
}
