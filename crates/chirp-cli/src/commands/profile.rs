//! Profile command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::UserId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// User ID (defaults to the signed-in user)
    pub id: Option<UserId>,
}

pub async fn run(global: &GlobalArgs, args: ProfileArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let user = match args.id {
        Some(id) => chirp
            .users()
            .get_user(id)
            .await
            .context("Failed to fetch profile")?,
        None => session::require_user(&chirp)?,
    };

    if global.json {
        return output::json(&user);
    }

    output::profile(&user);

    Ok(())
}
