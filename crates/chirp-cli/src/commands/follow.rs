//! Follow command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::UserId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FollowArgs {
    /// User ID
    pub id: UserId,
}

pub async fn run(global: &GlobalArgs, args: FollowArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let mut user = chirp
        .users()
        .get_user(args.id)
        .await
        .context("Failed to fetch profile")?;

    chirp
        .users()
        .set_following(&mut user, true)
        .await
        .context("Failed to follow user")?;

    if global.json {
        return output::json(&user);
    }

    output::success(&format!("Following @{}", user.username));
    output::field("Followers", &user.followers_count.to_string());

    Ok(())
}
