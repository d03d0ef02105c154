//! Search command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to match against usernames
    pub query: String,
}

pub async fn run(global: &GlobalArgs, args: SearchArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let users = chirp
        .users()
        .search(&args.query)
        .await
        .context("Failed to search users")?;

    if global.json {
        return output::json(&users);
    }

    if users.is_empty() {
        output::status("No users found.");
        return Ok(());
    }

    for user in &users {
        output::user_line(user);
    }

    Ok(())
}
