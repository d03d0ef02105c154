//! Followers command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::UserId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FollowersArgs {
    /// User ID
    pub id: UserId,

    /// Page number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

pub async fn run(global: &GlobalArgs, args: FollowersArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let page = chirp
        .users()
        .followers(args.id, args.page)
        .await
        .context("Failed to list followers")?;

    if global.json {
        return output::json(&page.items);
    }

    if page.items.is_empty() {
        output::status("No followers yet.");
        return Ok(());
    }

    for user in &page.items {
        output::user_line(user);
    }

    if page.has_more() {
        output::status(&format!("Next page: --page {}", args.page + 1));
    }

    Ok(())
}
