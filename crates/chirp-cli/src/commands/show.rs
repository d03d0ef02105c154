//! Show command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::PostId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Post ID
    pub id: PostId,
}

pub async fn run(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let post = chirp
        .posts()
        .get_post(args.id)
        .await
        .context("Failed to fetch post")?;

    if global.json {
        return output::json(&post);
    }

    output::post(&post);

    Ok(())
}
