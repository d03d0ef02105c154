//! Comments command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::PostId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Post ID
    pub id: PostId,
}

pub async fn run(global: &GlobalArgs, args: CommentsArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let comments = chirp
        .posts()
        .comments(args.id)
        .await
        .context("Failed to list comments")?;

    if global.json {
        return output::json(&comments);
    }

    if comments.is_empty() {
        output::status("No comments yet.");
        return Ok(());
    }

    for comment in &comments {
        output::comment(comment);
    }

    Ok(())
}
