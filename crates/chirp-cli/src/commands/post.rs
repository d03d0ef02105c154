//! Post command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::PostContent;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Text of the post (up to 280 characters)
    pub text: String,
}

pub async fn run(global: &GlobalArgs, args: PostArgs) -> Result<()> {
    let content = PostContent::new(&args.text).context("Invalid post")?;

    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let post = chirp
        .posts()
        .create_post(&content)
        .await
        .context("Failed to publish post")?;

    if global.json {
        return output::json(&post);
    }

    output::success("Post published");
    println!();
    output::post(&post);

    Ok(())
}
