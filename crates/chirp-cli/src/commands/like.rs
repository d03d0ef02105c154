//! Like command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::PostId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LikeArgs {
    /// Post ID
    pub id: PostId,
}

pub async fn run(global: &GlobalArgs, args: LikeArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let mut post = chirp
        .posts()
        .get_post(args.id)
        .await
        .context("Failed to fetch post")?;

    chirp
        .posts()
        .set_liked(&mut post, true)
        .await
        .context("Failed to like post")?;

    if global.json {
        return output::json(&post);
    }

    output::success(&format!("Liked post #{}", post.id));
    output::field("Likes", &post.likes_count.to_string());

    Ok(())
}
