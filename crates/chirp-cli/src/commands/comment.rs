//! Comment command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::{PostContent, PostId};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Post ID
    pub id: PostId,

    /// Text of the comment (up to 280 characters)
    pub text: String,
}

pub async fn run(global: &GlobalArgs, args: CommentArgs) -> Result<()> {
    let content = PostContent::new(&args.text).context("Invalid comment")?;

    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let mut post = chirp
        .posts()
        .get_post(args.id)
        .await
        .context("Failed to fetch post")?;

    let comment = chirp
        .posts()
        .add_comment_to(&mut post, &content)
        .await
        .context("Failed to add comment")?;

    if global.json {
        return output::json(&comment);
    }

    output::success("Comment added");
    output::comment(&comment);
    output::field("Comments", &post.comments_count.to_string());

    Ok(())
}
