//! Posts command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::UserId;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Only posts by this user ID
    #[arg(long)]
    pub author: Option<UserId>,

    /// Page number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

pub async fn run(global: &GlobalArgs, args: PostsArgs) -> Result<()> {
    let chirp = session::connect(global).await?;

    let page = match args.author {
        Some(author) => chirp.posts().user_posts_page(author, args.page).await,
        None => chirp.posts().posts_page(args.page).await,
    }
    .context("Failed to list posts")?;

    if global.json {
        return output::json(&page.items);
    }

    if page.items.is_empty() {
        output::status("No posts found.");
        return Ok(());
    }

    for post in &page.items {
        output::post(post);
        println!();
    }

    if page.has_more() {
        output::status(&format!("Next page: --page {}", args.page + 1));
    }

    Ok(())
}
