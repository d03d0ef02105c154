//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::LoadOutcome;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Number of pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

pub async fn run(global: &GlobalArgs, args: FeedArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let feed = chirp.home_feed();
    chirp
        .load_feed(&feed)
        .await
        .context("Failed to load feed")?;

    for _ in 1..args.pages {
        let outcome = feed
            .on_sentinel_visible()
            .await
            .context("Failed to load more posts")?;
        if !matches!(outcome, LoadOutcome::Loaded { .. }) {
            break;
        }
    }

    let posts = feed.posts();
    if global.json {
        return output::json(&posts);
    }

    if posts.is_empty() {
        output::status("Your feed is empty. Follow someone to see their posts.");
        return Ok(());
    }

    for post in &posts {
        output::post(post);
        println!();
    }

    if feed.has_more() {
        output::status(&format!(
            "More posts available: chirp feed --pages {}",
            feed.page() + 1
        ));
    }

    Ok(())
}
