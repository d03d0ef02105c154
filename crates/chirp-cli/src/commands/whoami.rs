//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(global: &GlobalArgs, _args: WhoamiArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    let user = session::require_user(&chirp)?;

    if global.json {
        return output::json(&user);
    }

    output::profile(&user);
    output::field("API", global.api_url.as_str());

    Ok(())
}
