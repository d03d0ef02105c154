//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(global: &GlobalArgs, _args: LogoutArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    chirp.session().logout().await;

    output::success("Logged out");

    Ok(())
}
