//! Change password command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::PasswordChange;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Current password
    #[arg(long)]
    pub current: String,

    /// New password
    #[arg(long)]
    pub new: String,

    /// New password again
    #[arg(long)]
    pub confirm: String,
}

pub async fn run(global: &GlobalArgs, args: ChangePasswordArgs) -> Result<()> {
    let change = PasswordChange::new(args.current, args.new, args.confirm);
    change.validate().context("Invalid password change")?;

    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    chirp
        .users()
        .change_password(&change)
        .await
        .context("Failed to change password")?;

    output::success("Password changed");

    Ok(())
}
