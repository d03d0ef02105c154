//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::RegisterCredentials;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "CHIRP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password again, to catch typos
    #[arg(long)]
    pub password_confirm: String,
}

pub async fn run(global: &GlobalArgs, args: RegisterArgs) -> Result<()> {
    let credentials = RegisterCredentials::new(
        args.username,
        args.email,
        args.password,
        args.password_confirm,
    );
    credentials.validate().context("Invalid registration")?;

    let chirp = session::connect(global).await?;

    output::status("Creating account...");

    let user = chirp
        .session()
        .register(&credentials)
        .await
        .context("Failed to register")?;

    if global.json {
        return output::json(&user);
    }

    output::success("Account created");
    println!();
    output::field("Username", &user.username);
    output::field("ID", &user.id.to_string());

    Ok(())
}
