//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use chirp_core::LoginCredentials;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to sign in with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "CHIRP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let chirp = session::connect(global).await?;
    let credentials = LoginCredentials::new(args.username, args.password);

    output::status("Logging in...");

    let user = chirp
        .session()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    if global.json {
        return output::json(&user);
    }

    output::success("Logged in successfully");
    println!();
    output::field("Username", &user.username);
    output::field("API", global.api_url.as_str());

    Ok(())
}
