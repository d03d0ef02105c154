//! Edit profile command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::warn;

use chirp_rest::{AvatarUpload, ProfileUpdate};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct EditProfileArgs {
    /// New username
    #[arg(long)]
    pub username: Option<String>,

    /// Image file to use as the profile picture
    #[arg(long)]
    pub avatar: Option<PathBuf>,
}

pub async fn run(global: &GlobalArgs, args: EditProfileArgs) -> Result<()> {
    if args.username.is_none() && args.avatar.is_none() {
        bail!("Nothing to change. Pass --username and/or --avatar.");
    }

    let avatar = args.avatar.map(read_avatar).transpose()?;

    let chirp = session::connect(global).await?;
    session::require_user(&chirp)?;

    let update = ProfileUpdate {
        username: args.username,
        avatar,
    };
    let user = chirp
        .users()
        .update_profile(update)
        .await
        .context("Failed to update profile")?;

    let user = match chirp.session().refresh_identity().await {
        Ok(Some(fresh)) => fresh,
        Ok(None) => user,
        Err(e) => {
            warn!(error = %e, "Could not refresh the session after the update");
            user
        }
    };

    if global.json {
        return output::json(&user);
    }

    output::success("Profile updated");
    println!();
    output::profile(&user);

    Ok(())
}

fn read_avatar(path: PathBuf) -> Result<AvatarUpload> {
    let bytes = fs::read(&path)
        .with_context(|| format!("Failed to read avatar from {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string();
    let mime = mime_guess::from_path(&path)
        .first()
        .map(|m| m.essence_str().to_string());

    Ok(AvatarUpload {
        file_name,
        bytes,
        mime,
    })
}
