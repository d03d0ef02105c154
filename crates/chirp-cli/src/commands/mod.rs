//! Subcommand implementations.

pub mod change_password;
pub mod comment;
pub mod comments;
pub mod edit_profile;
pub mod feed;
pub mod follow;
pub mod followers;
pub mod following;
pub mod like;
pub mod login;
pub mod logout;
pub mod post;
pub mod posts;
pub mod profile;
pub mod register;
pub mod search;
pub mod show;
pub mod unfollow;
pub mod unlike;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};

pub async fn handle(cli: Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        Commands::Login(args) => login::run(global, args).await,
        Commands::Register(args) => register::run(global, args).await,
        Commands::Logout(args) => logout::run(global, args).await,
        Commands::Whoami(args) => whoami::run(global, args).await,
        Commands::Feed(args) => feed::run(global, args).await,
        Commands::Posts(args) => posts::run(global, args).await,
        Commands::Post(args) => post::run(global, args).await,
        Commands::Show(args) => show::run(global, args).await,
        Commands::Like(args) => like::run(global, args).await,
        Commands::Unlike(args) => unlike::run(global, args).await,
        Commands::Comments(args) => comments::run(global, args).await,
        Commands::Comment(args) => comment::run(global, args).await,
        Commands::Profile(args) => profile::run(global, args).await,
        Commands::EditProfile(args) => edit_profile::run(global, args).await,
        Commands::ChangePassword(args) => change_password::run(global, args).await,
        Commands::Follow(args) => follow::run(global, args).await,
        Commands::Unfollow(args) => unfollow::run(global, args).await,
        Commands::Followers(args) => followers::run(global, args).await,
        Commands::Following(args) => following::run(global, args).await,
        Commands::Search(args) => search::run(global, args).await,
    }
}
