//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use chirp_rest::DEFAULT_API_URL;

use crate::commands::{
    change_password, comment, comments, edit_profile, feed, follow, followers, following, like,
    login, logout, post, posts, profile, register, search, show, unfollow, unlike, whoami,
};

/// Terminal client for the chirp micro-blogging service.
#[derive(Parser, Debug)]
#[command(name = "chirp")]
#[command(author, version = env!("CHIRP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the chirp API
    #[arg(long, env = "CHIRP_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, env = "CHIRP_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login(login::LoginArgs),

    /// Create an account and sign in
    Register(register::RegisterArgs),

    /// Sign out and forget the session token
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Show the home feed
    Feed(feed::FeedArgs),

    /// List posts, optionally by one author
    Posts(posts::PostsArgs),

    /// Publish a post
    Post(post::PostArgs),

    /// Show a single post
    Show(show::ShowArgs),

    /// Like a post
    Like(like::LikeArgs),

    /// Remove a like from a post
    Unlike(unlike::UnlikeArgs),

    /// List comments on a post
    Comments(comments::CommentsArgs),

    /// Comment on a post
    Comment(comment::CommentArgs),

    /// Show a user profile (defaults to your own)
    Profile(profile::ProfileArgs),

    /// Change your username or avatar
    EditProfile(edit_profile::EditProfileArgs),

    /// Change your password
    ChangePassword(change_password::ChangePasswordArgs),

    /// Follow a user
    Follow(follow::FollowArgs),

    /// Stop following a user
    Unfollow(unfollow::UnfollowArgs),

    /// List a user's followers
    Followers(followers::FollowersArgs),

    /// List the users someone follows
    Following(following::FollowingArgs),

    /// Search users by name
    Search(search::SearchArgs),
}
