use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Run the CLI with an isolated HOME and the given API base URL.
///
/// The binary runs on a blocking thread so the mock server keeps serving.
pub async fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chirp"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("CHIRP_API_URL", api_url);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("CHIRP_PASSWORD");
    cmd.env_remove("RUST_LOG");

    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .expect("CLI task panicked")
}

/// Run the CLI with an isolated HOME and expect success.
pub async fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with an isolated HOME and expect failure; returns stderr.
pub async fn run_cli_with_env_failure(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "followers_count": 1,
        "following_count": 2
    })
}

pub fn post_json(id: u64, likes: u64, liked: bool) -> Value {
    json!({
        "id": id,
        "author": {"id": 7, "username": "alice"},
        "content": format!("post number {id}"),
        "likes_count": likes,
        "comments_count": 0,
        "is_liked": liked,
        "created_at": "2024-05-01T12:00:00Z"
    })
}
