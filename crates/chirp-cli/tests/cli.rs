//! CLI integration tests against a mock backend.
//!
//! Each test runs the `chirp` binary with its own HOME so the stored token
//! never leaks between tests.

mod common;

use common::{post_json, run_cli_with_env_failure, run_cli_with_env_success, user_json};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "user": user_json(7, "alice")
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .and(header("authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "alice")))
        .mount(server)
        .await;
}

async fn login(home: &TempDir, api: &str) {
    run_cli_with_env_success(
        &["login", "--username", "alice", "--password", "secret123"],
        home.path(),
        api,
    )
    .await;
}

#[tokio::test]
async fn test_login_whoami_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);

    let stdout = run_cli_with_env_success(
        &["login", "--username", "alice", "--password", "secret123"],
        home.path(),
        &api,
    )
    .await;
    assert!(stdout.contains("Logged in successfully"));
    assert!(home.path().join("data/chirp/token.json").exists());

    let stdout = run_cli_with_env_success(&["whoami"], home.path(), &api).await;
    assert!(stdout.contains("alice"));

    let stdout = run_cli_with_env_success(&["logout"], home.path(), &api).await;
    assert!(stdout.contains("Logged out"));
    assert!(!home.path().join("data/chirp/token.json").exists());

    let stderr = run_cli_with_env_failure(&["whoami"], home.path(), &api).await;
    assert!(stderr.contains("Not logged in"));
    assert!(stderr.contains("You need to log in first."));
}

#[tokio::test]
async fn test_login_with_bad_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "non_field_errors": ["Unable to log in with provided credentials."]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let stderr = run_cli_with_env_failure(
        &["login", "--username", "alice", "--password", "wrong"],
        home.path(),
        &api_url(&server),
    )
    .await;

    assert!(stderr.contains("Unable to log in with provided credentials."));
    assert!(!home.path().join("data/chirp/token.json").exists());
}

#[tokio::test]
async fn test_register_mismatch_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let stderr = run_cli_with_env_failure(
        &[
            "register",
            "--username",
            "bob",
            "--email",
            "bob@example.com",
            "--password",
            "hunter22",
            "--password-confirm",
            "hunter23",
        ],
        home.path(),
        &api_url(&server),
    )
    .await;

    assert!(stderr.contains("passwords do not match"));
}

#[tokio::test]
async fn test_overlong_post_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let text = "x".repeat(281);
    let stderr =
        run_cli_with_env_failure(&["post", &text], home.path(), &api_url(&server)).await;

    assert!(stderr.contains("280"));
}

#[tokio::test]
async fn test_like_updates_count() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/posts/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(1, 5, false)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/1/like/"))
        .and(header("authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"status": "liked"})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);
    login(&home, &api).await;

    let stdout = run_cli_with_env_success(&["--json", "like", "1"], home.path(), &api).await;
    let post: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(post["is_liked"], json!(true));
    assert_eq!(post["likes_count"], json!(6));
}

#[tokio::test]
async fn test_feed_loads_requested_pages() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let next = format!("{}/api/feed/?page=2", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/feed/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "next": next,
            "previous": null,
            "results": [post_json(1, 0, false), post_json(2, 0, false)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/feed/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "next": null,
            "previous": null,
            "results": [post_json(3, 0, false), post_json(4, 0, false)]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);
    login(&home, &api).await;

    let stdout =
        run_cli_with_env_success(&["--json", "feed", "--pages", "5"], home.path(), &api).await;
    let posts: Vec<Value> = serde_json::from_str(stdout.trim()).unwrap();
    let ids: Vec<u64> = posts.iter().map(|p| p["id"].as_u64().unwrap()).collect();

    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_edit_profile_refreshes_identity() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);
    login(&home, &api).await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "alice")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "alice2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .and(header("authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "alice2")))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_with_env_success(
        &["--json", "edit-profile", "--username", "alice2"],
        home.path(),
        &api,
    )
    .await;
    let user: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(user["username"], "alice2");
}

#[tokio::test]
async fn test_expired_token_is_forgotten() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);
    login(&home, &api).await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})))
        .mount(&server)
        .await;

    let stderr = run_cli_with_env_failure(&["whoami"], home.path(), &api).await;

    assert!(stderr.contains("Not logged in"));
    assert!(!home.path().join("data/chirp/token.json").exists());
}

#[tokio::test]
async fn test_unreadable_token_file_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, 0, false)])))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let api = api_url(&server);
    let token_file = home.path().join("data/chirp/token.json");
    std::fs::create_dir_all(token_file.parent().unwrap()).unwrap();
    std::fs::write(&token_file, "not json").unwrap();

    let stdout = run_cli_with_env_success(&["--json", "posts"], home.path(), &api).await;
    let posts: Vec<Value> = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(posts.len(), 1);
    assert!(!token_file.exists());
}
