//! CLI tests against a mock employee API.
//!
//! Each test starts a wiremock server, points the binary at it through
//! `COVERFLEX_BASE_URL`, and keeps tokens in a throwaway directory.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{read_tokens, run_cli, run_cli_failure, run_cli_success, seed_tokens, token_file};

fn api_url(server: &MockServer) -> String {
    format!("{}/api/employee", server.uri())
}

fn cards_body() -> serde_json::Value {
    json!({"cards": [{"id": "card-1", "pan_last_digits": "4242", "status": "active"}]})
}

#[tokio::test]
async fn test_status_without_session() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    let stdout = run_cli_success(&["auth", "status"], temp.path(), &api_url(&server)).await;

    assert!(stdout.contains("not logged in"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resource_without_session_suggests_login() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    let stderr = run_cli_failure(&["cards"], temp.path(), &api_url(&server)).await;

    assert!(stderr.contains("auth login"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_without_otp_prints_phone_hint() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions"))
        .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "phone_last_digits": "1234"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["auth", "login", "--email", "a@b.com", "--password", "pw"],
        temp.path(),
        &api_url(&server),
    )
    .await;

    assert!(stdout.contains("1234"));
    assert!(!token_file(temp.path()).exists());
}

#[tokio::test]
async fn test_login_with_otp_persists_tokens() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "T",
            "refresh_token": "R"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions/trust-user-agent"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "T2",
            "refresh_token": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "auth", "login", "--email", "a@b.com", "--password", "pw", "--otp", "123456",
        ],
        temp.path(),
        &api_url(&server),
    )
    .await;

    assert!(stdout.contains("Logged in successfully"));
    let tokens = read_tokens(temp.path());
    assert_eq!(tokens["access_token"], "T2");
    assert_eq!(tokens["refresh_token"], "R2");

    let status = run_cli_success(&["auth", "status"], temp.path(), &api_url(&server)).await;
    assert!(status.contains("logged in"));
    assert!(!status.contains("not logged in"));
}

#[tokio::test]
async fn test_login_refused_when_already_logged_in() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "T", "R");

    let stderr = run_cli_failure(
        &["auth", "login", "--email", "a@b.com", "--password", "pw"],
        temp.path(),
        &api_url(&server),
    )
    .await;

    assert!(stderr.contains("Already logged in"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = run_cli(
        &["auth", "login", "--email", "a@b.com", "--password", "nope"],
        temp.path(),
        &api_url(&server),
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid credentials"));
}

#[tokio::test]
async fn test_cards_prints_json() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "T", "R");

    Mock::given(method("GET"))
        .and(path("/api/employee/cards"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cards_body()))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["cards", "--compact"], temp.path(), &api_url(&server)).await;

    assert_eq!(stdout.lines().count(), 1);
    let cards: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(cards[0]["id"], "card-1");
    assert_eq!(cards[0]["pan_last_digits"], "4242");
}

#[tokio::test]
async fn test_expired_session_is_refreshed_and_saved() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "old", "old-refresh");

    Mock::given(method("GET"))
        .and(path("/api/employee/cards"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions/renew"))
        .and(header("authorization", "Bearer old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"access_token": "new", "refresh_token": "new-refresh"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/employee/cards"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cards_body()))
        .expect(1)
        .mount(&server)
        .await;

    run_cli_success(&["cards"], temp.path(), &api_url(&server)).await;

    let tokens = read_tokens(temp.path());
    assert_eq!(tokens["access_token"], "new");
    assert_eq!(tokens["refresh_token"], "new-refresh");
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "old", "old-refresh");

    Mock::given(method("GET"))
        .and(path("/api/employee/family"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions/renew"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let stderr = run_cli_failure(&["family"], temp.path(), &api_url(&server)).await;

    assert!(stderr.contains("auth login"));
    assert!(!token_file(temp.path()).exists());
}

#[tokio::test]
async fn test_operations_forwards_query_flags() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "T", "R");

    Mock::given(method("GET"))
        .and(path("/api/employee/operations"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("filters[type]", "topup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operations": {"list": [{"id": "op-1", "type": "topup"}], "current_page": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["operations", "--page", "2", "--per-page", "10", "--type", "topup"],
        temp.path(),
        &api_url(&server),
    )
    .await;

    let page: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(page["current_page"], 2);
    assert_eq!(page["list"][0]["type"], "topup");
}

#[tokio::test]
async fn test_logout_removes_token_file() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "T", "R");

    let stdout = run_cli_success(&["auth", "logout"], temp.path(), &api_url(&server)).await;

    assert!(stdout.contains("Logged out"));
    assert!(!token_file(temp.path()).exists());
}

#[tokio::test]
async fn test_refresh_command_rotates_tokens() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();
    seed_tokens(temp.path(), "T", "R");

    Mock::given(method("POST"))
        .and(path("/api/employee/sessions/renew"))
        .and(header("authorization", "Bearer R"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"access_token": "T2", "refresh_token": "R2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    run_cli_success(&["auth", "refresh"], temp.path(), &api_url(&server)).await;

    assert_eq!(read_tokens(temp.path())["access_token"], "T2");
}

#[tokio::test]
async fn test_verbose_logs_token_store_on_stderr() {
    let server = MockServer::start().await;
    let temp = tempfile::tempdir().unwrap();

    let output = run_cli(&["-vv", "auth", "status"], temp.path(), &api_url(&server)).await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stderr.contains("Opening token store"));
    assert!(!stdout.contains("Opening token store"));
}
