//! Integration tests for the `status` and `setup` commands.
//!
//! Tests cover:
//! - Status exit result for empty, missing and present models
//! - Status does not send a prompt unless the model is present
//! - Setup giving up after its attempts run out
//! - Setup succeeding against a live daemon

use ollama_sentinel::cli::commands::setup::run_setup;
use ollama_sentinel::cli::commands::status::run_status;
use ollama_sentinel::services::ollama::OllamaClient;
use std::time::Duration;

const PROMPT: &str = "What is the capital of France?";

fn client_for(server: &mockito::Server) -> OllamaClient {
    OllamaClient::with_timeout(&format!("{}/api", server.url()), Duration::from_secs(5)).unwrap()
}

async fn daemon_with_tags(body: &str) -> mockito::ServerGuard {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(body)
        .expect_at_least(1)
        .create_async()
        .await;
    server
}

// ========== STATUS TESTS ==========

#[tokio::test]
async fn test_status_empty_model_list_fails() {
    let mut server = daemon_with_tags(r#"{"models":[]}"#).await;
    let generate = server
        .mock("POST", "/api/generate")
        .expect(0)
        .create_async()
        .await;

    assert!(!run_status(&client_for(&server), "mistral", PROMPT).await);
    generate.assert_async().await;
}

#[tokio::test]
async fn test_status_missing_model_fails() {
    let mut server = daemon_with_tags(r#"{"models":[{"name":"llama3","size":1}]}"#).await;
    let generate = server
        .mock("POST", "/api/generate")
        .expect(0)
        .create_async()
        .await;

    assert!(!run_status(&client_for(&server), "mistral", PROMPT).await);
    generate.assert_async().await;
}

#[tokio::test]
async fn test_status_present_model_succeeds() {
    let mut server = daemon_with_tags(r#"{"models":[{"name":"mistral","size":123}]}"#).await;
    let generate = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"response":"Paris."}"#)
        .create_async()
        .await;

    assert!(run_status(&client_for(&server), "mistral", PROMPT).await);
    generate.assert_async().await;
}

#[tokio::test]
async fn test_status_failed_prompt_still_succeeds() {
    let mut server = daemon_with_tags(r#"{"models":[{"name":"mistral","size":123}]}"#).await;
    server
        .mock("POST", "/api/generate")
        .with_status(500)
        .create_async()
        .await;

    assert!(run_status(&client_for(&server), "mistral", PROMPT).await);
}

#[tokio::test]
async fn test_status_unreachable_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tags")
        .with_status(503)
        .create_async()
        .await;

    assert!(!run_status(&client_for(&server), "mistral", PROMPT).await);
}

// ========== SETUP TESTS ==========

#[tokio::test]
async fn test_setup_gives_up_after_attempts() {
    // Grab a free port, then close it so nothing listens there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        OllamaClient::with_timeout(&format!("http://127.0.0.1:{}/api", port), Duration::from_secs(2))
            .unwrap();

    assert!(!run_setup(&client, "mistral", 2, Duration::from_millis(10)).await);
}

#[tokio::test]
async fn test_setup_ready_daemon_succeeds() {
    let server = daemon_with_tags(r#"{"models":[{"name":"mistral","size":123}]}"#).await;

    assert!(run_setup(&client_for(&server), "mistral", 3, Duration::from_millis(10)).await);
}

#[tokio::test]
async fn test_setup_missing_model_still_succeeds() {
    let server = daemon_with_tags(r#"{"models":[{"name":"llama3","size":1}]}"#).await;

    assert!(run_setup(&client_for(&server), "mistral", 1, Duration::from_millis(10)).await);
}
