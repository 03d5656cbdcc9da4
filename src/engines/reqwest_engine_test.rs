// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineError, FetchEngine, FetchRequest};
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";

async fn start_test_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>Test content</body></html>"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    server
}

fn request(url: String, timeout: Duration) -> FetchRequest {
    FetchRequest { url, timeout }
}

#[tokio::test]
async fn test_reqwest_engine_basic_fetch() {
    let server = start_test_server().await;
    let engine = ReqwestEngine::new(UA).unwrap();

    let response = engine
        .fetch(&request(format!("{}/test", server.uri()), Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert!(response.content.contains("Test content"));
}

#[tokio::test]
async fn test_reqwest_engine_returns_error_status() {
    let server = start_test_server().await;
    let engine = ReqwestEngine::new(UA).unwrap();

    let response = engine
        .fetch(&request(format!("{}/error", server.uri()), Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn test_reqwest_engine_timeout() {
    let server = start_test_server().await;
    let engine = ReqwestEngine::new(UA).unwrap();

    let result = engine
        .fetch(&request(format!("{}/slow", server.uri()), Duration::from_millis(300)))
        .await;

    match result {
        Err(EngineError::Timeout(d)) => assert_eq!(d, Duration::from_millis(300)),
        other => panic!("expected timeout, got {:?}", other.map(|r| r.status_code)),
    }
}

#[tokio::test]
async fn test_reqwest_engine_connection_refused() {
    let engine = ReqwestEngine::new(UA).unwrap();

    let result = engine
        .fetch(&request("http://127.0.0.1:9/nothing".to_string(), Duration::from_secs(2)))
        .await;

    assert!(matches!(result, Err(EngineError::Network(_))));
}

#[test]
fn test_reqwest_engine_name() {
    let engine = ReqwestEngine::new(UA).unwrap();
    assert_eq!(engine.name(), "reqwest");
}
