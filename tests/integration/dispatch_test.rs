// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{dispatcher, dispatcher_with, html, mount_page, PRODUCT_PAGE};
use sku_harvester::config::settings::Settings;
use sku_harvester::domain::models::product::{
    ExtractionRequest, ExtractionStatus, ImageType, NOT_AVAILABLE,
};
use std::time::Duration;
use wiremock::MockServer;

#[tokio::test]
async fn test_dispatch_extracts_product_from_http_site() {
    let server = MockServer::start().await;
    mount_page(&server, "/cylinder", html(200, PRODUCT_PAGE)).await;

    let dispatcher = dispatcher();
    let request = ExtractionRequest::new(
        "MAT-1",
        "Industry Buying",
        format!("{}/cylinder", server.uri()),
    );
    let outcome = dispatcher.dispatch(&request).await;
    dispatcher.close().await.unwrap();

    let result = &outcome.result;
    assert_eq!(result.status, ExtractionStatus::Success);
    assert_eq!(result.product_name, "Pneumatic Cylinder CDQ2B32-50D");
    assert_eq!(result.price, "Rs. 2,850");
    assert_eq!(result.brand, "SMC");
    assert_eq!(result.sku, NOT_AVAILABLE);
    assert!(result.error_reason.is_empty());

    assert_eq!(outcome.specifications.len(), 2);
    assert_eq!(outcome.specifications[0].spec_name, "Bore Size");
    assert_eq!(outcome.specifications[0].spec_value, "32 mm");

    assert_eq!(outcome.images.len(), 2);
    assert_eq!(outcome.images[0].image_url, "https://static.industrybuying.com/cyl-1.jpg");
    assert_eq!(outcome.images[0].image_type, ImageType::Main);
    assert_eq!(outcome.images[1].image_url, "https://www.industrybuying.com/img/cyl-2.jpg");
    assert_eq!(outcome.images[1].image_type, ImageType::Thumbnail);
    assert_eq!(outcome.images[1].image_order, 2);
}

#[tokio::test]
async fn test_dispatch_unknown_site_never_fetches() {
    let server = MockServer::start().await;

    let dispatcher = dispatcher();
    let request = ExtractionRequest::new("MAT-2", "Unknown Store", server.uri());
    let outcome = dispatcher.dispatch(&request).await;

    assert_eq!(outcome.result.status, ExtractionStatus::Failed);
    assert!(outcome.result.error_reason.contains("not supported"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_dispatch_detects_captcha_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/blocked",
        html(200, "<html><body><p>Our systems have detected unusual traffic from your network.</p></body></html>"),
    )
    .await;

    let outcome = dispatcher()
        .dispatch(&ExtractionRequest::new(
            "MAT-3",
            "Moglix",
            format!("{}/blocked", server.uri()),
        ))
        .await;

    assert_eq!(outcome.result.status, ExtractionStatus::Failed);
    assert!(outcome.result.error_reason.contains("anti-bot"));
    assert!(outcome.result.error_reason.contains("unusual traffic"));
}

#[tokio::test]
async fn test_dispatch_server_error_is_failed() {
    let server = MockServer::start().await;
    mount_page(&server, "/gone", html(503, "<h1>Service Unavailable</h1>")).await;

    let outcome = dispatcher()
        .dispatch(&ExtractionRequest::new(
            "MAT-4",
            "IndiaMART",
            format!("{}/gone", server.uri()),
        ))
        .await;

    assert_eq!(outcome.result.status, ExtractionStatus::Failed);
    assert!(outcome.result.error_reason.contains("HTTP 503"));
    assert_eq!(outcome.result.product_name, NOT_AVAILABLE);
}

#[tokio::test]
async fn test_dispatch_timeout_is_failed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/slow",
        html(200, PRODUCT_PAGE).set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut settings = Settings::default();
    settings.http.timeout_secs = 1;
    let outcome = dispatcher_with(settings)
        .dispatch(&ExtractionRequest::new(
            "MAT-5",
            "Industry Buying",
            format!("{}/slow", server.uri()),
        ))
        .await;

    assert_eq!(outcome.result.status, ExtractionStatus::Failed);
    assert!(outcome.result.error_reason.contains("timed out"));
    assert!(outcome.specifications.is_empty());
    assert!(outcome.images.is_empty());
}
