// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{dispatcher, html, mount_page, PRODUCT_PAGE};
use sku_harvester::application::batch::BatchRunner;
use sku_harvester::domain::models::product::ExtractionStatus;
use sku_harvester::infrastructure::{export, input};
use std::io::Write;
use std::time::Duration;
use wiremock::MockServer;

#[tokio::test]
async fn test_csv_to_tables_pipeline() {
    let server = MockServer::start().await;
    mount_page(&server, "/cylinder", html(200, PRODUCT_PAGE)).await;
    mount_page(&server, "/spanner", html(200, "<html><body><h1>Spanner Set</h1></body></html>")).await;

    let workdir = tempfile::tempdir().unwrap();
    let input_path = workdir.path().join("input.csv");
    {
        let mut file = std::fs::File::create(&input_path).unwrap();
        writeln!(file, "materialId,Source,Product URL,Comment").unwrap();
        writeln!(file, "M-1,Industry Buying,{}/cylinder,ok", server.uri()).unwrap();
        writeln!(file, "M-2,Unknown Store,{}/cylinder,skip", server.uri()).unwrap();
        writeln!(file, "M-3,Moglix,{}/spanner,", server.uri()).unwrap();
    }

    let requests = input::read_requests(&input_path).unwrap();
    assert_eq!(requests.len(), 3);

    let aggregator = BatchRunner::new(dispatcher(), Duration::from_millis(10))
        .run(&requests)
        .await;

    let summary = aggregator.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.success, 1);
    assert_eq!(summary.partial, 1);
    assert_eq!(summary.failed, 1);

    let tables = aggregator.into_tables();
    let ids: Vec<&str> = tables.results.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["M-1", "M-2", "M-3"]);
    assert_eq!(tables.results[1].status, ExtractionStatus::Failed);
    assert!(tables.specifications.iter().all(|s| s.identifier == "M-1"));
    assert_eq!(tables.images.len(), 2);

    let output = workdir.path().join("output");
    export::write_csv_tables(&output, &tables).unwrap();
    export::write_json(output.join("results.json"), &tables).unwrap();

    let mut reader = csv::Reader::from_path(output.join(export::RESULTS_FILE)).unwrap();
    assert_eq!(reader.records().count(), 3);

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(output.join("results.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["specifications"].as_array().unwrap().len(), 2);
    assert_eq!(json["results"][2]["status"], "Partial");
}
