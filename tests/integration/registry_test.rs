// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{submissions_body, FilingRow};
use secwatch::domain::models::filing::Issuer;
use secwatch::registry::client::{RegistryError, SecHttpClient};
use secwatch::registry::submissions::RegistryClient;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "secwatch tests@example.com";

fn client_for(server: &MockServer) -> RegistryClient {
    let http = Arc::new(SecHttpClient::new(USER_AGENT, Duration::from_millis(0)).unwrap());
    RegistryClient::new(
        http,
        server.uri(),
        format!("{}/Archives/edgar/data", server.uri()),
    )
}

#[tokio::test]
async fn test_fetch_issuer_filings_end_to_end() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[
            FilingRow::today("8-K", "0000070858-26-000010"),
            FilingRow::today("10-Q", "0000070858-26-000011"),
        ],
    );

    // Every request must carry the identifying User-Agent
    Mock::given(method("GET"))
        .and(path("/CIK0000070858.json"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let registry = client_for(&server);
    let issuer = Issuer::new("70858");
    let records = registry.fetch_issuer_filings(&issuer).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cik, "0000070858");
    assert_eq!(records[0].form_type, "8-K");
    assert_eq!(records[0].company_name, "BANK OF AMERICA CORP");
    assert!(records[0]
        .index_url
        .contains("/70858/000007085826000010/0000070858-26-000010-index.htm"));
}

#[tokio::test]
async fn test_fetch_issuer_filings_malformed_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/CIK0000070858.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let registry = client_for(&server);
    let err = registry
        .fetch_issuer_filings(&Issuer::new("70858"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_document_respects_byte_cap() {
    let server = MockServer::start().await;
    let big = "x".repeat(10_000);
    Mock::given(method("GET"))
        .and(path("/doc.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(big))
        .mount(&server)
        .await;

    let registry = client_for(&server);
    let bytes = registry
        .fetch_document(&format!("{}/doc.htm", server.uri()), 2048)
        .await
        .unwrap();
    assert!(bytes.len() <= 2048);
}
