// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{submissions_body, FilingRow, MockChannel};
use secwatch::application::use_cases::poll_cycle::{AlertMode, CycleOptions, PollCycle};
use secwatch::domain::models::filing::Issuer;
use secwatch::infrastructure::state::memory_store::InMemorySeenStore;
use secwatch::registry::client::SecHttpClient;
use secwatch::registry::submissions::RegistryClient;
use secwatch::workers::poll_worker::PollWorker;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn slow_cycle(server: &MockServer) -> Arc<PollCycle> {
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[FilingRow::today("8-K", "0000070858-26-000010")],
    );
    Mock::given(method("GET"))
        .and(path("/CIK0000070858.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(300)),
        )
        .mount(server)
        .await;

    let http = Arc::new(
        SecHttpClient::new("secwatch tests@example.com", Duration::from_millis(0)).unwrap(),
    );
    let registry = Arc::new(RegistryClient::new(
        http,
        server.uri(),
        format!("{}/Archives/edgar/data", server.uri()),
    ));
    Arc::new(PollCycle::new(
        registry,
        Arc::new(InMemorySeenStore::new()),
        Arc::new(MockChannel::new()),
        vec![Issuer::new("70858")],
        CycleOptions {
            form_types: vec!["8-K".to_string()],
            max_filing_age_days: 7,
            mode: AlertMode::PerFiling,
            max_per_cycle: None,
            max_document_bytes: 65536,
        },
    ))
}

#[tokio::test]
async fn test_overlapping_cycle_is_skipped() {
    let server = MockServer::start().await;
    let worker = Arc::new(PollWorker::new(
        slow_cycle(&server).await,
        Duration::from_secs(60),
    ));

    // The registry stalls the first cycle, so the second attempt overlaps it
    let (first, second) = tokio::join!(worker.try_run_cycle(), worker.try_run_cycle());

    let outcomes = [first, second];
    let ran: Vec<_> = outcomes.iter().filter(|o| o.is_some()).collect();
    assert_eq!(ran.len(), 1, "exactly one overlapping cycle may run");
    assert!(ran[0].as_ref().unwrap().is_ok());
}

#[tokio::test]
async fn test_cycle_can_run_again_after_completion() {
    let server = MockServer::start().await;
    let worker = PollWorker::new(slow_cycle(&server).await, Duration::from_secs(60));

    let first = worker.try_run_cycle().await;
    assert!(first.is_some());

    // The in-flight guard is released once the cycle finishes
    let second = worker.try_run_cycle().await;
    assert!(second.is_some());
}
