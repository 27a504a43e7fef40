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
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CIK_A: &str = "0000070858";
const CIK_B: &str = "0000019617";

fn options(mode: AlertMode) -> CycleOptions {
    CycleOptions {
        form_types: vec!["8-K".to_string(), "424B*".to_string()],
        max_filing_age_days: 7,
        mode,
        max_per_cycle: None,
        max_document_bytes: 65536,
    }
}

fn registry_for(server: &MockServer) -> Arc<RegistryClient> {
    let http = Arc::new(
        SecHttpClient::new("secwatch tests@example.com", Duration::from_millis(0)).unwrap(),
    );
    Arc::new(RegistryClient::new(
        http,
        server.uri(),
        format!("{}/Archives/edgar/data", server.uri()),
    ))
}

async fn mount_submissions(server: &MockServer, cik: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/CIK{}.json", cik)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn cycle_with(
    registry: Arc<RegistryClient>,
    store: Arc<InMemorySeenStore>,
    channel: Arc<MockChannel>,
    watchlist: Vec<Issuer>,
    mode: AlertMode,
) -> PollCycle {
    PollCycle::new(registry, store, channel, watchlist, options(mode))
}

#[tokio::test]
async fn test_no_duplicate_alerts_across_cycles() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[
            FilingRow::today("8-K", "0000070858-26-000010"),
            FilingRow::today("424B2", "0000070858-26-000011"),
        ],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::PerFiling,
    );

    let first = cycle.run().await.unwrap();
    assert_eq!(first.new_filings, 2);
    assert_eq!(first.messages_sent, 2);

    // Same submissions, same state: nothing new, nothing resent
    let second = cycle.run().await.unwrap();
    assert_eq!(second.filings_matched, 2);
    assert_eq!(second.new_filings, 0);
    assert_eq!(second.messages_sent, 0);
    assert_eq!(channel.sent_count(), 2);
}

#[tokio::test]
async fn test_failed_send_is_not_committed_and_retried() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[FilingRow::today("8-K", "0000070858-26-000010")],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::with_script(vec![true]));
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::PerFiling,
    );

    let first = cycle.run().await.unwrap();
    assert_eq!(first.messages_sent, 0);
    assert_eq!(first.messages_failed, 1);

    use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
    let state = store.load().await.unwrap();
    assert!(!state.contains("0000070858-26-000010"));

    // Next cycle: still new, delivered this time
    let second = cycle.run().await.unwrap();
    assert_eq!(second.new_filings, 1);
    assert_eq!(second.messages_sent, 1);
    assert!(store.load().await.unwrap().contains("0000070858-26-000010"));
}

#[tokio::test]
async fn test_per_item_commit_on_partial_failure() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[
            FilingRow::today("8-K", "0000070858-26-000010"),
            FilingRow::today("8-K", "0000070858-26-000011"),
        ],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    // First send succeeds, second fails
    let channel = Arc::new(MockChannel::with_script(vec![false, true]));
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::PerFiling,
    );

    let first = cycle.run().await.unwrap();
    assert_eq!(first.messages_sent, 1);
    assert_eq!(first.messages_failed, 1);

    use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
    let state = store.load().await.unwrap();
    assert!(state.contains("0000070858-26-000010"));
    assert!(!state.contains("0000070858-26-000011"));

    // Second cycle resends only the undelivered filing
    let second = cycle.run().await.unwrap();
    assert_eq!(second.new_filings, 1);
    assert_eq!(second.messages_sent, 1);
    assert_eq!(channel.sent_count(), 2);
}

#[tokio::test]
async fn test_digest_mode_sends_one_message_per_group() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "WELLS FARGO & COMPANY",
        &[
            FilingRow::today("424B2", "0000072971-26-000101"),
            FilingRow::today("424B2", "0000072971-26-000102"),
            FilingRow::today("424B2", "0000072971-26-000103"),
        ],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::Digest,
    );

    let report = cycle.run().await.unwrap();
    assert_eq!(report.new_filings, 3);
    assert_eq!(report.messages_sent, 1);

    let texts = channel.sent_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("3 filing(s)"));

    // All grouped accessions committed together
    use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
    let state = store.load().await.unwrap();
    assert!(state.contains("0000072971-26-000101"));
    assert!(state.contains("0000072971-26-000102"));
    assert!(state.contains("0000072971-26-000103"));
}

#[tokio::test]
async fn test_document_fetch_failure_degrades_to_metadata_label() {
    let server = MockServer::start().await;
    // The row names a primary document, but its URL is not mocked and 404s
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[FilingRow::today("424B2", "0000070858-26-000010").with_doc("pricing.htm")],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::PerFiling,
    );

    let report = cycle.run().await.unwrap();
    assert_eq!(report.messages_sent, 1);
    assert_eq!(report.messages_failed, 0);

    // The alert still carries a label, derived from metadata (424B form)
    let texts = channel.sent_texts();
    assert!(texts[0].contains("🏷 Offering (40%)"));
    use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
    assert!(store.load().await.unwrap().contains("0000070858-26-000010"));
}

#[tokio::test]
async fn test_document_text_drives_classification_label() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[FilingRow::today("8-K", "0000070858-26-000010").with_doc("item.htm")],
    );
    mount_submissions(&server, CIK_A, body).await;
    Mock::given(method("GET"))
        .and(path(
            "/Archives/edgar/data/70858/000007085826000010/item.htm",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><p>Notice of Redemption of all Series B shares. \
             The redemption date is March 15.</p></body></html>",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let cycle = cycle_with(
        registry_for(&server),
        store,
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        AlertMode::PerFiling,
    );

    let report = cycle.run().await.unwrap();
    assert_eq!(report.messages_sent, 1);

    let texts = channel.sent_texts();
    assert!(texts[0].contains("Redemption / Call"));
    // Document-text classification attaches an evidence snippet
    assert!(texts[0].contains("<i>"));
}

#[tokio::test]
async fn test_issuer_fetch_failure_is_isolated() {
    let server = MockServer::start().await;
    // Only issuer A is mocked; issuer B gets a 404 and fails fast
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[FilingRow::today("8-K", "0000070858-26-000010")],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let cycle = cycle_with(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A), Issuer::new(CIK_B)],
        AlertMode::PerFiling,
    );

    let report = cycle.run().await.unwrap();
    assert_eq!(report.issuers_polled, 2);
    assert_eq!(report.issuers_failed, 1);
    assert_eq!(report.messages_sent, 1);
    assert_eq!(channel.sent_count(), 1);
}

#[tokio::test]
async fn test_max_per_cycle_caps_sends_without_committing_overflow() {
    let server = MockServer::start().await;
    let body = submissions_body(
        "BANK OF AMERICA CORP",
        &[
            FilingRow::today("8-K", "0000070858-26-000010"),
            FilingRow::today("8-K", "0000070858-26-000011"),
            FilingRow::today("8-K", "0000070858-26-000012"),
        ],
    );
    mount_submissions(&server, CIK_A, body).await;

    let store = Arc::new(InMemorySeenStore::new());
    let channel = Arc::new(MockChannel::new());
    let mut opts = options(AlertMode::PerFiling);
    opts.max_per_cycle = Some(2);
    let cycle = PollCycle::new(
        registry_for(&server),
        store.clone(),
        channel.clone(),
        vec![Issuer::new(CIK_A)],
        opts,
    );

    let first = cycle.run().await.unwrap();
    assert_eq!(first.messages_sent, 2);

    // The overflow filing stays uncommitted and is delivered next cycle
    use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
    assert!(!store.load().await.unwrap().contains("0000070858-26-000012"));

    let second = cycle.run().await.unwrap();
    assert_eq!(second.new_filings, 1);
    assert_eq!(second.messages_sent, 1);
}
