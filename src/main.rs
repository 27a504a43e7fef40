// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use secwatch::application::use_cases::poll_cycle::{AlertMode, CycleOptions, PollCycle};
use secwatch::config::settings::Settings;
use secwatch::domain::repositories::seen_state_repository::SeenStateRepository;
use secwatch::infrastructure::state::json_file_store::JsonFileSeenStore;
use secwatch::notify::telegram::TelegramNotifier;
use secwatch::notify::traits::NotificationChannel;
use secwatch::registry::client::SecHttpClient;
use secwatch::registry::submissions::RegistryClient;
use secwatch::utils::telemetry;
use secwatch::workers::poll_worker::PollWorker;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动轮询
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting secwatch...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Startup sanity warnings
    if settings.telegram.bot_token.is_empty() || settings.telegram.chat_id.is_empty() {
        warn!("Telegram bot token or chat id not set. Alerts will not be sent.");
    }
    if settings.user_agent_is_placeholder() {
        warn!("Set SECWATCH__SEC__USER_AGENT (SEC requires a descriptive User-Agent with contact).");
    }
    if settings.watchlist.is_empty() {
        warn!("Watchlist is empty; nothing to poll.");
    }

    // 4. Initialize components
    let http = Arc::new(SecHttpClient::new(
        &settings.sec.user_agent,
        Duration::from_millis(settings.sec.min_request_interval_ms),
    )?);
    let registry = Arc::new(RegistryClient::new(
        http,
        settings.sec.submissions_base.clone(),
        settings.sec.archives_base.clone(),
    ));
    let store: Arc<dyn SeenStateRepository> = Arc::new(JsonFileSeenStore::new(
        &settings.state.path,
        settings.state.max_seen_accessions,
    ));
    let channel: Arc<dyn NotificationChannel> = Arc::new(TelegramNotifier::new(
        settings.telegram.api_base.clone(),
        settings.telegram.bot_token.clone(),
        settings.telegram.chat_id.clone(),
    )?);

    let mode = if settings.alerting.digest_by_group {
        AlertMode::Digest
    } else {
        AlertMode::PerFiling
    };
    let cycle = Arc::new(PollCycle::new(
        registry,
        store,
        channel,
        settings.watchlist.clone(),
        CycleOptions {
            form_types: settings.alerting.form_types.clone(),
            max_filing_age_days: settings.alerting.max_filing_age_days,
            mode,
            max_per_cycle: settings.alerting.max_per_cycle,
            max_document_bytes: settings.sec.max_document_bytes,
        },
    ));
    let worker = PollWorker::new(cycle, Duration::from_secs(settings.poll.interval_minutes * 60));

    // 5. One-shot or continuous
    if settings.poll.run_once {
        info!("Running a single poll cycle (run_once mode)");
        if let Some(Err(e)) = worker.try_run_cycle().await {
            return Err(e.into());
        }
        return Ok(());
    }

    info!(
        "Started. Polling every {} minute(s). Ctrl+C to stop.",
        settings.poll.interval_minutes
    );
    tokio::select! {
        _ = worker.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopped by user.");
        }
    }

    Ok(())
}
