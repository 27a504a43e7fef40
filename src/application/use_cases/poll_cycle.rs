// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::event::{Classification, ClassificationBasis};
use crate::domain::models::filing::{FilingRecord, Issuer};
use crate::domain::models::seen_state::SeenState;
use crate::domain::repositories::seen_state_repository::SeenStateRepository;
use crate::domain::services::digest_grouper::group_by_issuer_form_date;
use crate::domain::services::event_classifier::{classify_metadata, classify_text, phrases_for};
use crate::domain::services::evidence_snippets::{extract_snippets, SnippetConfig};
use crate::domain::services::novelty_detector;
use crate::domain::services::relevance_filter::filter_filings;
use crate::notify::message::{build_feedback_keyboard, render_digest_message, render_filing_message};
use crate::notify::traits::{NotificationChannel, OutboundMessage};
use crate::registry::submissions::RegistryClient;
use crate::utils::errors::CycleError;
use crate::utils::text_extract::extract_text;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

/// 告警模式
///
/// 每个周期选定一次的策略：逐条模式才做逐备案分类，
/// 摘要模式合并消息并跳过分类，两者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMode {
    /// 每条新备案一条消息，附分类标签与反馈按钮
    PerFiling,
    /// 每个 (发行人, 表单, 日期) 组一条摘要消息
    Digest,
}

/// 周期运行选项
#[derive(Debug, Clone)]
pub struct CycleOptions {
    /// 表单类型允许清单
    pub form_types: Vec<String>,
    /// 备案最大年龄（天）
    pub max_filing_age_days: u32,
    /// 告警模式
    pub mode: AlertMode,
    /// 每周期最多发送的消息数
    pub max_per_cycle: Option<usize>,
    /// 主文档读取上限（字节）
    pub max_document_bytes: usize,
}

/// 单个周期的运行汇总
#[derive(Debug, Default, Clone)]
pub struct CycleReport {
    /// 轮询的发行人数
    pub issuers_polled: usize,
    /// 抓取失败的发行人数
    pub issuers_failed: usize,
    /// 过滤后命中的备案数
    pub filings_matched: usize,
    /// 其中未告警过的备案数
    pub new_filings: usize,
    /// 成功发送的消息数
    pub messages_sent: usize,
    /// 发送失败的消息数
    pub messages_failed: usize,
}

/// 轮询周期用例（管线驱动器）
///
/// 一次run = 一个完整周期：逐发行人抓取（由客户端节流串行化）、
/// 过滤、新颖性划分、按模式分类或分组、发送、提交已见状态。
///
/// 提交粒度为逐条：每条消息的投递落定后立即持久化其受理号，
/// 投递与提交之间崩溃时最多重复该单条告警，绝不丢失告警。
/// 发行人级与消息级失败被隔离并记录；只有状态存储失败中止周期
pub struct PollCycle {
    registry: Arc<RegistryClient>,
    store: Arc<dyn SeenStateRepository>,
    channel: Arc<dyn NotificationChannel>,
    watchlist: Vec<Issuer>,
    options: CycleOptions,
}

impl PollCycle {
    pub fn new(
        registry: Arc<RegistryClient>,
        store: Arc<dyn SeenStateRepository>,
        channel: Arc<dyn NotificationChannel>,
        watchlist: Vec<Issuer>,
        options: CycleOptions,
    ) -> Self {
        Self {
            registry,
            store,
            channel,
            watchlist,
            options,
        }
    }

    /// 执行一个轮询周期
    pub async fn run(&self) -> Result<CycleReport, CycleError> {
        counter!("poll_cycles_total").increment(1);
        let mut report = CycleReport::default();

        // 周期开始时加载一次；它是本周期新颖性判定的唯一依据
        let mut seen = self.store.load().await?;
        info!(
            "Cycle started: {} issuer(s) watched, {} accession(s) already seen",
            self.watchlist.len(),
            seen.len()
        );

        let mut fetched: Vec<FilingRecord> = Vec::new();
        for issuer in &self.watchlist {
            report.issuers_polled += 1;
            match self.registry.fetch_issuer_filings(issuer).await {
                Ok(filings) => fetched.extend(filings),
                Err(e) => {
                    // 该发行人本周期视为无新数据，不得标记任何备案为已见
                    warn!("Fetch failed for CIK {}: {}", issuer.cik, e);
                    report.issuers_failed += 1;
                }
            }
        }

        let today = Utc::now().date_naive();
        let matched = filter_filings(
            fetched,
            &self.options.form_types,
            self.options.max_filing_age_days,
            today,
        );
        report.filings_matched = matched.len();

        let partition = novelty_detector::partition(matched, &seen);
        report.new_filings = partition.new.len();
        info!(
            "Got {} filing(s) after filter, {} new",
            report.filings_matched, report.new_filings
        );

        if partition.new.is_empty() {
            return Ok(report);
        }

        match self.options.mode {
            AlertMode::Digest => {
                self.send_digests(partition.new, &mut seen, &mut report).await?
            }
            AlertMode::PerFiling => {
                self.send_filing_alerts(partition.new, &mut seen, &mut report).await?
            }
        }

        Ok(report)
    }

    /// 摘要模式：每组一条消息，组内受理号在发送成功后一并提交
    async fn send_digests(
        &self,
        new_filings: Vec<FilingRecord>,
        seen: &mut SeenState,
        report: &mut CycleReport,
    ) -> Result<(), CycleError> {
        let mut groups = group_by_issuer_form_date(new_filings);
        if let Some(cap) = self.options.max_per_cycle {
            groups.truncate(cap);
        }

        for group in groups {
            let message = OutboundMessage {
                text: render_digest_message(&group),
                keyboard: None,
            };
            match self.channel.send(&message).await {
                Ok(()) => {
                    for filing in &group.filings {
                        seen.insert(filing.accession_number.clone());
                    }
                    self.store.persist(seen).await?;
                    counter!("alerts_sent_total").increment(1);
                    report.messages_sent += 1;
                    info!(
                        "Digest sent: {} {} ({} filing(s))",
                        group.key.cik,
                        group.key.form_type,
                        group.count()
                    );
                }
                Err(e) => {
                    // 未提交，下个周期重试整组
                    warn!(
                        "Failed to send digest for {} {}: {}",
                        group.key.cik, group.key.form_type, e
                    );
                    report.messages_failed += 1;
                }
            }
        }
        Ok(())
    }

    /// 逐条模式：分类、渲染、发送，每条成功后立即提交
    async fn send_filing_alerts(
        &self,
        mut new_filings: Vec<FilingRecord>,
        seen: &mut SeenState,
        report: &mut CycleReport,
    ) -> Result<(), CycleError> {
        if let Some(cap) = self.options.max_per_cycle {
            new_filings.truncate(cap);
        }

        for filing in new_filings {
            let classification = self.classify(&filing).await;
            let keyboard = build_feedback_keyboard(&filing.accession_number, &classification);
            let message = OutboundMessage {
                text: render_filing_message(&filing, Some(&classification)),
                keyboard: (!keyboard.inline_keyboard.is_empty()).then_some(keyboard),
            };

            match self.channel.send(&message).await {
                Ok(()) => {
                    seen.insert(filing.accession_number.clone());
                    self.store.persist(seen).await?;
                    counter!("alerts_sent_total").increment(1);
                    report.messages_sent += 1;
                    info!("Alert sent: {} {}", filing.company_name, filing.form_type);
                }
                Err(e) => {
                    warn!("Failed to send alert for {}: {}", filing.accession_number, e);
                    report.messages_failed += 1;
                }
            }
        }
        Ok(())
    }

    /// 对单条备案分类
    ///
    /// 永不失败：文档不可得或正文为空时降级为元数据分类，
    /// 标签只是附在消息上的提示，从不阻断投递
    async fn classify(&self, filing: &FilingRecord) -> Classification {
        let Some(url) = &filing.primary_doc_url else {
            return classify_metadata(filing);
        };

        let bytes = match self
            .registry
            .fetch_document(url, self.options.max_document_bytes)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Fetch/classify failed for {}: {}", filing.accession_number, e);
                return classify_metadata(filing);
            }
        };

        let text = extract_text(&bytes, url);
        if text.is_empty() {
            return classify_metadata(filing);
        }

        let (event_type, confidence) = classify_text(&text);
        let evidence = extract_snippets(&text, phrases_for(event_type), &SnippetConfig::default());
        Classification {
            event_type,
            confidence,
            basis: ClassificationBasis::DocumentText,
            evidence,
        }
    }
}
