// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::notify::traits::{NotificationChannel, NotifyError, OutboundMessage};
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Telegram应答体
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram通知器
///
/// 通过Bot API的sendMessage投递告警；HTML解析模式，关闭链接预览。
/// 瞬时传输失败按策略有界重试，永久失败交由调用方处理
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    retry: RetryPolicy,
}

impl TelegramNotifier {
    pub fn new(api_base: String, bot_token: String, chat_id: String) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_base,
            bot_token,
            chat_id,
            retry: RetryPolicy::notifier(),
        })
    }

    /// 令牌与会话标识是否齐备
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    async fn try_send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let mut payload = json!({
            "chat_id": self.chat_id,
            "text": message.text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        if let Some(keyboard) = &message.keyboard {
            payload["reply_markup"] = serde_json::to_value(keyboard)
                .map_err(|e| NotifyError::Rejected(e.to_string()))?;
        }

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Rejected(e.to_string()))?;
        if !body.ok {
            return Err(NotifyError::Rejected(
                body.description.unwrap_or_else(|| "unknown".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for TelegramNotifier {
    /// 发送一条消息，瞬时失败有界重试
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        if !self.is_configured() {
            return Err(NotifyError::NotConfigured);
        }

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.try_send(message).await {
                Ok(()) => {
                    counter!("notify_delivery_success_total").increment(1);
                    return Ok(());
                }
                Err(e) => {
                    if e.is_retryable() && self.retry.should_retry(attempt) {
                        let backoff = self.retry.calculate_backoff(attempt);
                        warn!(
                            "Telegram send failed (attempt {}), retrying in {:?}: {}",
                            attempt, backoff, e
                        );
                        sleep(backoff).await;
                        continue;
                    }
                    counter!("notify_delivery_failed_total").increment(1);
                    return Err(e);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
