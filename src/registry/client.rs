// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::retry_policy::RetryPolicy;
use reqwest::header;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// 节流间隔的上限；429触发的升档不会超过它
const MAX_PACING_INTERVAL: Duration = Duration::from_secs(5);

/// 注册机构客户端错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 网络层失败
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("unexpected status {0}")]
    Status(u16),
    /// 注册机构限流（429）
    #[error("rate limited by registry")]
    RateLimited,
    /// 响应结构不符合预期
    #[error("malformed submissions response: {0}")]
    Malformed(String),
}

impl RegistryError {
    /// 判断错误是否可重试
    pub fn is_retryable(&self) -> bool {
        match self {
            RegistryError::Transport(e) => e.is_timeout() || e.is_connect(),
            RegistryError::Status(code) => *code >= 500,
            RegistryError::RateLimited => true,
            RegistryError::Malformed(_) => false,
        }
    }
}

/// 节流状态
struct Pacing {
    /// 当前请求间隔；429会将其升档
    current_interval: Duration,
    /// 上一次请求发出的时刻
    last_request: Option<Instant>,
}

/// SEC HTTP客户端
///
/// 所有出站请求携带标识身份的User-Agent；请求间强制最小间隔，
/// 使聚合速率稳定低于注册机构公布的上限。429/5xx/超时按策略
/// 指数退避重试，429同时上调后续所有请求的节流间隔
pub struct SecHttpClient {
    client: reqwest::Client,
    pacing: Mutex<Pacing>,
    retry: RetryPolicy,
}

impl SecHttpClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `user_agent` - 标识身份的UA字符串（名称+联系方式）
    /// * `min_interval` - 请求之间的最小间隔
    pub fn new(user_agent: &str, min_interval: Duration) -> Result<Self, RegistryError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| header::HeaderValue::from_static("secwatch/0.1.0")),
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            pacing: Mutex::new(Pacing {
                current_interval: min_interval,
                last_request: None,
            }),
            retry: RetryPolicy::registry(),
        })
    }

    /// GET并返回完整响应体
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
        self.get_inner(url, None).await
    }

    /// GET并返回至多max_bytes字节（分类只需读取文档的有界前缀）
    pub async fn get_bytes_capped(&self, url: &str, max_bytes: usize) -> Result<Vec<u8>, RegistryError> {
        self.get_inner(url, Some(max_bytes)).await
    }

    async fn get_inner(&self, url: &str, cap: Option<usize>) -> Result<Vec<u8>, RegistryError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            self.throttle().await;

            match self.try_get(url, cap).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    if matches!(e, RegistryError::RateLimited) {
                        self.raise_pacing().await;
                    }
                    if e.is_retryable() && self.retry.should_retry(attempt) {
                        let backoff = self.retry.calculate_backoff(attempt);
                        warn!(
                            "Registry request failed (attempt {}), retrying in {:?}: {}",
                            attempt, backoff, e
                        );
                        sleep(backoff).await;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn try_get(&self, url: &str, cap: Option<usize>) -> Result<Vec<u8>, RegistryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(RegistryError::RateLimited);
        }
        if !status.is_success() {
            return Err(RegistryError::Status(status.as_u16()));
        }

        match cap {
            None => Ok(response.bytes().await?.to_vec()),
            Some(max_bytes) => {
                let mut body: Vec<u8> = Vec::new();
                let mut response = response;
                while let Some(chunk) = response.chunk().await? {
                    let remaining = max_bytes.saturating_sub(body.len());
                    if remaining == 0 {
                        debug!("Document read capped at {} bytes for {}", max_bytes, url);
                        break;
                    }
                    body.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
                }
                Ok(body)
            }
        }
    }

    /// 强制请求间隔；持锁等待以保证出站请求严格串行
    async fn throttle(&self) {
        let mut pacing = self.pacing.lock().await;
        if let Some(last) = pacing.last_request {
            let elapsed = last.elapsed();
            if elapsed < pacing.current_interval {
                sleep(pacing.current_interval - elapsed).await;
            }
        }
        pacing.last_request = Some(Instant::now());
    }

    /// 429后上调节流间隔，对本进程后续所有请求生效
    async fn raise_pacing(&self) {
        let mut pacing = self.pacing.lock().await;
        let raised = (pacing.current_interval * 2).min(MAX_PACING_INTERVAL);
        if raised > pacing.current_interval {
            info!(
                "Registry throttling detected, raising pacing interval {:?} -> {:?}",
                pacing.current_interval, raised
            );
            pacing.current_interval = raised;
        }
    }

    #[cfg(test)]
    pub(crate) async fn current_pacing_interval(&self) -> Duration {
        self.pacing.lock().await.current_interval
    }
}
