// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 通知通道错误类型
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 传输层失败
    #[error("send failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("unexpected status {0}")]
    Status(u16),
    /// 通道明确拒绝消息
    #[error("channel rejected message: {0}")]
    Rejected(String),
    /// 通道未配置（缺少令牌或会话标识）
    #[error("channel not configured")]
    NotConfigured,
}

impl NotifyError {
    /// 判断错误是否可重试
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Transport(e) => e.is_timeout() || e.is_connect(),
            NotifyError::Status(code) => *code >= 500 || *code == 429,
            NotifyError::Rejected(_) => false,
            NotifyError::NotConfigured => false,
        }
    }
}

/// 内联按钮
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// 内联键盘：按行排列的响应按钮
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

/// 出站通知消息
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// 渲染后的消息正文（HTML标记）
    pub text: String,
    /// 响应按钮；仅逐条告警模式附带
    pub keyboard: Option<InlineKeyboard>,
}

/// 通知通道特质
///
/// 每次调用发送一条告警或摘要；投递结果由调用方记录，
/// 失败的消息不会被提交进已见状态，下个周期重试
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// 发送一条消息
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;

    /// 通道名称
    fn name(&self) -> &'static str;
}
