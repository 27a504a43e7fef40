// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::event::EventType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 人工反馈结论
///
/// 对应告警消息上的三个固定按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    /// 标签正确
    Confirmed,
    /// 标签错误
    Wrong,
    /// 与监控无关
    NotRelevant,
}

impl FeedbackVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackVerdict::Confirmed => "confirmed",
            FeedbackVerdict::Wrong => "wrong",
            FeedbackVerdict::NotRelevant => "not_relevant",
        }
    }
}

/// 反馈记录
///
/// 按受理号与原始标签键控，仅追加，系统本身不消费
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// 受理号
    pub accession_number: String,
    /// 最初分配的标签
    pub assigned_label: EventType,
    /// 人工结论
    pub verdict: FeedbackVerdict,
    /// 记录时间
    pub timestamp: DateTime<Utc>,
}
