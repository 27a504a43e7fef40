// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 事件类型
///
/// 对备案内容的粗粒度分类，标签仅作提示，不影响告警投递
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// 优先股赎回/召回
    PrefCall,
    /// 股息暂停
    DivSuspension,
    /// 发行
    Offering,
    /// 供股发行
    RightsOffering,
    /// 封闭式基金分配变更
    CefDistributionChange,
    /// 一般备案
    GenericNews,
}

impl EventType {
    /// 机读标识，用于反馈日志与回调数据
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PrefCall => "PREF_CALL",
            EventType::DivSuspension => "DIV_SUSPENSION",
            EventType::Offering => "OFFERING",
            EventType::RightsOffering => "RIGHTS_OFFERING",
            EventType::CefDistributionChange => "CEF_DISTRIBUTION_CHANGE",
            EventType::GenericNews => "GENERIC_NEWS",
        }
    }

    /// 展示用标签
    pub fn display_name(&self) -> &'static str {
        match self {
            EventType::PrefCall => "Redemption / Call",
            EventType::DivSuspension => "Dividend suspension",
            EventType::Offering => "Offering",
            EventType::RightsOffering => "Rights offering",
            EventType::CefDistributionChange => "CEF distribution change",
            EventType::GenericNews => "Filing",
        }
    }
}

/// 分类依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBasis {
    /// 基于主文档正文的短语规则
    DocumentText,
    /// 仅基于元数据（文档不可得时的降级路径）
    MetadataOnly,
}

/// 分类结果
///
/// 每条备案每次运行至多产生一次；人工更正只追加反馈记录，不回改历史
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// 事件类型标签
    pub event_type: EventType,
    /// 置信度 [0, 1]
    pub confidence: f64,
    /// 分类依据
    pub basis: ClassificationBasis,
    /// 证据片段（命中短语附近的原文窗口）
    pub evidence: Vec<String>,
}

impl Classification {
    /// 兜底分类：无文本、无命中时的保守结果
    pub fn fallback(basis: ClassificationBasis) -> Self {
        Self {
            event_type: EventType::GenericNews,
            confidence: 0.2,
            basis,
            evidence: Vec::new(),
        }
    }
}
