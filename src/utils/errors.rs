// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 状态存储错误类型
///
/// 已见状态是重复告警的唯一防线，读写失败对整个周期是致命的
#[derive(Error, Debug)]
pub enum StateError {
    #[error("state io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 反馈日志错误类型
#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("feedback log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 轮询周期错误类型
///
/// 发行人级与消息级失败不在此列：它们被隔离并记录日志，
/// 只有状态存储失败会使整个周期中止
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("seen-state store failed: {0}")]
    State(#[from] StateError),
}
