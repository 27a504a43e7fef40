// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::feedback::FeedbackRecord;
use crate::utils::errors::FeedbackError;
use async_trait::async_trait;

/// 反馈日志仓库接口
///
/// 外部协作边界：本系统只承诺追加语义，不读取、不消费
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// 追加一条人工反馈记录
    async fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError>;
}
