// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::seen_state::SeenState;
use crate::utils::errors::StateError;
use async_trait::async_trait;

/// 已见状态仓库接口
///
/// 周期开始时整体加载，每次投递落定后追加并持久化；
/// 持久化必须原子替换（写临时文件后重命名），重复加载结果一致
#[async_trait]
pub trait SeenStateRepository: Send + Sync {
    /// 加载已告警受理号集合；存储不存在时返回空集合
    async fn load(&self) -> Result<SeenState, StateError>;

    /// 持久化集合
    async fn persist(&self, state: &SeenState) -> Result<(), StateError>;
}
