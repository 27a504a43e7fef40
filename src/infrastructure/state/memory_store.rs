// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::seen_state::SeenState;
use crate::domain::repositories::seen_state_repository::SeenStateRepository;
use crate::utils::errors::StateError;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// 内存已见状态存储
///
/// 供测试与隔离运行使用，不跨进程存活
#[derive(Default)]
pub struct InMemorySeenStore {
    inner: Mutex<SeenState>,
}

impl InMemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SeenState) -> Self {
        Self {
            inner: Mutex::new(state),
        }
    }
}

#[async_trait]
impl SeenStateRepository for InMemorySeenStore {
    async fn load(&self) -> Result<SeenState, StateError> {
        Ok(self.inner.lock().await.clone())
    }

    async fn persist(&self, state: &SeenState) -> Result<(), StateError> {
        *self.inner.lock().await = state.clone();
        Ok(())
    }
}
