// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::seen_state::SeenState;
use crate::domain::repositories::seen_state_repository::SeenStateRepository;
use crate::utils::errors::StateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// 状态文件布局：顺序无关的受理号数组
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    seen_accessions: Vec<String>,
}

/// JSON文件已见状态存储
///
/// 持久化采用写临时文件后原子重命名，避免半写状态；
/// 条目数超过cap时只保留最近插入的cap条
pub struct JsonFileSeenStore {
    path: PathBuf,
    cap: usize,
}

impl JsonFileSeenStore {
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SeenStateRepository for JsonFileSeenStore {
    /// 加载状态；文件不存在视为空集合，内容损坏则报错
    /// （损坏的状态意味着去重闸门不可信，宁可跳过周期）
    async fn load(&self) -> Result<SeenState, StateError> {
        let body = match fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("State file {:?} not found, starting empty", self.path);
                return Ok(SeenState::new());
            }
            Err(e) => return Err(StateError::Io(e)),
        };

        let file: StateFile = serde_json::from_slice(&body)?;
        Ok(SeenState::from_entries(file.seen_accessions))
    }

    /// 原子持久化：写临时文件，再重命名覆盖正式文件
    async fn persist(&self, state: &SeenState) -> Result<(), StateError> {
        let file = StateFile {
            seen_accessions: state.capped_entries(self.cap).to_vec(),
        };
        let body = serde_json::to_vec_pretty(&file)?;

        let temp = self.temp_path();
        fs::write(&temp, &body).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}
