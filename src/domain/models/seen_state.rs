// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// 已告警受理号集合
///
/// 保留插入顺序以便对持久化条目数做确定性截断；
/// 条目只增不删，是"已通知"判定的唯一依据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenState {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按给定顺序构建集合，重复条目只保留首次出现
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new();
        for entry in entries {
            state.insert(entry.into());
        }
        state
    }

    /// 受理号是否已告警
    pub fn contains(&self, accession_number: &str) -> bool {
        self.index.contains(accession_number)
    }

    /// 记录受理号；返回是否为新条目
    pub fn insert(&mut self, accession_number: String) -> bool {
        if self.index.contains(&accession_number) {
            return false;
        }
        self.order.push(accession_number.clone());
        self.index.insert(accession_number);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// 最近插入的至多cap条，用于控制状态文件增长
    pub fn capped_entries(&self, cap: usize) -> &[String] {
        let start = self.order.len().saturating_sub(cap);
        &self.order[start..]
    }
}
