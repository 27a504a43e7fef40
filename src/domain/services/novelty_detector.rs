// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::FilingRecord;
use crate::domain::models::seen_state::SeenState;

/// 新颖性划分结果
#[derive(Debug, Default)]
pub struct Partition {
    /// 未告警过的备案，候选发送
    pub new: Vec<FilingRecord>,
    /// 已告警过的备案，直接丢弃
    pub already_seen: Vec<FilingRecord>,
}

/// 按受理号在已见集合中的成员关系划分备案
///
/// 稳定、保序、幂等：同一份SeenState下调用两次得到相同的new集合。
/// 必须使用周期开始时加载的状态，这是防止重复告警的唯一闸门
pub fn partition(filings: Vec<FilingRecord>, seen: &SeenState) -> Partition {
    let mut result = Partition::default();
    for filing in filings {
        if seen.contains(&filing.accession_number) {
            result.already_seen.push(filing);
        } else {
            result.new.push(filing);
        }
    }
    result
}
