// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::{DigestGroup, DigestKey, FilingRecord};
use std::collections::HashMap;

/// 按 (发行人, 表单类型, 备案日期) 分桶
///
/// 确定性分组：桶内保持发现顺序，桶间按日期降序、再按CIK与表单
/// 类型降序排列，最新的备案排在最前
pub fn group_by_issuer_form_date(filings: Vec<FilingRecord>) -> Vec<DigestGroup> {
    let mut buckets: HashMap<DigestKey, Vec<FilingRecord>> = HashMap::new();
    let mut key_order: Vec<DigestKey> = Vec::new();

    for filing in filings {
        let key = DigestKey::of(&filing);
        if !buckets.contains_key(&key) {
            key_order.push(key.clone());
        }
        buckets.entry(key).or_default().push(filing);
    }

    key_order.sort_by(|a, b| {
        (&b.filing_date, &b.cik, &b.form_type).cmp(&(&a.filing_date, &a.cik, &a.form_type))
    });

    key_order
        .into_iter()
        .map(|key| {
            let filings = buckets.remove(&key).unwrap_or_default();
            DigestGroup { key, filings }
        })
        .collect()
}
