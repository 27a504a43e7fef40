// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::FilingRecord;
use chrono::{Duration, NaiveDate};

/// 表单类型是否命中允许清单
///
/// 以`*`结尾的条目按前缀匹配（如`424B*`覆盖424B2/424B3等子型），
/// 其余条目精确匹配
pub fn form_type_matches(form_type: &str, allowlist: &[String]) -> bool {
    allowlist.iter().any(|entry| {
        if let Some(prefix) = entry.strip_suffix('*') {
            form_type.starts_with(prefix)
        } else {
            form_type == entry
        }
    })
}

/// 相关性过滤
///
/// 纯函数：保留表单类型命中允许清单、且备案日期距今不超过
/// max_age_days 的记录；保持输入顺序，无副作用
pub fn filter_filings(
    filings: Vec<FilingRecord>,
    allowlist: &[String],
    max_age_days: u32,
    today: NaiveDate,
) -> Vec<FilingRecord> {
    let cutoff = today - Duration::days(i64::from(max_age_days));
    filings
        .into_iter()
        .filter(|f| form_type_matches(&f.form_type, allowlist) && f.filing_date >= cutoff)
        .collect()
}
