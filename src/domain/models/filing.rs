// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 受监控的发行人
///
/// 监控清单在启动时加载一次，轮询期间不变
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issuer {
    /// 注册机构标识（CIK，补零到10位）
    pub cik: String,
    /// 股票代码（可选，仅用于展示）
    #[serde(default)]
    pub ticker: Option<String>,
}

impl Issuer {
    pub fn new(cik: impl Into<String>) -> Self {
        Self {
            cik: normalize_cik(&cik.into()),
            ticker: None,
        }
    }
}

/// CIK 补零到10位，用于SEC提交资源URL
pub fn normalize_cik(cik: &str) -> String {
    format!("{:0>10}", cik.trim())
}

/// CIK 去除前导零，用于EDGAR Archives路径
pub fn cik_numeric(cik: &str) -> String {
    let stripped = cik.trim().trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// 单次监管备案记录
///
/// 由提交列表的列对齐数组按下标拼合而成，抓取后不再变更；
/// accession_number 是全局唯一的去重键
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilingRecord {
    /// 发行人CIK（10位补零形式）
    pub cik: String,
    /// 股票代码（可选）
    pub ticker: Option<String>,
    /// 发行人名称
    pub company_name: String,
    /// 表单类型代码（如 8-K、424B2）
    pub form_type: String,
    /// 受理号，全局唯一
    pub accession_number: String,
    /// 备案日期
    pub filing_date: NaiveDate,
    /// 主文档描述
    pub description: String,
    /// 备案索引页链接
    pub index_url: String,
    /// 主文档链接（可能缺失）
    pub primary_doc_url: Option<String>,
}

/// 摘要分组键：同发行人、同表单类型、同备案日期的备案合并为一条摘要
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigestKey {
    pub cik: String,
    pub form_type: String,
    pub filing_date: NaiveDate,
}

impl DigestKey {
    pub fn of(filing: &FilingRecord) -> Self {
        Self {
            cik: filing.cik.clone(),
            form_type: filing.form_type.clone(),
            filing_date: filing.filing_date,
        }
    }
}

/// 摘要分组：仅在单个轮询周期内存在
#[derive(Debug, Clone)]
pub struct DigestGroup {
    pub key: DigestKey,
    /// 组内按发现顺序排列
    pub filings: Vec<FilingRecord>,
}

impl DigestGroup {
    pub fn count(&self) -> usize {
        self.filings.len()
    }
}
