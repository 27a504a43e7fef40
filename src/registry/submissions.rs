// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::{normalize_cik, FilingRecord, Issuer};
use crate::registry::client::{RegistryError, SecHttpClient};
use crate::registry::urls;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// 提交资源响应
///
/// recent区段是列对齐数组：form、accessionNumber、filingDate、
/// primaryDocument、primaryDocDescription 按下标拼合为行
#[derive(Debug, Deserialize)]
struct SubmissionsResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    filings: FilingsSection,
}

#[derive(Debug, Deserialize, Default)]
struct FilingsSection {
    #[serde(default)]
    recent: RecentFilings,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
    #[serde(default)]
    primary_doc_description: Vec<String>,
}

/// 注册机构客户端
///
/// 契约：fetch(issuer) → 备案记录序列或失败。单个发行人的失败
/// 只影响该发行人，由调用方隔离处理
pub struct RegistryClient {
    http: Arc<SecHttpClient>,
    submissions_base: String,
    archives_base: String,
}

impl RegistryClient {
    pub fn new(http: Arc<SecHttpClient>, submissions_base: String, archives_base: String) -> Self {
        Self {
            http,
            submissions_base,
            archives_base,
        }
    }

    /// 抓取单个发行人的近期备案列表
    pub async fn fetch_issuer_filings(&self, issuer: &Issuer) -> Result<Vec<FilingRecord>, RegistryError> {
        let url = urls::submissions_url(&self.submissions_base, &issuer.cik);
        let body = self.http.get_bytes(&url).await?;
        parse_submissions(&body, issuer, &self.archives_base)
    }

    /// 抓取主文档的有界前缀（供分类器读取）
    pub async fn fetch_document(&self, url: &str, max_bytes: usize) -> Result<Vec<u8>, RegistryError> {
        self.http.get_bytes_capped(url, max_bytes).await
    }
}

/// 将提交资源响应解析为备案记录
///
/// 结构不符合预期时返回Malformed；单行缺受理号或日期不可解析
/// 则跳过该行而不使整个发行人失败
pub fn parse_submissions(
    body: &[u8],
    issuer: &Issuer,
    archives_base: &str,
) -> Result<Vec<FilingRecord>, RegistryError> {
    let response: SubmissionsResponse =
        serde_json::from_slice(body).map_err(|e| RegistryError::Malformed(e.to_string()))?;

    let recent = &response.filings.recent;
    let company_name = response.name.trim().to_string();
    let cik = normalize_cik(&issuer.cik);

    let mut records = Vec::new();
    for (i, form) in recent.form.iter().enumerate() {
        let Some(accession) = recent.accession_number.get(i).filter(|a| !a.is_empty()) else {
            debug!("Skipping row {} for CIK {}: missing accession number", i, cik);
            continue;
        };
        let date_str = recent.filing_date.get(i).map(String::as_str).unwrap_or("");
        let Ok(filing_date) = date_str.parse::<NaiveDate>() else {
            debug!(
                "Skipping accession {}: unparseable filing date {:?}",
                accession, date_str
            );
            continue;
        };
        let primary_doc = recent.primary_document.get(i).map(String::as_str).unwrap_or("");
        let description = recent
            .primary_doc_description
            .get(i)
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        records.push(FilingRecord {
            cik: cik.clone(),
            ticker: issuer.ticker.clone(),
            company_name: company_name.clone(),
            form_type: form.clone(),
            accession_number: accession.clone(),
            filing_date,
            description,
            index_url: urls::index_url(archives_base, &cik, accession),
            primary_doc_url: urls::primary_doc_url(archives_base, &cik, accession, primary_doc),
        });
    }

    Ok(records)
}
