// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::filing::{cik_numeric, normalize_cik};

/// 去除受理号中的连字符，用于Archives路径段
pub fn accession_no_dashes(accession: &str) -> String {
    accession.replace('-', "")
}

/// 单个发行人提交资源的URL
pub fn submissions_url(base: &str, cik: &str) -> String {
    format!("{}/CIK{}.json", base.trim_end_matches('/'), normalize_cik(cik))
}

/// 备案索引页URL
pub fn index_url(archives_base: &str, cik: &str, accession: &str) -> String {
    format!(
        "{}/{}/{}/{}-index.htm",
        archives_base.trim_end_matches('/'),
        cik_numeric(cik),
        accession_no_dashes(accession),
        accession
    )
}

/// 主文档URL；受理号或文档名缺失时无主文档
pub fn primary_doc_url(archives_base: &str, cik: &str, accession: &str, primary_doc: &str) -> Option<String> {
    let doc = primary_doc.trim();
    if accession.is_empty() || doc.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}/{}/{}",
        archives_base.trim_end_matches('/'),
        cik_numeric(cik),
        accession_no_dashes(accession),
        doc
    ))
}
