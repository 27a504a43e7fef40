// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::event::Classification;
use crate::domain::models::filing::{DigestGroup, FilingRecord};
use crate::notify::traits::{InlineButton, InlineKeyboard};

/// Telegram回调数据的硬上限（字节）
const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// 转义HTML解析模式下的特殊字符
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// 渲染单条备案告警
///
/// 包含发行人、表单类型、描述、分类标签与文档链接；
/// 证据片段以斜体附在标签之后
pub fn render_filing_message(filing: &FilingRecord, classification: Option<&Classification>) -> String {
    let company = if filing.company_name.is_empty() {
        "Unknown"
    } else {
        &filing.company_name
    };

    let mut lines = vec![
        format!(
            "📄 <b>{}</b> — {}",
            escape_html(&filing.form_type),
            escape_html(company)
        ),
        format!("📅 {}", filing.filing_date),
    ];

    let description = filing.description.trim();
    if !description.is_empty() {
        lines.push(format!("📋 {}", escape_html(description)));
    }

    if let Some(c) = classification {
        lines.push(format!(
            "🏷 {} ({:.0}%)",
            c.event_type.display_name(),
            c.confidence * 100.0
        ));
        for snippet in &c.evidence {
            lines.push(format!("<i>{}</i>", escape_html(snippet)));
        }
    }

    if !filing.index_url.is_empty() {
        lines.push(filing.index_url.clone());
    }

    lines.join("\n")
}

/// 渲染摘要告警：发行人、表单、日期、条数与有序链接列表
pub fn render_digest_message(group: &DigestGroup) -> String {
    let company = group
        .filings
        .first()
        .map(|f| f.company_name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown");

    let mut lines = vec![
        format!(
            "📄 <b>{}</b> — {}",
            escape_html(&group.key.form_type),
            escape_html(company)
        ),
        format!("📅 {} · {} filing(s)", group.key.filing_date, group.count()),
    ];
    for filing in &group.filings {
        if !filing.index_url.is_empty() {
            lines.push(filing.index_url.clone());
        }
    }
    lines.join("\n")
}

/// 构建反馈键盘：三个固定按钮，回调数据为 fb:{受理号}:{标签}:{结论}
///
/// 超出通道64字节上限的按钮被丢弃（受理号异常超长时）
pub fn build_feedback_keyboard(accession_number: &str, classification: &Classification) -> InlineKeyboard {
    let label = classification.event_type.as_str();
    let buttons: Vec<InlineButton> = [
        ("✅ Correct", "confirmed"),
        ("❌ Wrong", "wrong"),
        ("🚫 Not relevant", "not_relevant"),
    ]
    .into_iter()
    .filter_map(|(text, verdict)| {
        let callback_data = format!("fb:{}:{}:{}", accession_number, label, verdict);
        if callback_data.len() > MAX_CALLBACK_DATA_BYTES {
            return None;
        }
        Some(InlineButton {
            text: text.to_string(),
            callback_data,
        })
    })
    .collect();

    InlineKeyboard {
        inline_keyboard: if buttons.is_empty() { Vec::new() } else { vec![buttons] },
    }
}
