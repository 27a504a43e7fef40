// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::Html;

/// 从备案文档字节中提取纯文本
///
/// URL以.htm/.html结尾时按HTML解析并抽取文本节点，
/// 否则按UTF-8宽松解码；输出统一规整为单空格分隔
pub fn extract_text(content: &[u8], url: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let raw = String::from_utf8_lossy(content);
    let text = if is_html_url(url) {
        let document = Html::parse_document(&raw);
        document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        raw.into_owned()
    };

    normalize_whitespace(&text)
}

/// 判断URL是否指向HTML文档
fn is_html_url(url: &str) -> bool {
    let path = url::Url::parse(url)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_else(|_| url.to_lowercase());
    path.ends_with(".htm") || path.ends_with(".html")
}

/// 规整空白字符：连续空白折叠为单空格，去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
