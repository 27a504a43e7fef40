// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;

/// 片段提取参数
#[derive(Debug, Clone)]
pub struct SnippetConfig {
    /// 命中位置前后各取多少字符
    pub window_chars: usize,
    /// 最多返回几条片段
    pub max_snippets: usize,
    /// 单条片段的最大长度
    pub max_snippet_len: usize,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            window_chars: 250,
            max_snippets: 3,
            max_snippet_len: 200,
        }
    }
}

/// 从规整后的正文中提取命中短语附近的证据片段
///
/// 逐条短语取首次命中，围绕命中取窗口、再规整空白并截断；
/// 相同起点或相同内容的片段去重，按短语表序最多返回max_snippets条
pub fn extract_snippets(plain_text: &str, phrases: &[Regex], config: &SnippetConfig) -> Vec<String> {
    if plain_text.is_empty() || phrases.is_empty() {
        return Vec::new();
    }

    let mut seen_starts: Vec<usize> = Vec::new();
    let mut snippets: Vec<String> = Vec::new();

    for phrase in phrases {
        if snippets.len() >= config.max_snippets {
            break;
        }
        let Some(found) = phrase.find(plain_text) else {
            continue;
        };
        if seen_starts.contains(&found.start()) {
            continue;
        }
        seen_starts.push(found.start());

        let start = floor_char_boundary(plain_text, found.start().saturating_sub(config.window_chars));
        let end = ceil_char_boundary(
            plain_text,
            (found.end() + config.window_chars).min(plain_text.len()),
        );

        let mut snip: String = plain_text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
        if snip.chars().count() > config.max_snippet_len {
            snip = snip
                .chars()
                .take(config.max_snippet_len.saturating_sub(3))
                .collect::<String>()
                + "...";
        }
        if snip.is_empty() || snippets.contains(&snip) {
            continue;
        }
        snippets.push(snip);
    }

    snippets
}

/// 向下对齐到字符边界，避免窗口切开多字节字符
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// 向上对齐到字符边界
fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
