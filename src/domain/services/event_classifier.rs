// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::event::{Classification, ClassificationBasis, EventType};
use crate::domain::models::filing::FilingRecord;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// 各事件类型的短语规则表
///
/// 大小写不敏感；条目为正则，绝大多数是字面短语，个别带通配。
/// 表序即平局裁决序：得分相同的类型取先列者
static EVENT_PHRASES: Lazy<Vec<(EventType, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            EventType::PrefCall,
            build_patterns(&[
                "notice of redemption",
                "redemption of",
                "called for redemption",
                "redemption date",
                "call the",
                "optional redemption",
                "mandatory redemption",
                "redemption price",
                "redemption right",
            ]),
        ),
        (
            EventType::DivSuspension,
            build_patterns(&[
                "suspend",
                "suspension of dividend",
                "omit the dividend",
                "omit dividend",
                "dividend will not",
                "discontinue.*?dividend",
                "cease paying",
            ]),
        ),
        (
            EventType::Offering,
            build_patterns(&[
                "prospectus supplement",
                "underwritten offering",
                "at-the-market",
                "atm offering",
                "shelf offering",
                "offering of",
                "offered by",
                "underwriting agreement",
                "placement agent",
            ]),
        ),
        (
            EventType::RightsOffering,
            build_patterns(&[
                "rights offering",
                "subscription rights",
                "transferable rights",
                "rights to purchase",
                "subscription offer",
            ]),
        ),
        (
            EventType::CefDistributionChange,
            build_patterns(&[
                "distribution policy",
                "managed distribution",
                "distribution rate",
                "cut.*?distribution",
                "reduce.*?distribution",
                "distribution will",
                "monthly distribution",
                "quarterly distribution",
            ]),
        ),
    ]
});

fn build_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .expect("static phrase pattern")
        })
        .collect()
}

/// 事件类型对应的短语规则（用于证据片段提取）
pub fn phrases_for(event_type: EventType) -> &'static [Regex] {
    EVENT_PHRASES
        .iter()
        .find(|(ev, _)| *ev == event_type)
        .map(|(_, phrases)| phrases.as_slice())
        .unwrap_or(&[])
}

/// 基于正文文本的分类
///
/// 每条短语至多计一次，命中越多置信度越高：min(1.0, 0.3 + 0.2·n)。
/// 空文本或无命中时返回 (GenericNews, 0.2)
pub fn classify_text(plain_text: &str) -> (EventType, f64) {
    if plain_text.trim().is_empty() {
        return (EventType::GenericNews, 0.2);
    }

    let mut best: Option<(EventType, f64)> = None;
    for (event_type, phrases) in EVENT_PHRASES.iter() {
        let n = phrases.iter().filter(|re| re.is_match(plain_text)).count();
        if n == 0 {
            continue;
        }
        let score = (0.3 + 0.2 * n as f64).min(1.0);
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((*event_type, score)),
        }
    }

    best.unwrap_or((EventType::GenericNews, 0.2))
}

/// 仅基于元数据的降级分类
///
/// 文档不可得时的兜底路径：先对主文档描述跑短语规则，
/// 无命中再按表单类型启发（424B族即发行类），保证永不缺标签
pub fn classify_metadata(filing: &FilingRecord) -> Classification {
    let (event_type, confidence) = classify_text(&filing.description);
    if event_type != EventType::GenericNews {
        return Classification {
            event_type,
            confidence,
            basis: ClassificationBasis::MetadataOnly,
            evidence: Vec::new(),
        };
    }

    if filing.form_type.starts_with("424B") {
        return Classification {
            event_type: EventType::Offering,
            confidence: 0.4,
            basis: ClassificationBasis::MetadataOnly,
            evidence: Vec::new(),
        };
    }

    Classification::fallback(ClassificationBasis::MetadataOnly)
}
