// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod digest_grouper;
pub mod event_classifier;
pub mod evidence_snippets;
pub mod novelty_detector;
pub mod relevance_filter;
