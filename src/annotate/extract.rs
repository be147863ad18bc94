// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use super::grammar::{tag_regex, Tag};
use crate::model::{Highlight, LineRange, PanelSide};

/// An actionable reference inside the display text: the byte span of the label that
/// replaced a tag, plus the panel location it points at. The label text itself is
/// sliced from the display text via `span`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRef {
    pub span: Range<usize>,
    pub side: PanelSide,
    pub range: LineRange,
}

/// Result of one extraction pass over the full accumulated buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// The buffer with every well-formed tag replaced by its short label; all other
    /// text (including incomplete tag fragments still arriving) passes through
    /// unchanged.
    pub display_text: String,
    /// One entry per replaced tag, in left-to-right match order.
    pub refs: Vec<InlineRef>,
    /// One highlight per replaced tag, in match order. Order matters: the first
    /// highlight drives scroll-to behavior.
    pub highlights: Vec<Highlight>,
}

/// Scans the entire accumulated buffer and strips well-formed reference tags.
///
/// The scan is deliberately a full re-parse on every chunk: a tag may only become
/// complete once enough text has arrived, and re-scanning guarantees no tag is
/// missed or parsed twice inconsistently. Cost is linear in total response length
/// per chunk, acceptable for chat-sized responses. The function is pure: the same
/// input yields byte-for-byte the same output.
pub fn extract(accumulated: &str) -> Extraction {
    // Fast path: most chunks of prose carry no tags at all.
    if memchr::memmem::find(accumulated.as_bytes(), b"[[").is_none() {
        return Extraction {
            display_text: accumulated.to_owned(),
            ..Extraction::default()
        };
    }

    let mut display_text = String::with_capacity(accumulated.len());
    let mut refs = Vec::new();
    let mut highlights = Vec::new();
    let mut tail = 0usize;

    for caps in tag_regex().captures_iter(accumulated) {
        let matched = caps.get(0).expect("capture group 0 always present");
        let Some(tag) = Tag::from_captures(&caps) else {
            // Out-of-range bound: leave the whole match as literal text.
            continue;
        };

        display_text.push_str(&accumulated[tail..matched.start()]);
        tail = matched.end();

        let label = tag.range().label();
        let span_start = display_text.len();
        display_text.push_str(&label);
        refs.push(InlineRef {
            span: span_start..display_text.len(),
            side: tag.side(),
            range: tag.range(),
        });
        highlights.push(Highlight::new(tag.side(), tag.range()));
    }

    display_text.push_str(&accumulated[tail..]);

    Extraction {
        display_text,
        refs,
        highlights,
    }
}
