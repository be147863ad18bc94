// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reference tag grammar.
//!
//! A tag is `[[<panel>|line <N>]]` or `[[<panel>|line <N>-<M>]]` with exactly one
//! space after the word `line`. Malformed near-matches (wrong panel token, missing
//! `line` keyword, non-numeric bounds) are not tags and stay literal text; the
//! grammar performs no fuzzy correction because the source text is
//! machine-generated and not guaranteed well-formed.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::model::{LineRange, PanelSide};

const TAG_PATTERN: &str = r"\[\[(left|right)\|line ([0-9]+)(?:-([0-9]+))?\]\]";

pub(crate) fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern compiles"))
}

/// A well-formed reference tag parsed out of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    side: PanelSide,
    range: LineRange,
}

impl Tag {
    pub fn side(&self) -> PanelSide {
        self.side
    }

    pub fn range(&self) -> LineRange {
        self.range
    }

    /// Builds a tag from a grammar match. Returns `None` when a bound does not fit
    /// a line number (the match then stays literal text, per the leniency rule).
    pub(crate) fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let side: PanelSide = caps[1].parse().ok()?;
        let start: u32 = caps[2].parse().ok()?;
        let range = match caps.get(3) {
            Some(end) => LineRange::new(start, end.as_str().parse().ok()?),
            None => LineRange::single(start),
        };
        Some(Self { side, range })
    }
}
