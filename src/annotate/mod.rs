// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Streaming annotation protocol.
//!
//! Assistant replies may embed reference tags like `[[left|line 4-8]]`. As chunks
//! arrive, the extractor re-scans the entire accumulated buffer (a tag may straddle
//! a chunk boundary), replaces well-formed tags with short labels, and produces the
//! highlight list in match order. The scroll coordinator then decides whether the
//! first highlight warrants a new scroll directive, suppressing repeats across
//! chunks so streaming does not fight the user's own scrolling.

pub mod extract;
pub mod grammar;
pub mod scroll;
pub mod state;

pub use extract::{extract, Extraction, InlineRef};
pub use scroll::ScrollCoordinator;
pub use state::HighlightState;

/// The per-response annotation pipeline: extraction, highlight replacement, and
/// scroll coordination, run to completion for every chunk.
#[derive(Debug, Default)]
pub struct Annotator {
    scroll: ScrollCoordinator,
}

impl Annotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes the full accumulated buffer of the in-flight response.
    ///
    /// The highlight set is replaced, never merged; the returned extraction carries
    /// the display text for the transcript.
    pub fn ingest(&mut self, accumulated: &str, state: &mut HighlightState) -> Extraction {
        let extraction = extract(accumulated);
        state.set_highlights(extraction.highlights.clone());
        self.scroll.coordinate(state);
        extraction
    }

    /// Hard reset at the start of a new user-initiated exchange or on clearing the
    /// conversation: empties the highlight set, drops any outstanding scroll
    /// directive, and forgets the last-issued marker so a previously-visited
    /// location may be scrolled to again.
    pub fn reset(&mut self, state: &mut HighlightState) {
        state.clear();
        self.scroll.reset();
    }
}
