// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ScrollTarget;

/// Decides, after each extraction pass, whether a new scroll directive is issued.
///
/// The last-issued marker is private coordinator state, invisible to renderers. It
/// suppresses re-issuing the same target on every streaming chunk while the first
/// reference in the text has not changed. The coordinator never clears an
/// outstanding directive; that is the honoring panel's job.
#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    last_issued: Option<ScrollTarget>,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate(&mut self, state: &mut super::HighlightState) {
        if state.scroll_request().is_some() {
            return;
        }
        let Some(first) = state.highlights().first() else {
            return;
        };

        let candidate = ScrollTarget::new(first.side(), first.range().start());
        if self.last_issued == Some(candidate) {
            return;
        }

        state.request_scroll(candidate);
        self.last_issued = Some(candidate);
    }

    /// Forgets the last-issued marker so the next pass may scroll again, even to a
    /// previously-visited location.
    pub fn reset(&mut self) {
        self.last_issued = None;
    }
}
