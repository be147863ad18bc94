// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Highlight, ScrollTarget};

/// Shared annotation state read by every panel renderer.
///
/// One instance lives for the whole session as an explicit context object owned by
/// the app; it is written only by the annotation pipeline and the reset path, and
/// treated as read-only by renderers except for clearing an honored scroll
/// directive. The highlight set always reflects the latest accumulated buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightState {
    active: Vec<Highlight>,
    scroll_request: Option<ScrollTarget>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.active
    }

    /// Unconditionally replaces the active highlight set; never merges or appends.
    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        self.active = highlights;
    }

    pub fn scroll_request(&self) -> Option<ScrollTarget> {
        self.scroll_request
    }

    pub fn request_scroll(&mut self, target: ScrollTarget) {
        self.scroll_request = Some(target);
    }

    /// Clears the outstanding directive only if it is still the given one, so a
    /// panel that honored a directive cannot accidentally drop a newer one issued
    /// after a reset.
    pub fn clear_scroll_request_if(&mut self, target: ScrollTarget) -> bool {
        if self.scroll_request == Some(target) {
            self.scroll_request = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.scroll_request = None;
    }
}
