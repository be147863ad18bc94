// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::panel::PanelSide;
use super::range::LineRange;

/// A resolved `(panel, line range)` reference derived from a tag.
///
/// Highlights are ephemeral: the full set is replaced on every extraction pass and
/// never persisted across a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    side: PanelSide,
    range: LineRange,
}

impl Highlight {
    pub fn new(side: PanelSide, range: LineRange) -> Self {
        Self { side, range }
    }

    pub fn side(&self) -> PanelSide {
        self.side
    }

    pub fn range(&self) -> LineRange {
        self.range
    }
}

/// An instruction to bring one line of one panel into view.
///
/// At most one scroll target is outstanding system-wide; the panel that honors it
/// clears it after a short settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    side: PanelSide,
    line: u32,
}

impl ScrollTarget {
    pub fn new(side: PanelSide, line: u32) -> Self {
        Self { side, line }
    }

    pub fn side(&self) -> PanelSide {
        self.side
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}
