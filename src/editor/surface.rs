// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

/// A whole-line visual range applied to an editor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    start_line: u32,
    end_line: u32,
    class: SmolStr,
}

impl Decoration {
    pub fn new(start_line: u32, end_line: u32, class: impl Into<SmolStr>) -> Self {
        Self {
            start_line,
            end_line,
            class: class.into(),
        }
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn covers_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// The contract an editor widget exposes to the renderer.
///
/// Duet does not validate that decorated or revealed lines exist in the document;
/// the widget's own clamping/no-op behavior is relied upon.
pub trait EditorSurface {
    /// Replaces the panel's previous decoration set atomically: old decorations
    /// removed and new ones added as a single operation, so partial re-renders
    /// never show a mix of stale and fresh highlights.
    fn replace_decorations(&mut self, decorations: &[Decoration]);

    /// Brings the given 1-based line into view.
    fn reveal_line(&mut self, line: u32);
}
