// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// An inclusive range of 1-based line numbers with `start <= end`.
///
/// A single-line reference is represented as `start == end`. The constructor
/// normalizes inverted bounds so the invariant holds even for generated text
/// that swapped its numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineRange {
    start: u32,
    end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Short human-readable label, e.g. `L10` or `L10-15`.
    pub fn label(&self) -> String {
        let mut start_buf = itoa::Buffer::new();
        let mut label = String::with_capacity(12);
        label.push('L');
        label.push_str(start_buf.format(self.start));
        if !self.is_single() {
            let mut end_buf = itoa::Buffer::new();
            label.push('-');
            label.push_str(end_buf.format(self.end));
        }
        label
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
