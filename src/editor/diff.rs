// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line alignment for the side-by-side visual diff view.
//!
//! Longest-common-subsequence alignment over whole lines. Documents here are
//! editor-panel sized, so the quadratic DP table is fine; changed lines appear as
//! a removed row followed by an added row, no intra-line matching.

/// One aligned row of the side-by-side diff. Line numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffRow {
    Same { left: u32, right: u32 },
    Removed { left: u32 },
    Added { right: u32 },
}

/// Aligns two documents line by line.
pub fn diff_rows(left: &str, right: &str) -> Vec<DiffRow> {
    let left_lines: Vec<&str> = left.lines().collect();
    let right_lines: Vec<&str> = right.lines().collect();
    let n = left_lines.len();
    let m = right_lines.len();

    // lcs[i][j] = LCS length of left[i..] and right[j..].
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if left_lines[i] == right_lines[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut rows = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if left_lines[i] == right_lines[j] {
            rows.push(DiffRow::Same {
                left: i as u32 + 1,
                right: j as u32 + 1,
            });
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            rows.push(DiffRow::Removed { left: i as u32 + 1 });
            i += 1;
        } else {
            rows.push(DiffRow::Added { right: j as u32 + 1 });
            j += 1;
        }
    }
    while i < n {
        rows.push(DiffRow::Removed { left: i as u32 + 1 });
        i += 1;
    }
    while j < m {
        rows.push(DiffRow::Added { right: j as u32 + 1 });
        j += 1;
    }
    rows
}
