// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::surface::{Decoration, EditorSurface};
use crate::annotate::HighlightState;
use crate::model::{PanelSide, ScrollTarget};

/// How long a renderer keeps an honored scroll directive alive before clearing it,
/// so the directive is not dropped before its panel has consumed it.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    target: ScrollTarget,
    honored_at: Instant,
}

/// Per-panel reactive renderer: filters the shared highlight list to its own
/// identity, applies decorations to the underlying widget, and honors scroll
/// directives addressed to it. Highlights and directives for the other side are
/// ignored entirely; filtering is by exact identity, never by inference.
#[derive(Debug)]
pub struct PanelRenderer {
    side: PanelSide,
    class: SmolStr,
    applied: SmallVec<[Decoration; 4]>,
    pending_reveal: Option<PendingReveal>,
}

impl PanelRenderer {
    pub fn new(side: PanelSide) -> Self {
        Self::with_class(side, format!("highlight-{side}"))
    }

    pub fn with_class(side: PanelSide, class: impl Into<SmolStr>) -> Self {
        Self {
            side,
            class: class.into(),
            applied: SmallVec::new(),
            pending_reveal: None,
        }
    }

    pub fn side(&self) -> PanelSide {
        self.side
    }

    /// One reactive pass: decoration sync, then scroll handling. Called every tick
    /// with a monotonic `now` so the settle delay is testable without sleeping.
    pub fn sync(&mut self, state: &mut HighlightState, surface: &mut dyn EditorSurface, now: Instant) {
        self.sync_decorations(state, surface);
        self.sync_scroll(state, surface, now);
    }

    fn sync_decorations(&mut self, state: &HighlightState, surface: &mut dyn EditorSurface) {
        let decorations: SmallVec<[Decoration; 4]> = state
            .highlights()
            .iter()
            .filter(|highlight| highlight.side() == self.side)
            .map(|highlight| {
                Decoration::new(
                    highlight.range().start(),
                    highlight.range().end(),
                    self.class.clone(),
                )
            })
            .collect();

        if decorations != self.applied {
            surface.replace_decorations(&decorations);
            self.applied = decorations;
        }
    }

    fn sync_scroll(&mut self, state: &mut HighlightState, surface: &mut dyn EditorSurface, now: Instant) {
        if let Some(pending) = self.pending_reveal {
            if state.scroll_request() != Some(pending.target) {
                // Superseded or already cleared elsewhere; nothing left to honor.
                self.pending_reveal = None;
            } else if now.duration_since(pending.honored_at) >= SCROLL_SETTLE_DELAY {
                state.clear_scroll_request_if(pending.target);
                self.pending_reveal = None;
                return;
            } else {
                return;
            }
        }

        let Some(target) = state.scroll_request() else {
            return;
        };
        if target.side() != self.side {
            return;
        }
        if target.line() == 0 {
            // Line 0 is never revealed; clear immediately so the directive slot
            // does not stay occupied forever.
            state.clear_scroll_request_if(target);
            return;
        }

        surface.reveal_line(target.line());
        self.pending_reveal = Some(PendingReveal {
            target,
            honored_at: now,
        });
    }
}
