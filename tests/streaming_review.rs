// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end coverage of the streaming review pipeline: chunked extraction,
//! highlight replacement, scroll coordination, and per-panel rendering, driven
//! through the public crate surface only.

use std::time::Instant;

use duet::annotate::{Annotator, HighlightState};
use duet::chat::prompt::diff_analysis_prompt;
use duet::chat::{GenerationService, ScriptedReviewer, StreamEvent};
use duet::editor::{Decoration, EditorSurface, PanelRenderer, SCROLL_SETTLE_DELAY};
use duet::model::{PanelSide, Workspace};

#[derive(Debug, Default)]
struct RecordingSurface {
    decoration_sets: Vec<Vec<Decoration>>,
    revealed: Vec<u32>,
}

impl RecordingSurface {
    fn current_decorations(&self) -> &[Decoration] {
        self.decoration_sets.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl EditorSurface for RecordingSurface {
    fn replace_decorations(&mut self, decorations: &[Decoration]) {
        self.decoration_sets.push(decorations.to_vec());
    }

    fn reveal_line(&mut self, line: u32) {
        self.revealed.push(line);
    }
}

#[test]
fn chunked_reply_highlights_both_panels_and_scrolls_once() {
    let chunks = [
        "The bug is at ",
        "[[left|line 4",
        "-8]] and fixed ",
        "at [[right|line 10]].",
    ];

    let mut annotator = Annotator::new();
    let mut state = HighlightState::new();
    let mut left_renderer = PanelRenderer::new(PanelSide::Left);
    let mut right_renderer = PanelRenderer::new(PanelSide::Right);
    let mut left_surface = RecordingSurface::default();
    let mut right_surface = RecordingSurface::default();

    let start = Instant::now();
    let mut buffer = String::new();
    let mut display_text = String::new();
    for chunk in chunks {
        buffer.push_str(chunk);
        display_text = annotator.ingest(&buffer, &mut state).display_text;

        left_renderer.sync(&mut state, &mut left_surface, start);
        right_renderer.sync(&mut state, &mut right_surface, start);
    }

    assert_eq!(display_text, "The bug is at L4-8 and fixed at L10.");

    let highlights = state.highlights();
    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].side(), PanelSide::Left);
    assert_eq!(highlights[0].range().start(), 4);
    assert_eq!(highlights[0].range().end(), 8);
    assert_eq!(highlights[1].side(), PanelSide::Right);
    assert_eq!(highlights[1].range().start(), 10);
    assert_eq!(highlights[1].range().end(), 10);

    // Exactly one reveal, on the panel of the first highlight.
    assert_eq!(left_surface.revealed, vec![4]);
    assert!(right_surface.revealed.is_empty());

    // Each panel ends up decorated with its own highlights only.
    let left = left_surface.current_decorations();
    assert_eq!(left.len(), 1);
    assert!(left[0].covers_line(4) && left[0].covers_line(8));
    let right = right_surface.current_decorations();
    assert_eq!(right.len(), 1);
    assert!(right[0].covers_line(10));

    // Once the settle delay elapses the honored directive is cleared without a
    // second reveal.
    left_renderer.sync(&mut state, &mut left_surface, start + SCROLL_SETTLE_DELAY);
    right_renderer.sync(&mut state, &mut right_surface, start + SCROLL_SETTLE_DELAY);
    assert_eq!(state.scroll_request(), None);
    assert_eq!(left_surface.revealed, vec![4]);
}

#[test]
fn new_exchange_resets_state_and_reissues_directives() {
    let mut annotator = Annotator::new();
    let mut state = HighlightState::new();
    let mut renderer = PanelRenderer::new(PanelSide::Left);
    let mut surface = RecordingSurface::default();

    let start = Instant::now();
    annotator.ingest("look at [[left|line 7]]", &mut state);
    renderer.sync(&mut state, &mut surface, start);
    renderer.sync(&mut state, &mut surface, start + SCROLL_SETTLE_DELAY);
    assert_eq!(surface.revealed, vec![7]);

    // Without a reset, the same location is suppressed on a later re-scan.
    annotator.ingest("look at [[left|line 7]] again", &mut state);
    renderer.sync(&mut state, &mut surface, start + SCROLL_SETTLE_DELAY);
    assert_eq!(surface.revealed, vec![7]);

    // A new user-initiated exchange clears everything and the same location
    // scrolls again.
    annotator.reset(&mut state);
    assert!(state.highlights().is_empty());
    assert_eq!(state.scroll_request(), None);

    annotator.ingest("back to [[left|line 7]]", &mut state);
    renderer.sync(&mut state, &mut surface, start + 2 * SCROLL_SETTLE_DELAY);
    assert_eq!(surface.revealed, vec![7, 7]);
}

#[tokio::test(start_paused = true)]
async fn scripted_analysis_stream_drives_the_full_pipeline() {
    let service = ScriptedReviewer::new(tokio::runtime::Handle::current());
    let workspace = Workspace::default();
    let mut rx = service.stream_chat(diff_analysis_prompt(&workspace));

    let mut annotator = Annotator::new();
    let mut state = HighlightState::new();
    let mut buffer = String::new();
    let mut display_text = String::new();

    loop {
        match rx.recv().await.expect("stream yields a terminal event") {
            StreamEvent::Chunk(chunk) => {
                buffer.push_str(&chunk);
                display_text = annotator.ingest(&buffer, &mut state).display_text;
            }
            StreamEvent::Done => break,
            StreamEvent::Failed(err) => panic!("unexpected failure: {err}"),
        }
    }

    // All tags were replaced by labels in the display text.
    assert!(!display_text.contains("[["));
    assert!(display_text.contains("L1-3"));
    assert!(display_text.contains("L5-9"));
    assert!(display_text.contains("L6"));

    let highlights = state.highlights();
    assert_eq!(highlights.len(), 3);
    assert_eq!(highlights[0].side(), PanelSide::Right);
    assert_eq!(highlights[0].range().start(), 1);
    assert_eq!(highlights[0].range().end(), 3);
    assert_eq!(highlights[1].side(), PanelSide::Left);
    assert_eq!(highlights[2].side(), PanelSide::Right);

    // No renderer ran, so the first-highlight directive is still outstanding.
    let target = state.scroll_request().expect("scroll directive");
    assert_eq!(target.side(), PanelSide::Right);
    assert_eq!(target.line(), 1);
}
