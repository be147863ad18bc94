// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Style};
use rstest::rstest;
use smol_str::SmolStr;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::{
    launch_editor_command, shell_single_quote, styled_rows, App, Focus, PanelView, ViewMode,
};
use crate::annotate::InlineRef;
use crate::chat::{GenerationService, StreamEvent};
use crate::editor::{Decoration, EditorSurface};
use crate::model::{LineRange, PanelSide, Workspace};

fn view(total_lines: u32, viewport_height: u16) -> PanelView {
    let mut view = PanelView::new();
    view.total_lines = total_lines;
    view.viewport_height = viewport_height;
    view
}

#[test]
fn reveal_centers_the_target_line() {
    let mut view = view(200, 20);
    view.reveal_line(100);
    assert_eq!(view.top_line, 90);
}

#[test]
fn reveal_near_the_top_clamps_to_line_one() {
    let mut view = view(200, 20);
    view.reveal_line(3);
    assert_eq!(view.top_line, 1);
}

#[test]
fn reveal_near_the_bottom_clamps_to_the_last_page() {
    let mut view = view(50, 20);
    view.reveal_line(49);
    // max_top = 50 - 20 + 1
    assert_eq!(view.top_line, 31);
}

#[test]
fn reveal_beyond_the_document_clamps_instead_of_overflowing() {
    let mut view = view(10, 20);
    view.reveal_line(9999);
    assert_eq!(view.top_line, 1);
}

#[rstest]
#[case(-100, 1)]
#[case(5, 6)]
#[case(1000, 81)]
fn scroll_by_clamps_to_document_bounds(#[case] delta: i32, #[case] expected_top: u32) {
    let mut view = view(100, 20);
    view.scroll_by(delta);
    assert_eq!(view.top_line, expected_top);
}

#[test]
fn replace_decorations_swaps_the_whole_set() {
    let mut view = view(30, 10);
    view.replace_decorations(&[Decoration::new(4, 8, SmolStr::new("highlight-left"))]);
    assert!(view.line_is_highlighted(4));
    assert!(view.line_is_highlighted(8));
    assert!(!view.line_is_highlighted(9));

    view.replace_decorations(&[]);
    assert!(!view.line_is_highlighted(4));
}

#[test]
fn focus_cycles_through_all_three_panes() {
    let mut focus = Focus::Chat;
    focus = focus.next();
    assert_eq!(focus, Focus::LeftPanel);
    focus = focus.next();
    assert_eq!(focus, Focus::RightPanel);
    focus = focus.next();
    assert_eq!(focus, Focus::Chat);
}

fn plain(rows: &[ratatui::text::Line<'static>]) -> Vec<String> {
    rows.iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect()
}

#[test]
fn styled_rows_hard_wraps_at_width() {
    let rows = styled_rows("abcdefghij", &[], 4, Style::default(), Style::default());
    assert_eq!(plain(&rows), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn styled_rows_breaks_at_newlines() {
    let rows = styled_rows("ab\ncd", &[], 10, Style::default(), Style::default());
    assert_eq!(plain(&rows), vec!["ab", "cd"]);
}

#[test]
fn styled_rows_styles_reference_spans() {
    // "see L4-8 here" with the label at bytes 4..8.
    let text = "see L4-8 here";
    let refs = vec![InlineRef {
        span: 4..8,
        side: PanelSide::Left,
        range: LineRange::new(4, 8),
    }];
    let base = Style::default();
    let ref_style = Style::default().fg(Color::Cyan);

    let rows = styled_rows(text, &refs, 80, base, ref_style);
    assert_eq!(rows.len(), 1);
    let spans = &rows[0].spans;
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].content.as_ref(), "see ");
    assert_eq!(spans[0].style, base);
    assert_eq!(spans[1].content.as_ref(), "L4-8");
    assert_eq!(spans[1].style, ref_style);
    assert_eq!(spans[2].content.as_ref(), " here");
    assert_eq!(spans[2].style, base);
}

#[test]
fn styled_rows_keeps_ref_style_across_a_wrap_boundary() {
    let text = "ab L4-8 cd";
    let refs = vec![InlineRef {
        span: 3..7,
        side: PanelSide::Left,
        range: LineRange::new(4, 8),
    }];
    let ref_style = Style::default().fg(Color::Cyan);

    // Width 5 splits the label across two rows; both halves stay styled.
    let rows = styled_rows(text, &refs, 5, Style::default(), ref_style);
    assert_eq!(plain(&rows), vec!["ab L4", "-8 cd"]);
    assert_eq!(rows[0].spans.last().unwrap().style, ref_style);
    assert_eq!(rows[1].spans.first().unwrap().style, ref_style);
}

#[test]
fn styled_rows_emits_a_single_empty_row_for_empty_text() {
    let rows = styled_rows("", &[], 10, Style::default(), Style::default());
    assert_eq!(plain(&rows), vec![""]);
}

/// A generation service whose streams never produce anything; key-handling tests
/// do not pump events.
struct SilentService;

impl GenerationService for SilentService {
    fn stream_chat(&self, _prompt: String) -> UnboundedReceiver<StreamEvent> {
        let (_tx, rx) = mpsc::unbounded_channel();
        rx
    }
}

fn app() -> App {
    App::new(Box::new(SilentService), Workspace::default(), None)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn press_ctrl(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::CONTROL));
}

#[test]
fn switching_view_modes_resets_annotation_state() {
    let mut app = app();
    app.annotator
        .ingest("see [[left|line 4-8]]", &mut app.highlight_state);
    assert!(!app.highlight_state.highlights().is_empty());
    assert!(app.highlight_state.scroll_request().is_some());

    press_ctrl(&mut app, KeyCode::Char('d'));
    assert_eq!(app.view_mode, ViewMode::VisualDiff);
    assert!(app.highlight_state.highlights().is_empty());
    assert_eq!(app.highlight_state.scroll_request(), None);

    // The reset also forgot the last-issued marker, so the same location
    // scrolls again in the new mode.
    app.annotator
        .ingest("see [[left|line 4-8]]", &mut app.highlight_state);
    assert!(app.highlight_state.scroll_request().is_some());

    press_ctrl(&mut app, KeyCode::Char('d'));
    assert_eq!(app.view_mode, ViewMode::Editor);
    assert!(app.highlight_state.highlights().is_empty());
}

#[test]
fn panel_rename_commits_on_enter_and_routes_all_input() {
    let mut app = app();
    app.focus = Focus::LeftPanel;

    press(&mut app, KeyCode::Char('r'));
    // Seeded with the current label; replace it wholesale.
    while app.label_edit.as_ref().is_some_and(|edit| !edit.buffer.is_empty()) {
        press(&mut app, KeyCode::Backspace);
    }
    for ch in "Draft notes".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    // 'q' routed to the rename buffer, not the quit binding.
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);

    assert!(app.label_edit.is_none());
    assert_eq!(app.workspace.panel(PanelSide::Left).label(), "Draft notes");
}

#[test]
fn panel_rename_cancels_on_esc() {
    let mut app = app();
    app.focus = Focus::RightPanel;
    let original = app.workspace.panel(PanelSide::Right).label().to_owned();

    press(&mut app, KeyCode::Char('r'));
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Esc);

    assert!(app.label_edit.is_none());
    assert_eq!(app.workspace.panel(PanelSide::Right).label(), original);
}

#[test]
fn empty_rename_leaves_the_label_unchanged() {
    let mut app = app();
    app.focus = Focus::LeftPanel;
    let original = app.workspace.panel(PanelSide::Left).label().to_owned();

    press(&mut app, KeyCode::Char('r'));
    while app.label_edit.as_ref().is_some_and(|edit| !edit.buffer.is_empty()) {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Enter);

    assert!(app.label_edit.is_none());
    assert_eq!(app.workspace.panel(PanelSide::Left).label(), original);
}

#[test]
fn editor_actions_are_gated_in_diff_view() {
    let mut app = app();
    app.focus = Focus::LeftPanel;
    press_ctrl(&mut app, KeyCode::Char('d'));

    press(&mut app, KeyCode::Char('e'));
    assert!(app.pending_external_action.is_none());
    press(&mut app, KeyCode::Char('r'));
    assert!(app.label_edit.is_none());
}

#[test]
fn shell_single_quote_escapes_embedded_quotes() {
    assert_eq!(shell_single_quote("/tmp/plain.txt"), "'/tmp/plain.txt'");
    assert_eq!(shell_single_quote("/tmp/it's.txt"), "'/tmp/it'\\''s.txt'");
}

#[test]
fn editor_launch_rejects_leading_dash_paths() {
    assert!(launch_editor_command("vi", std::path::Path::new("-rf")).is_err());
}
