// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): two code panels side by side and a
//! chat sidebar. Each tick pumps pending stream events through the annotation
//! pipeline and then syncs both panel renderers, so a panel is never observed in a
//! partially-updated state.

use std::{
    env,
    error::Error,
    fs, io,
    path::{Path, PathBuf},
    process::Command,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use smallvec::SmallVec;

use crate::annotate::{Annotator, HighlightState, InlineRef};
use crate::chat::prompt::{diff_analysis_prompt, review_prompt};
use crate::chat::{ActiveResponse, GenerationService, Role, StreamEvent, Transcript};
use crate::editor::{diff_rows, Decoration, DiffRow, EditorSurface, PanelRenderer};
use crate::model::{PanelSide, Workspace};
use crate::store::WorkspaceFolder;

mod theme;

use theme::TuiTheme;

const POLL_TICK: Duration = Duration::from_millis(50);
const TOAST_TTL: Duration = Duration::from_secs(2);
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = " DUET ";
const LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "html",
    "css",
    "json",
    "markdown",
    "rust",
];

/// Runs the interactive workspace shell until the user quits.
pub fn run(
    service: Box<dyn GenerationService + Send>,
    workspace: Workspace,
    workspace_folder: Option<WorkspaceFolder>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(service, workspace, workspace_folder);

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(action) = app.take_external_action() {
                        let result =
                            terminal.run_external_action(|| app.execute_external_action(action));
                        if let Err(err) = result {
                            app.set_toast(format!("External edit failed: {err}"));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Chat,
    LeftPanel,
    RightPanel,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Chat => Self::LeftPanel,
            Self::LeftPanel => Self::RightPanel,
            Self::RightPanel => Self::Chat,
        }
    }
}

/// Which workspace view the two panel panes show: editable panels, or a
/// read-only side-by-side diff of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Editor,
    VisualDiff,
}

/// An in-progress panel rename; all key input routes here until Enter/Esc.
#[derive(Debug)]
struct LabelEdit {
    side: PanelSide,
    buffer: String,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy)]
enum ExternalAction {
    EditPanel(PanelSide),
}

/// The in-process editor widget: a scrollable viewport over one panel's text plus
/// the decoration set most recently applied by the renderer.
#[derive(Debug)]
struct PanelView {
    top_line: u32,
    viewport_height: u16,
    total_lines: u32,
    decorations: SmallVec<[Decoration; 4]>,
}

impl PanelView {
    fn new() -> Self {
        Self {
            top_line: 1,
            viewport_height: 0,
            total_lines: 0,
            decorations: SmallVec::new(),
        }
    }

    fn max_top(&self) -> u32 {
        self.total_lines
            .saturating_sub(u32::from(self.viewport_height))
            .saturating_add(1)
            .max(1)
    }

    fn clamp_top(&mut self) {
        self.top_line = self.top_line.clamp(1, self.max_top());
    }

    fn scroll_by(&mut self, delta: i32) {
        let top = i64::from(self.top_line) + i64::from(delta);
        self.top_line = top.clamp(1, i64::from(self.max_top())) as u32;
    }

    fn line_is_highlighted(&self, line: u32) -> bool {
        self.decorations.iter().any(|d| d.covers_line(line))
    }
}

impl EditorSurface for PanelView {
    fn replace_decorations(&mut self, decorations: &[Decoration]) {
        self.decorations = decorations.iter().cloned().collect();
    }

    fn reveal_line(&mut self, line: u32) {
        // Center the target; out-of-range lines clamp to the last page.
        let half = u32::from(self.viewport_height / 2);
        self.top_line = line.saturating_sub(half).max(1);
        self.clamp_top();
    }
}

struct App {
    service: Box<dyn GenerationService + Send>,
    workspace: Workspace,
    workspace_folder: Option<WorkspaceFolder>,
    highlight_state: HighlightState,
    annotator: Annotator,
    left_renderer: PanelRenderer,
    right_renderer: PanelRenderer,
    left_view: PanelView,
    right_view: PanelView,
    diff_view: PanelView,
    view_mode: ViewMode,
    label_edit: Option<LabelEdit>,
    transcript: Transcript,
    input: String,
    active_response: Option<ActiveResponse>,
    focus: Focus,
    theme: TuiTheme,
    toast: Option<Toast>,
    pending_external_action: Option<ExternalAction>,
    should_quit: bool,
}

impl App {
    fn new(
        service: Box<dyn GenerationService + Send>,
        workspace: Workspace,
        workspace_folder: Option<WorkspaceFolder>,
    ) -> Self {
        Self {
            service,
            workspace,
            workspace_folder,
            highlight_state: HighlightState::new(),
            annotator: Annotator::new(),
            left_renderer: PanelRenderer::new(PanelSide::Left),
            right_renderer: PanelRenderer::new(PanelSide::Right),
            left_view: PanelView::new(),
            right_view: PanelView::new(),
            diff_view: PanelView::new(),
            view_mode: ViewMode::Editor,
            label_edit: None,
            transcript: Transcript::new(),
            input: String::new(),
            active_response: None,
            focus: Focus::Chat,
            theme: TuiTheme,
            toast: None,
            pending_external_action: None,
            should_quit: false,
        }
    }

    fn view_mut(&mut self, side: PanelSide) -> &mut PanelView {
        match side {
            PanelSide::Left => &mut self.left_view,
            PanelSide::Right => &mut self.right_view,
        }
    }

    /// The viewport scrolled by panel keys: the per-side editor view, or the
    /// shared (scroll-locked) diff view.
    fn active_view_mut(&mut self, side: PanelSide) -> &mut PanelView {
        match self.view_mode {
            ViewMode::Editor => self.view_mut(side),
            ViewMode::VisualDiff => &mut self.diff_view,
        }
    }

    fn tick(&mut self, now: Instant) {
        self.pump_stream();
        self.left_renderer
            .sync(&mut self.highlight_state, &mut self.left_view, now);
        self.right_renderer
            .sync(&mut self.highlight_state, &mut self.right_view, now);

        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }
    }

    /// Drains every event queued by the in-flight response. Each chunk triggers a
    /// full re-scan of the accumulated buffer; the transcript entry and the shared
    /// highlight state are updated in the same step.
    fn pump_stream(&mut self) {
        loop {
            let Some(active) = self.active_response.as_mut() else {
                return;
            };
            let Some(event) = active.poll_event() else {
                return;
            };

            match event {
                StreamEvent::Chunk(chunk) => {
                    active.append_chunk(&chunk);
                    let message_id = active.message_id();
                    let buffer = active.buffer().to_owned();
                    let extraction = self.annotator.ingest(&buffer, &mut self.highlight_state);
                    self.transcript
                        .update(message_id, extraction.display_text, extraction.refs);
                }
                StreamEvent::Done => {
                    self.active_response = None;
                    return;
                }
                StreamEvent::Failed(message) => {
                    // Terminal for this response; whatever was already applied
                    // stays as-is.
                    self.active_response = None;
                    self.set_toast(format!("Assistant error: {message}"));
                    return;
                }
            }
        }
    }

    /// Starts a new user-initiated exchange. A still-emitting previous stream is
    /// superseded first (its channel is dropped, late chunks go nowhere), then the
    /// annotation state is hard-reset before any new extraction.
    fn begin_exchange(&mut self, user_text: String, prompt: String) {
        self.active_response = None;
        self.annotator.reset(&mut self.highlight_state);

        self.transcript.push(Role::User, user_text);
        let message_id = self.transcript.push(Role::Assistant, "");
        let rx = self.service.stream_chat(prompt);
        self.active_response = Some(ActiveResponse::new(message_id, rx));
    }

    fn send_input(&mut self) {
        let text = self.input.trim().to_owned();
        if text.is_empty() {
            return;
        }
        self.input.clear();

        let prompt = review_prompt(&self.transcript, &self.workspace, &text);
        self.begin_exchange(text, prompt);
    }

    fn analyze_diff(&mut self) {
        let prompt = diff_analysis_prompt(&self.workspace);
        self.begin_exchange("Analyze current diff".to_owned(), prompt);
    }

    fn clear_conversation(&mut self) {
        self.active_response = None;
        self.annotator.reset(&mut self.highlight_state);
        self.transcript.clear();
        self.set_toast("Conversation cleared");
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('l') => self.clear_conversation(),
                KeyCode::Char('a') => self.analyze_diff(),
                KeyCode::Char('d') => self.toggle_view_mode(),
                _ => {}
            }
            return;
        }

        if self.label_edit.is_some() {
            self.handle_label_edit_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            _ => match self.focus {
                Focus::Chat => self.handle_chat_key(key.code),
                Focus::LeftPanel => self.handle_panel_key(PanelSide::Left, key.code),
                Focus::RightPanel => self.handle_panel_key(PanelSide::Right, key.code),
            },
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.send_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.focus = Focus::LeftPanel,
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, side: PanelSide, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.active_view_mut(side).scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.active_view_mut(side).scroll_by(1),
            KeyCode::PageUp => {
                let page = i32::from(self.active_view_mut(side).viewport_height);
                self.active_view_mut(side).scroll_by(-page);
            }
            KeyCode::PageDown => {
                let page = i32::from(self.active_view_mut(side).viewport_height);
                self.active_view_mut(side).scroll_by(page);
            }
            KeyCode::Home => {
                self.active_view_mut(side).top_line = 1;
            }
            KeyCode::Char('n') => {
                if self.in_editor_view() {
                    self.jump_to_first_highlight(side);
                }
            }
            KeyCode::Char('l') => {
                if self.in_editor_view() {
                    self.cycle_language(side);
                }
            }
            KeyCode::Char('r') => {
                if self.in_editor_view() {
                    self.label_edit = Some(LabelEdit {
                        side,
                        buffer: self.workspace.panel(side).label().to_owned(),
                    });
                }
            }
            KeyCode::Char('e') => {
                if self.in_editor_view() {
                    self.pending_external_action = Some(ExternalAction::EditPanel(side));
                }
            }
            _ => {}
        }
    }

    fn handle_label_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let Some(edit) = self.label_edit.take() else {
                    return;
                };
                let label = edit.buffer.trim().to_owned();
                if label.is_empty() {
                    self.set_toast("Rename cancelled (empty label)");
                    return;
                }
                self.workspace.panel_mut(edit.side).set_label(label);
                self.save_workspace();
                self.set_toast(format!("Renamed {} panel", edit.side));
            }
            KeyCode::Esc => self.label_edit = None,
            KeyCode::Backspace => {
                if let Some(edit) = self.label_edit.as_mut() {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = self.label_edit.as_mut() {
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Switching views is a reset boundary: highlights, the outstanding scroll
    /// directive, and the last-issued marker never carry across modes.
    fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Editor => ViewMode::VisualDiff,
            ViewMode::VisualDiff => ViewMode::Editor,
        };
        self.annotator.reset(&mut self.highlight_state);
        self.label_edit = None;
        self.diff_view.top_line = 1;
        self.set_toast(match self.view_mode {
            ViewMode::Editor => "View: editor",
            ViewMode::VisualDiff => "View: visual diff",
        });
    }

    fn in_editor_view(&mut self) -> bool {
        if self.view_mode == ViewMode::VisualDiff {
            self.set_toast("Switch to editor view (^D) first");
            false
        } else {
            true
        }
    }

    fn jump_to_first_highlight(&mut self, side: PanelSide) {
        let Some(highlight) = self
            .highlight_state
            .highlights()
            .iter()
            .find(|highlight| highlight.side() == side)
            .copied()
        else {
            self.set_toast("No highlights for this panel");
            return;
        };
        self.view_mut(side).reveal_line(highlight.range().start().max(1));
    }

    fn cycle_language(&mut self, side: PanelSide) {
        let panel = self.workspace.panel_mut(side);
        let next = LANGUAGES
            .iter()
            .position(|lang| *lang == panel.language())
            .map(|idx| (idx + 1) % LANGUAGES.len())
            .unwrap_or(0);
        panel.set_language(LANGUAGES[next]);
        let language = LANGUAGES[next];
        self.save_workspace();
        self.set_toast(format!("{side} language: {language}"));
    }

    fn take_external_action(&mut self) -> Option<ExternalAction> {
        self.pending_external_action.take()
    }

    fn execute_external_action(&mut self, action: ExternalAction) -> Result<(), String> {
        match action {
            ExternalAction::EditPanel(side) => self.edit_panel_in_editor(side),
        }
    }

    /// Opens the panel body in `$VISUAL`/`$EDITOR` while the TUI is suspended, and
    /// applies the result on save-and-exit.
    fn edit_panel_in_editor(&mut self, side: PanelSide) -> Result<(), String> {
        let original = self.workspace.panel(side).text().to_owned();
        let temp_path = write_temp_panel_file(side, &original)?;
        let editor_command = resolve_editor_command();

        let launch_result = launch_editor_command(&editor_command, &temp_path);
        let edited = fs::read_to_string(&temp_path).map_err(|err| {
            format!("failed reading edited panel from {}: {err}", temp_path.display())
        });
        let _ = fs::remove_file(&temp_path);

        launch_result?;
        let edited = edited?;

        if edited == original {
            self.set_toast(format!("Edit cancelled (no changes): {side} panel"));
            return Ok(());
        }

        self.workspace.panel_mut(side).set_text(edited);
        self.save_workspace();
        self.set_toast(format!("Updated {side} panel"));
        Ok(())
    }

    fn save_workspace(&mut self) {
        let Some(folder) = self.workspace_folder.as_ref() else {
            return;
        };
        if let Err(err) = folder.save_workspace(&self.workspace) {
            self.set_toast(format!("Save failed: {err}"));
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let main_area = rows[0];
    let footer_area = rows[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(main_area);

    match app.view_mode {
        ViewMode::Editor => {
            let left_edit = match &app.label_edit {
                Some(edit) if edit.side == PanelSide::Left => Some(edit.buffer.as_str()),
                _ => None,
            };
            let right_edit = match &app.label_edit {
                Some(edit) if edit.side == PanelSide::Right => Some(edit.buffer.as_str()),
                _ => None,
            };
            draw_panel(
                frame,
                &app.workspace,
                &mut app.left_view,
                &app.theme,
                PanelSide::Left,
                app.focus == Focus::LeftPanel,
                left_edit,
                panes[0],
            );
            draw_panel(
                frame,
                &app.workspace,
                &mut app.right_view,
                &app.theme,
                PanelSide::Right,
                app.focus == Focus::RightPanel,
                right_edit,
                panes[1],
            );
        }
        ViewMode::VisualDiff => {
            let rows = diff_rows(
                app.workspace.panel(PanelSide::Left).text(),
                app.workspace.panel(PanelSide::Right).text(),
            );
            app.diff_view.total_lines = rows.len() as u32;
            draw_diff_column(
                frame,
                &app.workspace,
                &mut app.diff_view,
                &app.theme,
                &rows,
                PanelSide::Left,
                app.focus == Focus::LeftPanel,
                panes[0],
            );
            draw_diff_column(
                frame,
                &app.workspace,
                &mut app.diff_view,
                &app.theme,
                &rows,
                PanelSide::Right,
                app.focus == Focus::RightPanel,
                panes[1],
            );
        }
    }
    draw_chat(frame, app, panes[2]);
    draw_footer(frame, footer_area);

    if let Some(toast) = &app.toast {
        draw_toast(frame, &app.theme, &toast.message, main_area);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_panel(
    frame: &mut Frame<'_>,
    workspace: &Workspace,
    view: &mut PanelView,
    theme: &TuiTheme,
    side: PanelSide,
    focused: bool,
    editing_label: Option<&str>,
    area: Rect,
) {
    let panel = workspace.panel(side);
    let title = match editing_label {
        Some(buffer) => format!(" {buffer}_ · {} ", panel.language()),
        None => format!(" {} · {} ", panel.label(), panel.language()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    view.viewport_height = inner.height;
    view.total_lines = panel.line_count() as u32;
    view.clamp_top();

    let number_width = decimal_width(view.total_lines).max(3);
    let top = view.top_line;
    let mut lines = Vec::with_capacity(inner.height as usize);
    for (offset, body) in panel
        .text()
        .lines()
        .skip(top.saturating_sub(1) as usize)
        .take(inner.height as usize)
        .enumerate()
    {
        let line_no = top + offset as u32;
        let base = if view.line_is_highlighted(line_no) {
            theme.highlight_style(side)
        } else {
            theme.base_style()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{line_no:>number_width$} "),
                base.patch(theme.line_number_style()),
            ),
            Span::styled(body.to_owned(), base),
        ]));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

#[allow(clippy::too_many_arguments)]
fn draw_diff_column(
    frame: &mut Frame<'_>,
    workspace: &Workspace,
    diff_view: &mut PanelView,
    theme: &TuiTheme,
    rows: &[DiffRow],
    side: PanelSide,
    focused: bool,
    area: Rect,
) {
    let panel = workspace.panel(side);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} · diff ", panel.label()))
        .border_style(theme.panel_border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    diff_view.viewport_height = inner.height;
    diff_view.clamp_top();

    let text_lines: Vec<&str> = panel.text().lines().collect();
    let number_width = decimal_width(text_lines.len() as u32).max(3);
    let top = diff_view.top_line;
    let mut lines = Vec::with_capacity(inner.height as usize);
    for row in rows
        .iter()
        .skip(top.saturating_sub(1) as usize)
        .take(inner.height as usize)
    {
        lines.push(diff_line(row, side, &text_lines, number_width, theme));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Renders one aligned diff row for one column. Rows owned by the other side
/// become a gap marker, so the two columns stay vertically aligned.
fn diff_line(
    row: &DiffRow,
    side: PanelSide,
    text_lines: &[&str],
    number_width: usize,
    theme: &TuiTheme,
) -> Line<'static> {
    let cell = match (row, side) {
        (DiffRow::Same { left, .. }, PanelSide::Left) => Some((*left, theme.base_style())),
        (DiffRow::Same { right, .. }, PanelSide::Right) => Some((*right, theme.base_style())),
        (DiffRow::Removed { left }, PanelSide::Left) => Some((*left, theme.diff_removed_style())),
        (DiffRow::Added { right }, PanelSide::Right) => Some((*right, theme.diff_added_style())),
        _ => None,
    };

    match cell {
        Some((line_no, style)) => {
            let body = text_lines
                .get(line_no.saturating_sub(1) as usize)
                .copied()
                .unwrap_or("");
            Line::from(vec![
                Span::styled(
                    format!("{line_no:>number_width$} "),
                    style.patch(theme.line_number_style()),
                ),
                Span::styled(body.to_owned(), style),
            ])
        }
        None => Line::from(Span::styled(
            format!("{:>number_width$} ·", ""),
            theme.diff_gap_style(),
        )),
    }
}

fn draw_chat(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let transcript_area = parts[0];
    let input_area = parts[1];

    let focused = app.focus == Focus::Chat;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Assistant ")
        .border_style(app.theme.panel_border_style(focused));
    let inner = block.inner(transcript_area);
    frame.render_widget(block, transcript_area);

    let width = inner.width.max(1) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.transcript.messages() {
        let (prefix, style) = match message.role() {
            Role::User => ("You", app.theme.user_prefix_style()),
            Role::Assistant => ("Duet", app.theme.assistant_prefix_style()),
        };
        lines.push(Line::from(Span::styled(prefix.to_owned(), style)));
        lines.extend(styled_rows(
            message.text(),
            message.refs(),
            width,
            app.theme.base_style(),
            app.theme.inline_ref_style(),
        ));
        lines.push(Line::default());
    }
    if app.active_response.is_some() {
        lines.push(Line::from(Span::styled(
            "…".to_owned(),
            app.theme.streaming_style(),
        )));
    }

    let scroll = lines.len().saturating_sub(inner.height as usize) as u16;
    frame.render_widget(
        Paragraph::new(Text::from(lines)).scroll((scroll, 0)),
        inner,
    );

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(focused));
    let input_inner = input_block.inner(input_area);
    frame.render_widget(input_block, input_area);
    frame.render_widget(
        Paragraph::new(format!("> {}", app.input)),
        input_inner,
    );
    if focused {
        let cursor_x = input_inner
            .x
            .saturating_add(2)
            .saturating_add(app.input.chars().count() as u16)
            .min(input_inner.right().saturating_sub(1));
        frame.set_cursor(cursor_x, input_inner.y);
    }
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(FOOTER_KEY_COLOR);
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    let line = Line::from(vec![
        Span::styled(FOOTER_BRAND, Style::default().fg(FOOTER_BRAND_COLOR)),
        Span::styled("Tab", key),
        Span::styled(" focus · ", label),
        Span::styled("Enter", key),
        Span::styled(" send · ", label),
        Span::styled("^A", key),
        Span::styled(" analyze · ", label),
        Span::styled("^D", key),
        Span::styled(" diff · ", label),
        Span::styled("^L", key),
        Span::styled(" clear · ", label),
        Span::styled("e", key),
        Span::styled(" edit panel · ", label),
        Span::styled("r", key),
        Span::styled(" rename · ", label),
        Span::styled("n", key),
        Span::styled(" jump · ", label),
        Span::styled("q", key),
        Span::styled(" quit", label),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_toast(frame: &mut Frame<'_>, theme: &TuiTheme, message: &str, area: Rect) {
    let width = (message.chars().count() as u16 + 2).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(2),
        width,
        height: 1,
    };
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(format!(" {message} ")).style(theme.toast_style()),
        toast_area,
    );
}

/// Pre-wrapped, styled rows for one chat message: hard-wraps at `width` characters,
/// breaks at newlines, and styles inline reference labels by their byte spans.
fn styled_rows(
    text: &str,
    refs: &[InlineRef],
    width: usize,
    base: Style,
    ref_style: Style,
) -> Vec<Line<'static>> {
    fn flush_segment(row: &mut Vec<Span<'static>>, segment: &mut String, style: Style) {
        if !segment.is_empty() {
            row.push(Span::styled(std::mem::take(segment), style));
        }
    }

    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut segment = String::new();
    let mut segment_style = base;
    let mut column = 0usize;
    let mut ref_idx = 0usize;

    for (pos, ch) in text.char_indices() {
        while ref_idx < refs.len() && refs[ref_idx].span.end <= pos {
            ref_idx += 1;
        }
        let in_ref = ref_idx < refs.len() && refs[ref_idx].span.contains(&pos);
        let style = if in_ref { ref_style } else { base };

        if ch == '\n' {
            flush_segment(&mut row, &mut segment, segment_style);
            rows.push(Line::from(std::mem::take(&mut row)));
            column = 0;
            segment_style = style;
            continue;
        }

        if style != segment_style {
            flush_segment(&mut row, &mut segment, segment_style);
            segment_style = style;
        }
        if column >= width {
            flush_segment(&mut row, &mut segment, segment_style);
            rows.push(Line::from(std::mem::take(&mut row)));
            column = 0;
        }

        segment.push(ch);
        column += 1;
    }

    flush_segment(&mut row, &mut segment, segment_style);
    if !row.is_empty() || rows.is_empty() {
        rows.push(Line::from(row));
    }
    rows
}

fn decimal_width(value: u32) -> usize {
    let mut buf = itoa::Buffer::new();
    buf.format(value).len()
}

fn resolve_editor_command() -> String {
    env::var("VISUAL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            env::var("EDITOR")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| "vi".to_owned())
}

fn write_temp_panel_file(side: PanelSide, text: &str) -> Result<PathBuf, String> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = env::temp_dir().join(format!(
        "duet-panel-{side}-{}-{nanos}.txt",
        std::process::id()
    ));
    fs::write(&path, text)
        .map_err(|err| format!("failed writing {}: {err}", path.display()))?;
    Ok(path)
}

fn launch_editor_command(command: &str, path: &Path) -> Result<(), String> {
    let path_text = path.to_string_lossy();
    if path_text.starts_with('-') {
        return Err("invalid editor temp path".to_owned());
    }

    let status = Command::new("sh")
        .arg("-lc")
        .arg(format!("{command} {}", shell_single_quote(path_text.as_ref())))
        .status()
        .map_err(|err| format!("failed launching editor ({command}): {err}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("editor exited with {status}"))
    }
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    fn run_external_action(
        &mut self,
        action: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), String> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)
            .map_err(|err| format!("terminal suspend failed: {err}"))?;
        action()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            let _ = ratatui::backend::Backend::flush(terminal.backend_mut());
            return Err(err);
        }

        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.hide_cursor();
        let _ = self.terminal.clear();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
