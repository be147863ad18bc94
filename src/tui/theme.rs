// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

use crate::model::PanelSide;

/// Fixed dark-terminal palette for the workspace shell.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(Color::LightGreen)
        } else {
            self.base_style().fg(Color::DarkGray)
        }
    }

    /// Whole-line background for active highlights; the two sides get distinct
    /// colors so a glance tells which panel a reference lit up.
    pub(crate) fn highlight_style(&self, side: PanelSide) -> Style {
        let bg = match side {
            PanelSide::Left => Color::Rgb(36, 52, 84),
            PanelSide::Right => Color::Rgb(30, 64, 48),
        };
        self.base_style().bg(bg)
    }

    pub(crate) fn line_number_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    pub(crate) fn diff_removed_style(&self) -> Style {
        self.base_style().bg(Color::Rgb(74, 32, 32))
    }

    pub(crate) fn diff_added_style(&self) -> Style {
        self.base_style().bg(Color::Rgb(28, 66, 36))
    }

    pub(crate) fn diff_gap_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray)
    }

    pub(crate) fn inline_ref_style(&self) -> Style {
        self.base_style()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub(crate) fn user_prefix_style(&self) -> Style {
        self.base_style().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn assistant_prefix_style(&self) -> Style {
        self.base_style().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn toast_style(&self) -> Style {
        self.base_style().fg(Color::Black).bg(Color::Gray)
    }

    pub(crate) fn streaming_style(&self) -> Style {
        self.base_style().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    }
}
