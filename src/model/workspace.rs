// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::panel::PanelSide;

/// One editable document: a user-facing label, a language id, and the text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EditorPanel {
    label: String,
    language: String,
    text: String,
}

impl EditorPanel {
    pub fn new(
        label: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            language: language.into(),
            text: text.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// The top-level container the TUI runs against: exactly two panels, keyed by
/// [`PanelSide`] (never by dynamic string lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Workspace {
    left: EditorPanel,
    right: EditorPanel,
}

impl Workspace {
    pub fn new(left: EditorPanel, right: EditorPanel) -> Self {
        Self { left, right }
    }

    pub fn panel(&self, side: PanelSide) -> &EditorPanel {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
        }
    }

    pub fn panel_mut(&mut self, side: PanelSide) -> &mut EditorPanel {
        match side {
            PanelSide::Left => &mut self.left,
            PanelSide::Right => &mut self.right,
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            left: EditorPanel::new("Instructions", "markdown", WELCOME_TEXT),
            right: EditorPanel::new("Scratch code", "python", SCRATCH_TEXT),
        }
    }
}

const WELCOME_TEXT: &str = "\
# Welcome to Duet

Duet is a dual-pane development workspace with a streaming review assistant.

### Key features
**Dual-pane editor**: work with two independent documents side by side.
**Inline references**: the assistant points at concrete lines and the panels
highlight and scroll to them as the reply streams in.
**Scripted demo**: run with --demo to try the workflow offline.

### How to get started
1. Put code into either panel.
2. Ask the assistant to compare or review the two sides.
3. Follow the highlighted lines as the answer arrives.
";

const SCRATCH_TEXT: &str = "\
def greet(name):
    \"\"\"Simple function to welcome you.\"\"\"
    return f\"Hello, {name}! Welcome to Duet.\"

# Try changing this or asking the assistant to refactor it.
print(greet(\"Developer\"))
";
