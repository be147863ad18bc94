// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prompt construction for the generation service.
//!
//! The assistant is instructed to emit reference tags in the exact grammar the
//! extractor accepts, so its replies drive panel highlights directly.

use std::fmt::Write as _;

use super::Transcript;
use crate::model::{PanelSide, Workspace};

const ANNOTATION_GUIDE: &str = "When you refer to specific lines, embed a reference \
like [[left|line 12]] or [[right|line 4-8]] directly in your prose so the \
workspace can highlight and scroll to them.";

/// Full review prompt: conversation history, both panel bodies, and the user's
/// question.
pub fn review_prompt(transcript: &Transcript, workspace: &Workspace, input: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Conversation history:\n");
    for message in transcript.messages() {
        let _ = writeln!(prompt, "{}: {}", message.role().prompt_tag(), message.text());
    }

    prompt.push_str("\nYou are a specialized code reviewer.\n");
    push_panel(&mut prompt, workspace, PanelSide::Left, "Original code (left)");
    push_panel(&mut prompt, workspace, PanelSide::Right, "Modified code (right)");

    let _ = writeln!(prompt, "\nThe user is asking: \"{input}\"");
    prompt.push('\n');
    prompt.push_str(ANNOTATION_GUIDE);
    prompt
}

/// One-shot comparison prompt for the analyze-diff action.
pub fn diff_analysis_prompt(workspace: &Workspace) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Compare these two code snippets and give a professional, concise summary \
of the changes. Focus on performance, readability, and logic.\n",
    );
    push_panel(&mut prompt, workspace, PanelSide::Left, "Original");
    push_panel(&mut prompt, workspace, PanelSide::Right, "Modified");

    prompt.push('\n');
    prompt.push_str(ANNOTATION_GUIDE);
    prompt
}

fn push_panel(prompt: &mut String, workspace: &Workspace, side: PanelSide, heading: &str) {
    let panel = workspace.panel(side);
    let _ = writeln!(
        prompt,
        "\n{heading} [{}, {}]:\n{}",
        panel.label(),
        panel.language(),
        panel.text()
    );
}
