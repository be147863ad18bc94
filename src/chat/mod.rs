// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chat transcript and the streaming assistant plumbing around the annotation
//! protocol.

pub mod prompt;
pub mod service;
pub mod stream;

pub use service::{GenerationService, ScriptedReviewer};
pub use stream::{ActiveResponse, StreamEvent};

use crate::annotate::InlineRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Uppercase tag used when serializing conversation history into a prompt.
    pub fn prompt_tag(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

/// One transcript entry. For assistant messages, `text` is the display text with
/// tags already replaced by labels, and `refs` carries the actionable references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    text: String,
    refs: Vec<InlineRef>,
}

impl ChatMessage {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn refs(&self) -> &[InlineRef] {
        &self.refs
    }
}

/// The conversation shown in the sidebar. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            text: text.into(),
            refs: Vec::new(),
        });
        id
    }

    /// Replaces the text and references of the message with the given id; returns
    /// false if the message no longer exists (e.g. the conversation was cleared
    /// while a stale stream still had events queued).
    pub fn update(&mut self, id: MessageId, text: String, refs: Vec<InlineRef>) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        message.text = text;
        message.refs = refs;
        true
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
