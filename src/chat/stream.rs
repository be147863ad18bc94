// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::MessageId;

/// One fragment of an in-flight assistant response. Chunk boundaries carry no
/// meaning; fragments are concatenated in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Chunk(String),
    Done,
    Failed(String),
}

/// The single in-flight response: the transcript slot it fills, the accumulated
/// generation buffer (monotonic append until completion), and the event channel.
///
/// Dropping an `ActiveResponse` supersedes its stream: late chunks from the
/// abandoned response go nowhere and can never repopulate state after a reset.
#[derive(Debug)]
pub struct ActiveResponse {
    message_id: MessageId,
    buffer: String,
    rx: UnboundedReceiver<StreamEvent>,
}

impl ActiveResponse {
    pub fn new(message_id: MessageId, rx: UnboundedReceiver<StreamEvent>) -> Self {
        Self {
            message_id,
            buffer: String::new(),
            rx,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn append_chunk(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    /// Non-blocking poll for the next event. A closed channel without a terminal
    /// event is reported as a failure, so the caller always sees the stream end.
    pub fn poll_event(&mut self) -> Option<StreamEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(StreamEvent::Failed(
                "generation stream closed before completion".to_owned(),
            )),
        }
    }
}
