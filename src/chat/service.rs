// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Duet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Duet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::stream::StreamEvent;

/// Seam for the hosted text-generation API.
///
/// The service returns an asynchronous sequence of UTF-8 fragments; nothing is
/// assumed about pacing or chunk boundaries. Stream failures surface as a terminal
/// [`StreamEvent::Failed`]; retry policy, if any, belongs to the calling layer.
pub trait GenerationService {
    fn stream_chat(&self, prompt: String) -> UnboundedReceiver<StreamEvent>;
}

/// Built-in offline reviewer used by `--demo`: streams a canned reply word by word
/// with jittered pacing, mimicking a hosted API closely enough to exercise the
/// whole annotation pipeline, chunk-boundary straddling included.
#[derive(Debug, Clone)]
pub struct ScriptedReviewer {
    runtime: Handle,
}

impl ScriptedReviewer {
    /// `runtime` is used to spawn the pacing task; the TUI itself runs on a
    /// blocking thread outside any runtime context.
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl GenerationService for ScriptedReviewer {
    fn stream_chat(&self, prompt: String) -> UnboundedReceiver<StreamEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let reply = reply_for(&prompt).to_owned();

        self.runtime.spawn(async move {
            for (idx, word) in reply.split(' ').enumerate() {
                let chunk = if idx == 0 {
                    word.to_owned()
                } else {
                    format!(" {word}")
                };
                if tx.send(StreamEvent::Chunk(chunk)).is_err() {
                    // Receiver dropped: this response was superseded.
                    return;
                }
                tokio::time::sleep(chunk_pacing(idx)).await;
            }
            let _ = tx.send(StreamEvent::Done);
        });

        rx
    }
}

// 30-90ms per word, deterministically jittered so the demo feels like a live
// stream without pulling in a random number generator.
fn chunk_pacing(idx: usize) -> Duration {
    let jitter = (idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 58;
    Duration::from_millis(30 + jitter)
}

fn reply_for(prompt: &str) -> &'static str {
    let lowered = prompt.to_lowercase();
    if lowered.contains("analyze") || lowered.contains("compare these two code snippets") {
        ANALYSIS_REPLY
    } else if lowered.contains("bug") || lowered.contains("error") {
        BUG_REPLY
    } else {
        GENERIC_REPLY
    }
}

const ANALYSIS_REPLY: &str = "I compared both panels. The core of the change is the \
function definition at [[right|line 1-3]], which replaces the longer setup \
described at [[left|line 5-9]]. The new version reads better and avoids the \
repeated work; the final call at [[right|line 6]] is unchanged in behavior.";

const BUG_REPLY: &str = "The suspicious part is the string formatting at \
[[right|line 3]]: if the name is empty the greeting comes out malformed. Guard it \
near [[right|line 2]] and keep the usage notes from [[left|line 1-4]] in sync.";

const GENERIC_REPLY: &str = "Here is a quick review. The intent documented at \
[[left|line 3-6]] matches the implementation, and the entry point at \
[[right|line 1]] is a reasonable place to start reading. Ask me to analyze the \
diff for a line-by-line comparison.";
