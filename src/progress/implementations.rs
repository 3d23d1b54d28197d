//! Progress sink implementations for different output modes.
//!
//! - [`SilentProgressSink`]: no output, for library use and tests
//! - [`CliProgressSink`]: plain lines on stdout
//! - [`RecordingProgressSink`]: captures events for assertions
//!
//! # Example
//!
//! ```rust
//! use simgraph::progress::{ProgressEvent, ProgressSink, RecordingProgressSink};
//!
//! let recorder = RecordingProgressSink::new();
//! recorder.start_stage("Pruning");
//! recorder.message("3 edges removed");
//! recorder.complete_stage("Pruning");
//!
//! let events = recorder.events();
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[0], ProgressEvent::StartStage { .. }));
//! ```

use super::traits::ProgressSink;
use std::sync::Mutex;

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgressSink;

impl ProgressSink for SilentProgressSink {
    fn start_stage(&self, _name: &str) {}
    fn message(&self, _text: &str) {}
    fn complete_stage(&self, _name: &str) {}
    fn warn(&self, _text: &str) {}
}

/// Writes progress lines to stdout, where the spawning front-end reads them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgressSink;

impl ProgressSink for CliProgressSink {
    fn start_stage(&self, name: &str) {
        println!("{}...", name);
    }

    fn message(&self, text: &str) {
        println!("  {}", text);
    }

    fn complete_stage(&self, name: &str) {
        tracing::debug!(stage = name, "stage complete");
    }

    fn warn(&self, text: &str) {
        println!("  Warning: {}", text);
    }
}

/// A recorded progress call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    StartStage { name: String },
    Message { text: String },
    CompleteStage { name: String },
    Warning { text: String },
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.lock().clone()
    }

    /// All message texts, in order
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Message { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProgressEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressSink for RecordingProgressSink {
    fn start_stage(&self, name: &str) {
        self.push(ProgressEvent::StartStage {
            name: name.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.push(ProgressEvent::Message {
            text: text.to_string(),
        });
    }

    fn complete_stage(&self, name: &str) {
        self.push(ProgressEvent::CompleteStage {
            name: name.to_string(),
        });
    }

    fn warn(&self, text: &str) {
        self.push(ProgressEvent::Warning {
            text: text.to_string(),
        });
    }
}
