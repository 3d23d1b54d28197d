//! Human-readable progress output for a pipeline run.
//!
//! A front-end that spawns the engine streams stdout and shows it to the
//! user, so progress is plain text lines rather than progress bars.

pub mod implementations;
pub mod traits;

pub use implementations::{CliProgressSink, ProgressEvent, RecordingProgressSink, SilentProgressSink};
pub use traits::ProgressSink;
