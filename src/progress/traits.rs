/// Receiver of pipeline progress messages.
///
/// Implementations decide where the text goes (stdout, nowhere, a buffer
/// for tests). Methods must be cheap and must not fail.
pub trait ProgressSink {
    /// A pipeline stage is starting.
    fn start_stage(&self, name: &str);

    /// An informational line within the current stage.
    fn message(&self, text: &str);

    /// The named stage finished successfully.
    fn complete_stage(&self, name: &str);

    /// Something worth flagging that does not stop the run.
    fn warn(&self, text: &str);
}
