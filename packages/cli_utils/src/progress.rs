//! Progress reporting for long-running scrapes.
//!
//! The pipeline only ever sees an `Arc<dyn ProgressCallback>`, so it has no
//! dependency on how progress is drawn.

/// Receiver for progress updates from a league run.
pub trait ProgressCallback: Send + Sync {
    /// Sets the number of pages expected, e.g. the players on a roster.
    fn set_total(&self, total: u64);

    /// Records `delta` more pages as done.
    fn inc(&self, delta: u64);

    /// Shows what is being worked on, such as the current player URL.
    fn set_message(&self, msg: String);

    /// Stops updating and leaves `msg` as the final line.
    fn finish(&self, msg: String);

    /// Stops updating and removes the indicator.
    fn finish_and_clear(&self);
}
