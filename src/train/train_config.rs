use crate::train::dataset::Sample;

/// Configuration for a `train_for` run.
///
/// # Fields
/// - `epochs`    — number of full passes over the samples
/// - `log_every` — emit an `info` progress line every this many epochs
///                 (and after the last one); `0` disables progress lines
/// - `monitor`   — optional example evaluated for each progress line, so the
///                 log shows a concrete prediction next to its target
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
    pub monitor: Option<Sample>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress logging and no monitor.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
            monitor: None,
        }
    }

    pub fn with_logging(mut self, log_every: usize, monitor: Option<Sample>) -> Self {
        self.log_every = log_every;
        self.monitor = monitor;
        self
    }
}
