/// Statistics for one pass over the training samples.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean per-sample loss, each measured on the forward pass of its step.
    pub train_loss: f64,
    /// Divergence warnings raised during the epoch.
    pub warnings: usize,
    /// Wall-clock duration of the epoch in milliseconds.
    pub elapsed_ms: u64,
}
