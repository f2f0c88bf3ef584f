use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::dataset::Sample;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Runs `train_step` once per sample, in order. Returns the mean loss and
/// the number of divergence warnings; `epoch`/`total_epochs` are left at 1.
///
/// Stops at the first error (shape mismatch, NaN in the forward pass, or
/// divergence under the `Abort` policy).
pub fn train_epoch(network: &mut Network, samples: &[Sample]) -> Result<EpochStats> {
    let t_start = Instant::now();
    let mut total_loss = 0.0;
    let mut warnings = 0;

    for sample in samples {
        let report = network.train_step(&sample.inputs, &sample.targets)?;
        total_loss += report.loss;
        warnings += report.warnings.len();
    }

    let train_loss = if samples.is_empty() { 0.0 } else { total_loss / samples.len() as f64 };
    Ok(EpochStats {
        epoch: 1,
        total_epochs: 1,
        train_loss,
        warnings,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    })
}

/// Trains for `config.epochs` epochs and returns the stats of the last one,
/// or `None` when `config.epochs == 0`.
pub fn train_for(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
) -> Result<Option<EpochStats>> {
    let mut last = None;

    for epoch in 1..=config.epochs {
        let mut stats = train_epoch(network, samples)?;
        stats.epoch = epoch;
        stats.total_epochs = config.epochs;

        let due = config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs);
        if due {
            match &config.monitor {
                Some(monitor) => {
                    let prediction = network.evaluate(&monitor.inputs)?.to_vec();
                    info!(
                        epoch,
                        loss = stats.train_loss,
                        warnings = stats.warnings,
                        inputs = ?monitor.inputs,
                        prediction = ?prediction,
                        targets = ?monitor.targets,
                        "training progress"
                    );
                }
                None => info!(
                    epoch,
                    loss = stats.train_loss,
                    warnings = stats.warnings,
                    "training progress"
                ),
            }
        }

        last = Some(stats);
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::strategy::InitStrategy;
    use crate::train::dataset::{arithmetic_grid, Operation};

    #[test]
    fn epoch_loss_falls_on_addition_grid() {
        let mut net = Network::build(2, 2, 1, 1e-3, &InitStrategy::Constant { value: 1.0 }).unwrap();
        let samples = arithmetic_grid(Operation::Addition, 10);
        let first = train_epoch(&mut net, &samples).unwrap();
        let later = train_for(&mut net, &samples, &TrainConfig::new(20)).unwrap().unwrap();
        assert_eq!(later.epoch, 20);
        assert_eq!(later.warnings, 0);
        assert!(later.train_loss < first.train_loss);
    }

    #[test]
    fn zero_epochs_leaves_network_alone() {
        let mut net = Network::build(2, 2, 1, 1e-3, &InitStrategy::Constant { value: 1.0 }).unwrap();
        let before = net.clone();
        let samples = arithmetic_grid(Operation::Addition, 2);
        assert!(train_for(&mut net, &samples, &TrainConfig::new(0)).unwrap().is_none());
        assert_eq!(net, before);
    }

    #[test]
    fn shape_errors_stop_the_epoch() {
        let mut net = Network::build(3, 2, 1, 1e-3, &InitStrategy::default()).unwrap();
        let samples = arithmetic_grid(Operation::Addition, 2);
        assert!(train_epoch(&mut net, &samples).is_err());
    }
}
