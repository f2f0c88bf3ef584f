pub mod error;
pub mod math;
pub mod activation;
pub mod init;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::approx::exponential;
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use init::strategy::InitStrategy;
pub use network::config::NetworkConfig;
pub use network::divergence::{DivergencePolicy, DivergenceWarning, FatalNumericError, StepReport};
pub use network::network::Network;
pub use loss::squared_error::SquaredErrorLoss;
pub use train::dataset::{arithmetic_grid, Operation, Sample};
pub use train::trainer::{train_epoch, train_for};
pub use train::{EpochStats, TrainConfig};
