pub mod config;
pub mod divergence;
pub mod network;
pub mod persist;

pub use config::NetworkConfig;
pub use divergence::{
    DivergencePolicy, DivergenceWarning, FatalNumericError, ForwardLayer, StepReport, WeightLayer,
};
pub use network::Network;
