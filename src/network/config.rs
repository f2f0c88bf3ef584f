use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::init::strategy::InitStrategy;
use crate::network::divergence::DivergencePolicy;

/// Everything needed to build a fresh `Network`.
///
/// Fields:
/// - `input_size`, `hidden_size`, `output_size` — N, H and M; each at least 1
/// - `learning_rate`     — SGD step size, positive and finite
/// - `init`              — weight fill strategy (uniform ±0.5, unseeded by default)
/// - `hidden_activation` — nonlinearity on the hidden layer (identity by default)
/// - `divergence`        — warn-and-continue or abort on non-finite training values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub init: InitStrategy,
    #[serde(default)]
    pub hidden_activation: ActivationFunction,
    #[serde(default)]
    pub divergence: DivergencePolicy,
}

impl NetworkConfig {
    /// Config with default init, activation and divergence policy.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, learning_rate: f64) -> Self {
        NetworkConfig {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            init: InitStrategy::default(),
            hidden_activation: ActivationFunction::default(),
            divergence: DivergencePolicy::default(),
        }
    }

    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.hidden_activation = activation;
        self
    }

    pub fn with_divergence(mut self, policy: DivergencePolicy) -> Self {
        self.divergence = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate {} must be positive and finite",
                self.learning_rate
            )));
        }
        self.init.validate()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(NetworkError::Encode)?;
        writer.flush()?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                NetworkError::Io(e.into())
            } else {
                NetworkError::Decode(e)
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}
