use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

/// How the weight matrices of a fresh network are filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    /// Every weight gets the same value. `Constant { value: 1.0 }` keeps all
    /// hidden units identical, so they stay symmetric under training.
    Constant { value: f64 },
    /// Uniform in `[-bound, bound)`. A `seed` makes the fill reproducible.
    Uniform {
        bound: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for InitStrategy {
    fn default() -> Self {
        InitStrategy::Uniform { bound: 0.5, seed: None }
    }
}

impl InitStrategy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            InitStrategy::Constant { value } if !value.is_finite() => Err(
                NetworkError::InvalidConfig(format!("constant init value {value} is not finite")),
            ),
            InitStrategy::Uniform { bound, .. } if !(bound.is_finite() && bound > 0.0) => Err(
                NetworkError::InvalidConfig(format!("uniform init bound {bound} must be positive and finite")),
            ),
            _ => Ok(()),
        }
    }

    /// Produces `(weights_ih, weights_ho)` for an `input × hidden × output`
    /// network. Both matrices come from one RNG stream, input-hidden first.
    pub fn weights(&self, input: usize, hidden: usize, output: usize) -> Result<(Matrix, Matrix)> {
        self.validate()?;
        let pair = match *self {
            InitStrategy::Constant { value } => (
                Matrix::filled(input, hidden, value),
                Matrix::filled(hidden, output, value),
            ),
            InitStrategy::Uniform { bound, seed: Some(seed) } => {
                let mut rng = StdRng::seed_from_u64(seed);
                uniform_pair(input, hidden, output, bound, &mut rng)
            }
            InitStrategy::Uniform { bound, seed: None } => {
                let mut rng = rand::thread_rng();
                uniform_pair(input, hidden, output, bound, &mut rng)
            }
        };
        Ok(pair)
    }
}

fn uniform_pair<R: Rng>(input: usize, hidden: usize, output: usize, bound: f64, rng: &mut R) -> (Matrix, Matrix) {
    let ih = Matrix::uniform(input, hidden, bound, rng);
    let ho = Matrix::uniform(hidden, output, bound, rng);
    (ih, ho)
}
