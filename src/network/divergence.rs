use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::math::matrix::Matrix;

/// What `train_step` does when it detects an infinite or NaN value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergencePolicy {
    /// Log the warning, record it in the `StepReport`, keep going.
    #[default]
    Warn,
    /// Stop the step and return `NetworkError::Diverged`.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardLayer {
    Hidden,
    Output,
}

impl fmt::Display for ForwardLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardLayer::Hidden => write!(f, "hidden"),
            ForwardLayer::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightLayer {
    InputHidden,
    HiddenOutput,
}

impl fmt::Display for WeightLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightLayer::InputHidden => write!(f, "weights_ih"),
            WeightLayer::HiddenOutput => write!(f, "weights_ho"),
        }
    }
}

/// Snapshot taken when a forward-pass sum comes out NaN.
///
/// `weights` is the matrix feeding the failing layer (`weights_ih` for the
/// hidden layer, `weights_ho` for the output layer).
#[derive(Debug, Clone, Error)]
#[error(
    "NaN sum in {layer} layer at index {index}\n\
     input layer: {input_layer:?}\n\
     hidden layer: {hidden_layer:?}\n\
     output layer: {output_layer:?}\n\
     weights: {weights:?}"
)]
pub struct FatalNumericError {
    pub layer: ForwardLayer,
    pub index: usize,
    pub input_layer: Vec<f64>,
    pub hidden_layer: Vec<f64>,
    pub output_layer: Vec<f64>,
    pub weights: Matrix,
}

/// A non-finite value seen during the backward pass or the weight update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DivergenceWarning {
    #[error("hidden error {hidden_error} at index {index} is infinite (targets {targets:?}, outputs {outputs:?})")]
    InfiniteHiddenError {
        index: usize,
        hidden_error: f64,
        targets: Vec<f64>,
        outputs: Vec<f64>,
    },

    #[error("delta for {layer}[{row}][{col}] is NaN (learning rate {learning_rate}, error {error}, activation {activation})")]
    NanDelta {
        layer: WeightLayer,
        row: usize,
        col: usize,
        learning_rate: f64,
        error: f64,
        activation: f64,
    },

    #[error("{layer}[{row}][{col}] became NaN after applying delta {delta}")]
    NanWeight {
        layer: WeightLayer,
        row: usize,
        col: usize,
        delta: f64,
    },
}

/// Outcome of a single `train_step`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// ½·Σ(output - target)² of the example, measured before the update.
    pub loss: f64,
    pub warnings: Vec<DivergenceWarning>,
}

impl StepReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
