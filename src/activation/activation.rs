use serde::{Serialize, Deserialize};

use crate::math::approx::exponential;

/// Nonlinearity applied to the hidden layer during the forward pass.
///
/// The output layer is always linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// No nonlinearity; the network is a product of two linear maps.
    #[default]
    Identity,
    /// Logistic sigmoid over the standard exponential.
    Sigmoid,
    /// Logistic sigmoid over the fourth-order Taylor exponential.
    /// Numerically unstable for |x| above roughly 5.
    TaylorSigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::TaylorSigmoid => 1.0 / (1.0 + exponential(-x)),
        }
    }

    /// Derivative expressed in terms of the activation's own output `y`,
    /// i.e. the value stored in the hidden layer after the forward pass.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid | ActivationFunction::TaylorSigmoid => sigmoid_derivative(y),
        }
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// `y * (1 - y)`. Only meaningful when `y` is already a sigmoid output.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
