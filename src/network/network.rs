use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::init::strategy::InitStrategy;
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::divergence::{
    DivergencePolicy, DivergenceWarning, FatalNumericError, ForwardLayer, StepReport, WeightLayer,
};

/// Fully-connected network with one hidden layer and no biases.
///
/// The serialized form is exactly the persisted weight document: the three
/// activation buffers, both weight matrices and the learning rate. The hidden
/// activation and divergence policy are runtime options and are not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Network {
    pub(crate) input_layer: Vec<f64>,
    pub(crate) hidden_layer: Vec<f64>,
    pub(crate) output_layer: Vec<f64>,
    /// N×H
    pub(crate) weights_ih: Matrix,
    /// H×M
    pub(crate) weights_ho: Matrix,
    pub(crate) learning_rate: f64,
    #[serde(skip)]
    pub(crate) activation: ActivationFunction,
    #[serde(skip)]
    pub(crate) divergence: DivergencePolicy,
}

impl Network {
    /// Builds a network from a validated config.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        config.validate()?;
        let (weights_ih, weights_ho) =
            config.init.weights(config.input_size, config.hidden_size, config.output_size)?;
        debug!(
            input = config.input_size,
            hidden = config.hidden_size,
            output = config.output_size,
            learning_rate = config.learning_rate,
            init = ?config.init,
            "built network"
        );
        Ok(Network {
            input_layer: vec![0.0; config.input_size],
            hidden_layer: vec![0.0; config.hidden_size],
            output_layer: vec![0.0; config.output_size],
            weights_ih,
            weights_ho,
            learning_rate: config.learning_rate,
            activation: config.hidden_activation,
            divergence: config.divergence,
        })
    }

    /// Shorthand for `new` with default activation and divergence policy.
    pub fn build(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        init: &InitStrategy,
    ) -> Result<Network> {
        let config = NetworkConfig::new(input_size, hidden_size, output_size, learning_rate)
            .with_init(init.clone());
        Network::new(&config)
    }

    pub fn input_size(&self) -> usize {
        self.input_layer.len()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_layer.len()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_layer(&self) -> &[f64] {
        &self.input_layer
    }

    pub fn hidden_layer(&self) -> &[f64] {
        &self.hidden_layer
    }

    pub fn output_layer(&self) -> &[f64] {
        &self.output_layer
    }

    pub fn weights_ih(&self) -> &Matrix {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &Matrix {
        &self.weights_ho
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn set_activation(&mut self, activation: ActivationFunction) {
        self.activation = activation;
    }

    pub fn divergence_policy(&self) -> DivergencePolicy {
        self.divergence
    }

    pub fn set_divergence_policy(&mut self, policy: DivergencePolicy) {
        self.divergence = policy;
    }

    /// Replaces both weight matrices. Shapes must match N×H and H×M, in the
    /// declared `rows`/`cols` and in the stored data alike.
    pub fn set_weights(&mut self, weights_ih: Matrix, weights_ho: Matrix) -> Result<()> {
        check_matrix(WeightLayer::InputHidden, &weights_ih, self.input_size(), self.hidden_size())?;
        check_matrix(WeightLayer::HiddenOutput, &weights_ho, self.hidden_size(), self.output_size())?;
        self.weights_ih = weights_ih;
        self.weights_ho = weights_ho;
        Ok(())
    }

    /// Forward pass. Overwrites the three activation buffers and returns the
    /// output layer.
    ///
    /// Fails with `ShapeMismatch` (state untouched) if `inputs.len() != N`, and
    /// with `FatalNumeric` if a hidden or output value comes out NaN.
    pub fn evaluate(&mut self, inputs: &[f64]) -> Result<&[f64]> {
        check_len("inputs", self.input_size(), inputs.len())?;
        self.input_layer.copy_from_slice(inputs);

        let activation = self.activation;
        let sums = self.weights_ih.row_times(&self.input_layer);
        for (h, sum) in self.hidden_layer.iter_mut().zip(sums) {
            *h = activation.function(sum);
        }
        if let Some(index) = self.hidden_layer.iter().position(|h| h.is_nan()) {
            return Err(self.fatal(ForwardLayer::Hidden, index).into());
        }

        self.output_layer = self.weights_ho.row_times(&self.hidden_layer);
        if let Some(index) = self.output_layer.iter().position(|o| o.is_nan()) {
            return Err(self.fatal(ForwardLayer::Output, index).into());
        }

        Ok(&self.output_layer)
    }

    /// One stochastic gradient descent step on a single example.
    ///
    /// Error terms are computed from the pre-update weights:
    ///   output_error[k] = output[k] - target[k]
    ///   hidden_error[j] = (Σ_k output_error[k] * weights_ho[j][k]) * act'(hidden[j])
    /// then each weight moves against its gradient:
    ///   weights_ho[j][k] -= lr * output_error[k] * hidden[j]
    ///   weights_ih[i][j] -= lr * hidden_error[j] * input[i]
    ///
    /// Non-finite values seen along the way are handled per the divergence
    /// policy: collected in the report under `Warn`, returned as
    /// `NetworkError::Diverged` under `Abort`.
    pub fn train_step(&mut self, inputs: &[f64], targets: &[f64]) -> Result<StepReport> {
        check_len("targets", self.output_size(), targets.len())?;
        self.evaluate(inputs)?;

        let loss = SquaredErrorLoss::loss(&self.output_layer, targets);
        let output_errors = SquaredErrorLoss::derivative(&self.output_layer, targets);
        let activation = self.activation;
        let hidden_errors: Vec<f64> = self
            .weights_ho
            .times_column(&output_errors)
            .into_iter()
            .zip(self.hidden_layer.iter())
            .map(|(err, &h)| err * activation.derivative_from_output(h))
            .collect();

        let mut warnings = Vec::new();
        for (index, &hidden_error) in hidden_errors.iter().enumerate() {
            if hidden_error.is_infinite() {
                let warning = DivergenceWarning::InfiniteHiddenError {
                    index,
                    hidden_error,
                    targets: targets.to_vec(),
                    outputs: self.output_layer.clone(),
                };
                self.report(warning, &mut warnings)?;
            }
        }

        for j in 0..self.hidden_size() {
            let hidden = self.hidden_layer[j];
            for (k, &error) in output_errors.iter().enumerate() {
                self.update_weight(WeightLayer::HiddenOutput, j, k, error, hidden, &mut warnings)?;
            }
        }
        for i in 0..self.input_size() {
            let input = self.input_layer[i];
            for (j, &error) in hidden_errors.iter().enumerate() {
                self.update_weight(WeightLayer::InputHidden, i, j, error, input, &mut warnings)?;
            }
        }

        Ok(StepReport { loss, warnings })
    }

    fn update_weight(
        &mut self,
        layer: WeightLayer,
        row: usize,
        col: usize,
        error: f64,
        activation: f64,
        warnings: &mut Vec<DivergenceWarning>,
    ) -> Result<()> {
        let learning_rate = self.learning_rate;
        let delta = learning_rate * error * activation;
        let weights = match layer {
            WeightLayer::InputHidden => &self.weights_ih,
            WeightLayer::HiddenOutput => &self.weights_ho,
        };
        let updated = weights.get(row, col) - delta;

        if delta.is_nan() {
            let warning = DivergenceWarning::NanDelta { layer, row, col, learning_rate, error, activation };
            self.report(warning, warnings)?;
        } else if updated.is_nan() {
            self.report(DivergenceWarning::NanWeight { layer, row, col, delta }, warnings)?;
        }

        match layer {
            WeightLayer::InputHidden => self.weights_ih.set(row, col, updated),
            WeightLayer::HiddenOutput => self.weights_ho.set(row, col, updated),
        }
        Ok(())
    }

    fn report(&self, warning: DivergenceWarning, warnings: &mut Vec<DivergenceWarning>) -> Result<()> {
        match self.divergence {
            DivergencePolicy::Warn => {
                warn!(%warning, "divergence detected during training step");
                warnings.push(warning);
                Ok(())
            }
            DivergencePolicy::Abort => Err(NetworkError::Diverged(warning)),
        }
    }

    fn fatal(&self, layer: ForwardLayer, index: usize) -> FatalNumericError {
        let weights = match layer {
            ForwardLayer::Hidden => self.weights_ih.clone(),
            ForwardLayer::Output => self.weights_ho.clone(),
        };
        FatalNumericError {
            layer,
            index,
            input_layer: self.input_layer.clone(),
            hidden_layer: self.hidden_layer.clone(),
            output_layer: self.output_layer.clone(),
            weights,
        }
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::shape(what, expected, actual))
    }
}

fn check_matrix(layer: WeightLayer, m: &Matrix, rows: usize, cols: usize) -> Result<()> {
    let (rows_what, cols_what) = match layer {
        WeightLayer::InputHidden => ("weights_ih rows", "weights_ih columns"),
        WeightLayer::HiddenOutput => ("weights_ho rows", "weights_ho columns"),
    };
    check_len(rows_what, rows, m.rows)?;
    check_len(rows_what, rows, m.data.len())?;
    check_len(cols_what, cols, m.cols)?;
    for row in &m.data {
        check_len(cols_what, cols, row.len())?;
    }
    Ok(())
}
