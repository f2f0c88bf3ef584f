/// Half sum of squared errors, the objective `Network::train_step` descends.
pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// ½·Σ(predicted - expected)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted
            .iter()
            .zip(expected)
            .map(|(p, e)| (p - e) * (p - e))
            .sum::<f64>()
    }

    /// Gradient of `loss` with respect to each prediction: predicted - expected.
    /// Positive when the prediction overshoots.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected).map(|(p, e)| p - e).collect()
    }
}
