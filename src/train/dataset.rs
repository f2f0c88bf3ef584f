/// Arithmetic function a two-input, one-output network is trained to mimic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Addition,
    Multiplication,
}

impl Operation {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Addition => a + b,
            Operation::Multiplication => a * b,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Multiplication => '*',
        }
    }
}

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

/// Every `(i, j)` with `i, j` in `0..=max`, in row-major order, labelled
/// with `op(i, j)`.
pub fn arithmetic_grid(op: Operation, max: u32) -> Vec<Sample> {
    (0..=max)
        .flat_map(|i| (0..=max).map(move |j| (i as f64, j as f64)))
        .map(|(a, b)| Sample {
            inputs: vec![a, b],
            targets: vec![op.apply(a, b)],
        })
        .collect()
}
