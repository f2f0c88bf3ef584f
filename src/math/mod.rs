pub mod approx;
pub mod matrix;

pub use approx::exponential;
pub use matrix::Matrix;
