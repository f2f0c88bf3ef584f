use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix of `f64`.
///
/// Serializes as a bare array of row arrays (`[[1.0, 2.0], [3.0, 4.0]]`);
/// ragged rows are rejected on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![value; cols]; rows]
        }
    }

    /// Samples every entry uniformly from `[-bound, bound)`.
    ///
    /// `bound` must be positive and finite.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, bound: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(-bound..bound);
            }
        }

        res
    }

    /// Builds a matrix from row vectors. Fails if the rows differ in length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, String> {
        let cols = data.first().map_or(0, |row| row.len());
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(format!(
                "row {i} has {} columns, expected {cols}",
                row.len()
            ));
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    /// Row vector times matrix: `out[c] = Σ_r v[r] * self[r][c]`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.rows`.
    pub fn row_times(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "row vector length must equal row count");
        (0..self.cols)
            .map(|c| {
                v.iter()
                    .zip(self.data.iter())
                    .map(|(x, row)| x * row[c])
                    .sum()
            })
            .collect()
    }

    /// Matrix times column vector: `out[r] = Σ_c self[r][c] * v[c]`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.cols`.
    pub fn times_column(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "column vector length must equal column count");
        self.data
            .iter()
            .map(|row| row.iter().zip(v.iter()).map(|(w, x)| w * x).sum())
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = String;

    fn try_from(data: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_data(data)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn row_times_sums_down_columns() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.row_times(&[1.0, 0.0, 2.0]), vec![11.0, 14.0]);
    }

    #[test]
    fn times_column_sums_across_rows() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.times_column(&[1.0, -1.0]), vec![-1.0, -1.0, -1.0]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(serde_json::from_str::<Matrix>("[[1.0, 2.0], [3.0]]").is_err());
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let m = Matrix::filled(2, 1, 1.5);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1.5],[1.5]]");
        let back: Matrix = serde_json::from_str("[[1.5],[1.5]]").unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn uniform_stays_within_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(8, 8, 0.25, &mut rng);
        assert!(m.data.iter().flatten().all(|x| (-0.25..0.25).contains(x)));
    }

    #[test]
    fn is_finite_spots_nan_and_infinity() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.is_finite());
        m.set(1, 0, f64::NAN);
        assert!(!m.is_finite());
        m.set(1, 0, f64::INFINITY);
        assert!(!m.is_finite());
    }
}
