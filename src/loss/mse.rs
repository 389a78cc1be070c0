use crate::loss::sum_of_squared::SumOfSquaredError;
use crate::math::matrix::{Scalar, Vector};

pub struct MeanSquaredError;

impl MeanSquaredError {
    /// Aggregate error: 2 · sum-of-squared / batch size, where the batch size
    /// is the number of output vectors. An empty batch has zero error.
    pub fn error(outputs: &[Vector], targets: &[Vector]) -> Scalar {
        if outputs.is_empty() {
            return 0.0;
        }
        2.0 * SumOfSquaredError::error(outputs, targets) / outputs.len() as Scalar
    }

    /// Per-output rate: output - target
    pub fn derivative(output: Scalar, target: Scalar) -> Scalar {
        output - target
    }
}
