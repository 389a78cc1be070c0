use crate::math::matrix::{Scalar, Vector};

pub struct SumOfSquaredError;

impl SumOfSquaredError {
    /// Aggregate error: 0.5 · Σ (target - output)² over every element of the batch.
    pub fn error(outputs: &[Vector], targets: &[Vector]) -> Scalar {
        0.5 * outputs.iter().flatten().zip(targets.iter().flatten())
            .map(|(o, t)| (t - o) * (t - o))
            .sum::<Scalar>()
    }

    /// Per-output rate: output - target
    pub fn derivative(output: Scalar, target: Scalar) -> Scalar {
        output - target
    }
}
