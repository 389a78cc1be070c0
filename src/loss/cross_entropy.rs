use crate::math::matrix::{Scalar, Vector};

/// Cross-entropy for sigmoid-like outputs in (0, 1).
///
/// Outputs of exactly 0 or 1 are not guarded against and produce non-finite
/// values in both the rate and the aggregate.
pub struct CrossEntropyError;

impl CrossEntropyError {
    /// Aggregate error: Σ (ln o + (1 - t) · ln(1 - o)).
    pub fn error(outputs: &[Vector], targets: &[Vector]) -> Scalar {
        outputs.iter().flatten().zip(targets.iter().flatten())
            .map(|(o, t)| o.ln() + (1.0 - t) * (1.0 - o).ln())
            .sum()
    }

    /// Per-output rate: (o - t) / ((1 - o) · o)
    pub fn derivative(output: Scalar, target: Scalar) -> Scalar {
        (output - target) / ((1.0 - output) * output)
    }
}
