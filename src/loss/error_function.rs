use serde::{Deserialize, Serialize};

use crate::loss::cross_entropy::CrossEntropyError;
use crate::loss::mse::MeanSquaredError;
use crate::loss::sum_of_squared::SumOfSquaredError;
use crate::math::matrix::{Scalar, Vector};

/// Selects which error function drives training.
///
/// - `SumOfSquared`: half the summed squared error over the epoch.
/// - `MeanSquared`:  summed squared error divided by the number of examples.
/// - `CrossEntropy`: pair with a sigmoid output layer.
///
/// The per-example `gradient` is what updates the weights; the aggregate
/// `error` is only reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    SumOfSquared,
    MeanSquared,
    CrossEntropy,
}

impl ErrorFunction {
    pub fn derivative(&self, output: Scalar, target: Scalar) -> Scalar {
        match self {
            ErrorFunction::SumOfSquared => SumOfSquaredError::derivative(output, target),
            ErrorFunction::MeanSquared  => MeanSquaredError::derivative(output, target),
            ErrorFunction::CrossEntropy => CrossEntropyError::derivative(output, target),
        }
    }

    /// Element-wise `derivative` of one output vector against its target.
    ///
    /// # Panics
    /// Panics if the two slices differ in length.
    pub fn gradient(&self, outputs: &[Scalar], targets: &[Scalar]) -> Vector {
        assert_eq!(
            outputs.len(),
            targets.len(),
            "{} outputs against {} targets",
            outputs.len(),
            targets.len()
        );
        outputs.iter().zip(targets.iter())
            .map(|(&o, &t)| self.derivative(o, t))
            .collect()
    }

    /// Aggregate error over a batch of outputs and their targets.
    pub fn error(&self, outputs: &[Vector], targets: &[Vector]) -> Scalar {
        match self {
            ErrorFunction::SumOfSquared => SumOfSquaredError::error(outputs, targets),
            ErrorFunction::MeanSquared  => MeanSquaredError::error(outputs, targets),
            ErrorFunction::CrossEntropy => CrossEntropyError::error(outputs, targets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Scalar = 1e-6;

    #[test]
    fn squared_derivatives_are_the_residual() {
        assert_eq!(ErrorFunction::SumOfSquared.derivative(0.75, 1.0), -0.25);
        assert_eq!(ErrorFunction::MeanSquared.derivative(0.75, 0.0), 0.75);
    }

    #[test]
    fn cross_entropy_derivative() {
        // (0.25 - 1) / (0.75 * 0.25) = -4
        assert!((ErrorFunction::CrossEntropy.derivative(0.25, 1.0) + 4.0).abs() < EPS);
    }

    #[test]
    fn cross_entropy_at_saturated_output_is_not_finite() {
        assert!(!ErrorFunction::CrossEntropy.derivative(1.0, 0.0).is_finite());
    }

    #[test]
    fn gradient_pairs_outputs_with_targets() {
        let g = ErrorFunction::MeanSquared.gradient(&[0.5, 0.25], &[1.0, 0.0]);
        assert_eq!(g, vec![-0.5, 0.25]);
    }

    #[test]
    #[should_panic(expected = "2 outputs against 1 targets")]
    fn gradient_rejects_unpaired_lengths() {
        ErrorFunction::SumOfSquared.gradient(&[0.5, 0.25], &[1.0]);
    }

    #[test]
    fn aggregate_errors() {
        let outputs = vec![vec![0.5], vec![1.0]];
        let targets = vec![vec![1.0], vec![0.0]];
        // 0.5 * (0.25 + 1.0)
        assert!((ErrorFunction::SumOfSquared.error(&outputs, &targets) - 0.625).abs() < EPS);
        // 2 * 0.625 / 2
        assert!((ErrorFunction::MeanSquared.error(&outputs, &targets) - 0.625).abs() < EPS);
        assert_eq!(ErrorFunction::MeanSquared.error(&[], &[]), 0.0);
    }

    #[test]
    fn cross_entropy_aggregate_keeps_its_form() {
        let outputs = vec![vec![0.5]];
        let targets = vec![vec![0.0]];
        let expected = 0.5_f32.ln() + 0.5_f32.ln();
        assert!((ErrorFunction::CrossEntropy.error(&outputs, &targets) - expected).abs() < EPS);
    }

    #[test]
    fn names_in_json() {
        let parsed: ErrorFunction = serde_json::from_str("\"mean_squared\"").unwrap();
        assert_eq!(parsed, ErrorFunction::MeanSquared);
    }
}
