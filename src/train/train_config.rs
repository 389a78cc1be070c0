use serde::{Deserialize, Serialize};

use crate::loss::error_function::ErrorFunction;
use crate::math::matrix::Scalar;

/// Hyperparameters for one `Network::train` run.
///
/// # Fields
/// - `epochs`:         full passes over the training data; `0` is a no-op
/// - `error_function`: drives the per-example gradient and the epoch error
/// - `learning_rate`:  step size, expected to be positive
/// - `momentum`:       fraction of the previous weight delta re-applied, in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub error_function: ErrorFunction,
    pub learning_rate: Scalar,
    #[serde(default)]
    pub momentum: Scalar,
}

impl TrainConfig {
    /// Creates a `TrainConfig` without momentum.
    pub fn new(epochs: usize, error_function: ErrorFunction, learning_rate: Scalar) -> Self {
        TrainConfig {
            epochs,
            error_function,
            learning_rate,
            momentum: 0.0,
        }
    }

    pub fn with_momentum(mut self, momentum: Scalar) -> Self {
        self.momentum = momentum;
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(10, ErrorFunction::MeanSquared, 0.9).with_momentum(0.1)
    }
}
