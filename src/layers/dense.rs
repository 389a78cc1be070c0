use crate::{
    activation::activation::ActivationFunction,
    math::matrix::{dot, hadamard, Scalar, Vector},
};

/// Dense layer arithmetic.
///
/// A layer keeps no state of its own: every function takes the layer's
/// weights, inputs and activation explicitly. Weights are laid out
/// neuron-major, one block of `inputs.len()` per neuron, and `inputs` always
/// carries the bias scalar as its last element.
#[derive(Debug, Clone, Copy)]
pub struct Layer;

impl Layer {
    /// Dot product of each neuron's weight block with the bias-augmented input.
    pub fn weighted_inputs(neuron_count: usize, inputs: &[Scalar], weights: &[Scalar]) -> Vector {
        let stride = inputs.len();
        assert_eq!(
            weights.len(),
            neuron_count * stride,
            "layer weights do not match {neuron_count} neurons of {stride} inputs"
        );
        weights.chunks_exact(stride)
            .map(|neuron| dot(neuron, inputs))
            .collect()
    }

    pub fn feed_forward(
        neuron_count: usize,
        activation: ActivationFunction,
        inputs: &[Scalar],
        weights: &[Scalar],
    ) -> Vector {
        activation.activations(&Layer::weighted_inputs(neuron_count, inputs, weights))
    }

    /// Propagates `upstream_gradient` (one entry per neuron of this layer)
    /// back through `weights`, ignoring the bias column, and scales it by the
    /// preceding layer's `activation_gradient`.
    ///
    /// The result has one entry per neuron of the preceding layer.
    pub fn backpropagate_gradient(
        activation_gradient: &[Scalar],
        weights: &[Scalar],
        upstream_gradient: &[Scalar],
    ) -> Vector {
        let input_count = activation_gradient.len();
        let stride = input_count + 1;
        assert_eq!(
            weights.len(),
            upstream_gradient.len() * stride,
            "layer weights do not match the upstream gradient"
        );

        let mut propagated = vec![0.0; input_count];
        for (neuron, &g) in weights.chunks_exact(stride).zip(upstream_gradient.iter()) {
            for (acc, &w) in propagated.iter_mut().zip(&neuron[..input_count]) {
                *acc += g * w;
            }
        }
        hadamard(&propagated, activation_gradient)
    }

    /// `w - learning_rate · (gradient ⊗ inputs) + momentum · (w - previous)`
    pub fn update_weights(
        weights: &[Scalar],
        previous_weights: &[Scalar],
        learning_rate: Scalar,
        momentum: Scalar,
        gradient: &[Scalar],
        inputs: &[Scalar],
    ) -> Vector {
        let stride = inputs.len();
        assert_eq!(weights.len(), previous_weights.len());
        assert_eq!(weights.len(), gradient.len() * stride);

        weights.chunks_exact(stride)
            .zip(previous_weights.chunks_exact(stride))
            .zip(gradient.iter())
            .flat_map(|((neuron, previous), &g)| {
                neuron.iter().zip(previous.iter()).zip(inputs.iter())
                    .map(move |((&w, &p), &x)| w - learning_rate * g * x + momentum * (w - p))
            })
            .collect()
    }
}
