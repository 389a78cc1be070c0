use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::activation::activation::ActivationFunction;
use crate::error::ValidationError;
use crate::layers::dense::Layer;
use crate::layers::initializer;
use crate::loss::error_function::ErrorFunction;
use crate::math::matrix::{argmax, augmented, hadamard, mean, Matrix, Scalar, Vector};
use crate::train::cancel::CancellationToken;
use crate::train::observer::TrainingObserver;
use crate::train::train_config::TrainConfig;

/// Per-layer values retained by a forward pass for backpropagation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardTrace {
    /// Bias-augmented input of every layer.
    pub inputs: Matrix,
    /// Activation of every layer; the last entry is the network output.
    pub activations: Matrix,
}

impl FeedForwardTrace {
    pub fn output(&self) -> &[Scalar] {
        self.activations.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_output(mut self) -> Vector {
        self.activations.pop().unwrap_or_default()
    }
}

/// A dense feed-forward network trained by online gradient descent with
/// momentum.
///
/// `weights[l]` holds layer `l + 1` of the architecture, neuron-major, with a
/// bias weight closing every neuron's block. `previous_weights` is the value
/// `weights` had before the most recent update.
#[derive(Debug)]
pub struct Network {
    architecture: Vec<usize>,
    activation_functions: Vec<ActivationFunction>,
    weights: Matrix,
    previous_weights: Matrix,
    bias: Scalar,
    token: CancellationToken,
}

impl Network {
    /// Builds a network with fan-in scaled random weights.
    pub fn new(
        architecture: Vec<usize>,
        activation_functions: Vec<ActivationFunction>,
    ) -> Result<Network, ValidationError> {
        Network::with_rng(architecture, activation_functions, &mut rand::thread_rng())
    }

    /// Like [`Network::new`], drawing the initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        architecture: Vec<usize>,
        activation_functions: Vec<ActivationFunction>,
        rng: &mut R,
    ) -> Result<Network, ValidationError> {
        validate_architecture(&architecture, &activation_functions)?;
        let weights: Matrix = architecture.windows(2)
            .map(|pair| initializer::layer_weights(rng, pair[1], pair[0]))
            .collect();
        Ok(Network::assemble(architecture, activation_functions, weights))
    }

    /// Builds a network around existing weights.
    pub fn with_weights(
        architecture: Vec<usize>,
        activation_functions: Vec<ActivationFunction>,
        weights: Matrix,
    ) -> Result<Network, ValidationError> {
        validate_architecture(&architecture, &activation_functions)?;
        if weights.len() != activation_functions.len() {
            return Err(ValidationError::LayerCount {
                expected: activation_functions.len(),
                actual: weights.len(),
            });
        }
        for (layer, (pair, layer_weights)) in architecture.windows(2).zip(&weights).enumerate() {
            let expected = pair[1] * (pair[0] + 1);
            if layer_weights.len() != expected {
                return Err(ValidationError::WeightShape {
                    layer,
                    expected,
                    actual: layer_weights.len(),
                });
            }
        }
        Ok(Network::assemble(architecture, activation_functions, weights))
    }

    fn assemble(
        architecture: Vec<usize>,
        activation_functions: Vec<ActivationFunction>,
        weights: Matrix,
    ) -> Network {
        Network {
            architecture,
            activation_functions,
            previous_weights: weights.clone(),
            weights,
            bias: 1.0,
            token: CancellationToken::new(),
        }
    }

    pub fn architecture(&self) -> &[usize] {
        &self.architecture
    }

    pub fn activation_functions(&self) -> &[ActivationFunction] {
        &self.activation_functions
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn previous_weights(&self) -> &Matrix {
        &self.previous_weights
    }

    pub fn bias(&self) -> Scalar {
        self.bias
    }

    /// Sets the constant appended to every layer's input.
    pub fn set_bias(&mut self, bias: Scalar) {
        self.bias = bias;
    }

    pub fn input_size(&self) -> usize {
        self.architecture[0]
    }

    pub fn output_size(&self) -> usize {
        self.architecture[self.architecture.len() - 1]
    }

    /// Output of the final layer for `inputs`.
    ///
    /// # Panics
    /// Panics if `inputs.len()` differs from the input layer width.
    pub fn feed_forward(&self, inputs: &[Scalar]) -> Vector {
        self.feed_forward_with_trace(inputs).into_output()
    }

    /// Forward pass that keeps every layer's bias-augmented input and
    /// activation.
    ///
    /// # Panics
    /// Panics if `inputs.len()` differs from the input layer width.
    pub fn feed_forward_with_trace(&self, inputs: &[Scalar]) -> FeedForwardTrace {
        assert_eq!(
            inputs.len(),
            self.input_size(),
            "input has length {}, network expects {}",
            inputs.len(),
            self.input_size()
        );

        let layers = self.weights.len();
        let mut trace = FeedForwardTrace {
            inputs: Vec::with_capacity(layers),
            activations: Vec::with_capacity(layers),
        };

        let mut layer_inputs = augmented(inputs, self.bias);
        for ((&neuron_count, &activation), layer_weights) in self.architecture[1..].iter()
            .zip(&self.activation_functions)
            .zip(&self.weights)
        {
            let activations = Layer::feed_forward(neuron_count, activation, &layer_inputs, layer_weights);
            let next_inputs = augmented(&activations, self.bias);
            trace.inputs.push(mem::replace(&mut layer_inputs, next_inputs));
            trace.activations.push(activations);
        }
        trace
    }

    /// Zero-centres `inputs` by subtracting their mean.
    pub fn preprocess(inputs: &[Scalar]) -> Vector {
        let m = mean(inputs);
        inputs.iter().map(|x| x - m).collect()
    }

    /// Weights after one gradient step on `trace` towards `target`.
    ///
    /// Does not modify the network; `train` commits the result.
    ///
    /// # Panics
    /// Panics if `target.len()` differs from the output layer width.
    pub fn backpropagate(
        &self,
        error_function: ErrorFunction,
        learning_rate: Scalar,
        momentum: Scalar,
        trace: &FeedForwardTrace,
        target: &[Scalar],
    ) -> Matrix {
        assert_eq!(
            target.len(),
            self.output_size(),
            "target has length {}, network outputs {}",
            target.len(),
            self.output_size()
        );
        let last = self.weights.len() - 1;
        let output = &trace.activations[last];

        let mut gradient = hadamard(
            &error_function.gradient(output, target),
            &self.activation_functions[last].gradient(output),
        );

        // Output layer first, then walk back towards the input.
        let mut gradients = Vec::with_capacity(self.weights.len());
        for layer in (1..=last).rev() {
            let activation_gradient = self.activation_functions[layer - 1]
                .gradient(&trace.activations[layer - 1]);
            let propagated = Layer::backpropagate_gradient(
                &activation_gradient,
                &self.weights[layer],
                &gradient,
            );
            gradients.push(mem::replace(&mut gradient, propagated));
        }
        gradients.push(gradient);
        gradients.reverse();

        self.weights.iter()
            .zip(&self.previous_weights)
            .zip(gradients.iter().zip(&trace.inputs))
            .map(|((weights, previous), (gradient, inputs))| {
                Layer::update_weights(weights, previous, learning_rate, momentum, gradient, inputs)
            })
            .collect()
    }

    /// Trains the network one example at a time, in dataset order.
    ///
    /// After every example the new weights are committed, `observer` receives
    /// the epoch and overall progress, and the cancellation flag is checked.
    /// Every completed epoch reports its aggregate error. A cancelled epoch
    /// reports no error and ends the run with the weights of the last
    /// finished example.
    ///
    /// Returns an error, without touching the weights, when the dataset does
    /// not fit the architecture.
    pub fn train(
        &mut self,
        config: &TrainConfig,
        training_inputs: &[Vector],
        target_outputs: &[Vector],
        observer: &mut dyn TrainingObserver,
    ) -> Result<(), ValidationError> {
        self.validate_dataset(training_inputs, target_outputs)?;

        self.token.start();
        let samples = training_inputs.len();
        info!(
            architecture = ?self.architecture,
            epochs = config.epochs,
            samples,
            learning_rate = config.learning_rate,
            momentum = config.momentum,
            "training started"
        );

        let mut cancelled = false;
        'epochs: for epoch in 0..config.epochs {
            let mut outputs = Vec::with_capacity(samples);

            for (index, (inputs, target)) in training_inputs.iter().zip(target_outputs).enumerate() {
                let trace = self.feed_forward_with_trace(inputs);
                let weights = self.backpropagate(
                    config.error_function,
                    config.learning_rate,
                    config.momentum,
                    &trace,
                    target,
                );
                outputs.push(trace.into_output());
                self.previous_weights = mem::replace(&mut self.weights, weights);

                let progress = (index + 1) as Scalar / samples as Scalar;
                observer.on_progress(self, progress);
                observer.on_overall_progress(self, (epoch as Scalar + progress) / config.epochs as Scalar);

                if !self.token.is_training() {
                    info!(epoch = epoch + 1, example = index + 1, "training cancelled");
                    cancelled = true;
                    break 'epochs;
                }
            }

            let error = config.error_function.error(&outputs, target_outputs);
            debug!(epoch = epoch + 1, error, "epoch complete");
            observer.on_error(self, error);

            if !self.token.is_training() {
                info!(epoch = epoch + 1, "training cancelled");
                cancelled = true;
                break;
            }
        }

        // Completed runs return to idle too.
        self.token.cancel();
        if !cancelled {
            info!("training finished");
        }
        Ok(())
    }

    /// Stops a running `train` call at its next check point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Handle that can cancel training from another thread.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_training(&self) -> bool {
        self.token.is_training()
    }

    /// Aggregate error of the current weights over a dataset.
    pub fn evaluate(
        &self,
        error_function: ErrorFunction,
        inputs: &[Vector],
        targets: &[Vector],
    ) -> Result<Scalar, ValidationError> {
        self.validate_dataset(inputs, targets)?;
        let outputs: Matrix = inputs.iter().map(|input| self.feed_forward(input)).collect();
        Ok(error_function.error(&outputs, targets))
    }

    /// Fraction of examples whose strongest output matches the strongest
    /// target component.
    pub fn accuracy(&self, inputs: &[Vector], targets: &[Vector]) -> Result<Scalar, ValidationError> {
        self.validate_dataset(inputs, targets)?;
        if inputs.is_empty() {
            return Ok(0.0);
        }
        let correct = inputs.iter().zip(targets)
            .filter(|(input, target)| argmax(&self.feed_forward(input)) == argmax(target))
            .count();
        Ok(correct as Scalar / inputs.len() as Scalar)
    }

    fn validate_dataset(&self, inputs: &[Vector], targets: &[Vector]) -> Result<(), ValidationError> {
        if inputs.len() != targets.len() {
            return Err(ValidationError::SampleCount {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        let (input_size, output_size) = (self.input_size(), self.output_size());
        if let Some((index, input)) = inputs.iter().enumerate().find(|(_, v)| v.len() != input_size) {
            return Err(ValidationError::InputDimension {
                index,
                expected: input_size,
                actual: input.len(),
            });
        }
        if let Some((index, target)) = targets.iter().enumerate().find(|(_, v)| v.len() != output_size) {
            return Err(ValidationError::OutputDimension {
                index,
                expected: output_size,
                actual: target.len(),
            });
        }
        Ok(())
    }
}

impl Clone for Network {
    /// The clone gets its own cancellation flag.
    fn clone(&self) -> Self {
        Network {
            architecture: self.architecture.clone(),
            activation_functions: self.activation_functions.clone(),
            weights: self.weights.clone(),
            previous_weights: self.previous_weights.clone(),
            bias: self.bias,
            token: CancellationToken::new(),
        }
    }
}

fn validate_architecture(
    architecture: &[usize],
    activation_functions: &[ActivationFunction],
) -> Result<(), ValidationError> {
    if architecture.len() < 2 {
        return Err(ValidationError::Architecture(format!(
            "need at least an input and an output layer, got {} layers",
            architecture.len()
        )));
    }
    if let Some(layer) = architecture.iter().position(|&width| width == 0) {
        return Err(ValidationError::Architecture(format!("layer {layer} has no neurons")));
    }
    if architecture.len() - 1 != activation_functions.len() {
        return Err(ValidationError::Configuration {
            layers: architecture.len() - 1,
            activations: activation_functions.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction::*;

    fn tiny() -> Network {
        // 1 input -> 1 sigmoid neuron, weight 0 and bias weight 0.
        Network::with_weights(vec![1, 1], vec![Sigmoid], vec![vec![0.0, 0.0]]).unwrap()
    }

    #[test]
    fn zero_weights_give_half() {
        assert_eq!(tiny().feed_forward(&[3.0]), vec![0.5]);
    }

    #[test]
    fn trace_keeps_bias_augmented_inputs() {
        let mut network = Network::with_weights(
            vec![2, 1, 1],
            vec![ReLU, ReLU],
            vec![vec![1.0, 1.0, 0.0], vec![2.0, 0.5]],
        ).unwrap();
        network.set_bias(0.25);
        let trace = network.feed_forward_with_trace(&[1.0, 2.0]);
        assert_eq!(trace.inputs, vec![vec![1.0, 2.0, 0.25], vec![3.0, 0.25]]);
        assert_eq!(trace.activations, vec![vec![3.0], vec![6.125]]);
        assert_eq!(trace.output(), &[6.125]);
    }

    #[test]
    fn backpropagate_single_neuron() {
        let network = tiny();
        let trace = network.feed_forward_with_trace(&[1.0]);
        // gradient = (0.5 - 1) * 0.5 * 0.5 = -0.125; inputs = [1, bias 1]
        let weights = network.backpropagate(ErrorFunction::MeanSquared, 1.0, 0.0, &trace, &[1.0]);
        assert_eq!(weights, vec![vec![0.125, 0.125]]);
        assert_eq!(network.weights(), &vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn backpropagate_tanh_layer() {
        let network = Network::with_weights(vec![1, 1], vec![Tanh], vec![vec![0.5, 0.0]]).unwrap();
        let trace = network.feed_forward_with_trace(&[1.0]);
        // a = tanh(0.5); gradient = a * (1 - a^2) = 0.363431
        let weights = network.backpropagate(ErrorFunction::MeanSquared, 1.0, 0.0, &trace, &[0.0]);
        assert!((weights[0][0] - 0.136569).abs() < 1e-5);
        assert!((weights[0][1] + 0.363431).abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "target has length 2")]
    fn backpropagate_rejects_wrong_target_length() {
        let network = tiny();
        let trace = network.feed_forward_with_trace(&[1.0]);
        network.backpropagate(ErrorFunction::MeanSquared, 1.0, 0.0, &trace, &[1.0, 0.0]);
    }

    #[test]
    fn preprocess_zero_centres() {
        assert_eq!(Network::preprocess(&[1.0, 2.0, 3.0]), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_short_architecture() {
        assert!(matches!(
            Network::new(vec![3], vec![]),
            Err(ValidationError::Architecture(_))
        ));
        assert!(matches!(
            Network::new(vec![3, 0, 1], vec![Sigmoid, Sigmoid]),
            Err(ValidationError::Architecture(_))
        ));
    }

    #[test]
    fn clone_has_independent_flag() {
        let network = tiny();
        let copy = network.clone();
        network.token.start();
        assert!(network.is_training());
        assert!(!copy.is_training());
    }
}
