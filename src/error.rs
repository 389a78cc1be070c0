use thiserror::Error;

/// Reasons a network cannot be built or trained.
///
/// Every variant is detected before any weight is touched, so a failed call
/// leaves the network exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("architecture has {layers} weighted layers but {activations} activation functions were given")]
    Configuration { layers: usize, activations: usize },

    #[error("invalid architecture: {0}")]
    Architecture(String),

    #[error("{actual} weight layers were given, the architecture needs {expected}")]
    LayerCount { expected: usize, actual: usize },

    #[error("weights for layer {layer} have length {actual}, expected {expected}")]
    WeightShape { layer: usize, expected: usize, actual: usize },

    #[error("training input {index} has length {actual}, expected {expected}")]
    InputDimension { index: usize, expected: usize, actual: usize },

    #[error("target output {index} has length {actual}, expected {expected}")]
    OutputDimension { index: usize, expected: usize, actual: usize },

    #[error("{inputs} training inputs but {targets} target outputs")]
    SampleCount { inputs: usize, targets: usize },
}
