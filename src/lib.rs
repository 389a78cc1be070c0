pub mod math;
pub mod activation;
pub mod error;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use math::matrix::{Matrix, Scalar, Vector};
pub use activation::activation::ActivationFunction;
pub use error::ValidationError;
pub use layers::dense::Layer;
pub use network::network::{FeedForwardTrace, Network};
pub use network::spec::NetworkSpec;
pub use loss::error_function::ErrorFunction;
pub use train::cancel::CancellationToken;
pub use train::observer::{ChannelObserver, NoopObserver, TracingObserver, TrainingEvent, TrainingObserver};
pub use train::train_config::TrainConfig;
pub use train::shuffle::shuffle_dataset;
