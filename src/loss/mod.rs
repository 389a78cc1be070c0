pub mod sum_of_squared;
pub mod mse;
pub mod cross_entropy;
pub mod error_function;

pub use sum_of_squared::SumOfSquaredError;
pub use mse::MeanSquaredError;
pub use cross_entropy::CrossEntropyError;
pub use error_function::ErrorFunction;
