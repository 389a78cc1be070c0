pub mod dense;
pub mod initializer;

pub use dense::Layer;
