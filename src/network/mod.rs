pub mod network;
pub mod spec;

pub use network::{FeedForwardTrace, Network};
pub use spec::NetworkSpec;
