pub mod matrix;

pub use matrix::{Matrix, Scalar, Vector};
