//! Distance and compatibility tables.

mod compatibility;
mod matrix;

pub use compatibility::CompatibilityMatrix;
pub use matrix::DistanceMatrix;
