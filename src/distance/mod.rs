//! Distance matrix over depot and customers.

mod matrix;

pub use matrix::DistanceMatrix;
