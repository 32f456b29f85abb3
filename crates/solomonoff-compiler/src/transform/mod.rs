//! Transformations producing new construction graphs.
//!
//! - `compose`: sequential composition with a compiled graph
//! - `inverse`: swap input and output

mod compose;
mod inverse;

#[cfg(test)]
mod compose_tests;
#[cfg(test)]
mod inverse_tests;

pub use compose::compose;
pub use inverse::inverse;
