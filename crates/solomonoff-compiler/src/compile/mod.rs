//! Conversion between construction graphs and ranged graphs.
//!
//! - `sweep`: [`compile`], the range-merging sweep
//! - `decompile`: [`decompile`], the way back for externally produced automata

mod decompile;
mod sweep;

#[cfg(test)]
mod decompile_tests;

pub use decompile::decompile;
pub use sweep::compile;
