#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for weighted ranged transducers.
//!
//! Two layers:
//! - **Edge algebra**: symbols, outputs, weights, full and partial edges
//! - **Construction graph**: the mutable automaton and its regular operations
//!
//! Compiled (query-time) graphs live in `solomonoff-ranged`.

mod alphabet;
mod edge;
mod error;
pub mod graph;

#[cfg(test)]
mod edge_tests;

pub use alphabet::{Alphabet, Symbol, Weight, format_range, format_symbol};
pub use edge::{Edge, Output, Partial};
pub use error::{AlgebraError, Result};
pub use graph::{Graph, GraphPrinter, State, StateId, epsilon_kleene, epsilon_union};
