//! Construction graphs and the regular operations that splice them.
//!
//! # Architecture
//!
//! ```text
//! atomic constructors → Graph ─[union/concat/kleene/actions]→ Graph → compiler
//! ```
//!
//! A [`Graph`] is mutable and singly linked. Operators consume their operands,
//! so fragments are combined by moving arenas rather than sharing states.

mod algebra;
mod build;
mod dump;


pub use algebra::{epsilon_kleene, epsilon_union};
pub use build::{Graph, State, StateId};
pub use dump::GraphPrinter;
