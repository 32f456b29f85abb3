//! Solomonoff: weighted ranged transducers.
//!
//! Build a [`Graph`] with the regular operations, [`compile`] it into a
//! [`RangedGraph`] and run it with an [`Evaluator`].
//!
//! # Example
//!
//! ```
//! use solomonoff::{Alphabet, Evaluator, Graph, Partial, compile};
//!
//! let a = Graph::atomic_symbol((), 'a' as u32)?;
//! let b = Graph::atomic_symbol((), 'b' as u32)?.left_action(&Partial::new("x", 0));
//! let ranged = compile(&a.concat(b), &Alphabet::UNICODE);
//!
//! let out = Evaluator::new(&ranged).evaluate_str("ab")?;
//! assert_eq!(out.as_deref(), Some("x"));
//! # Ok::<(), solomonoff::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use solomonoff_compiler::{
    CompileError, FunctionalityCounterexample, InversionError, MinimizeStats,
    OutputCounterexample, PseudoMinimize, SubsetCounterexample, TrimStats, check_subset, compile,
    compose, decompile, intersection, inverse, is_output_subset, is_strongly_functional,
    is_subset, is_subset_nondeterministic, merge_finals, powerset, product, pseudo_minimize,
    pseudo_minimize_with, reduce_edges, same_output, trim,
};
pub use solomonoff_core::{
    AlgebraError, Alphabet, Edge, Graph, GraphPrinter, Output, Partial, State, StateId, Symbol,
    Weight, epsilon_kleene, epsilon_union,
};
pub use solomonoff_ranged::{Range, RangedGraph, RangedPrinter, RangedState, StateIdx, Trans};
pub use solomonoff_vm::{Evaluator, NoopTracer, PrintTracer, RuntimeError, Tracer, Verbosity};

/// Errors from any stage: building, compiling passes or evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
