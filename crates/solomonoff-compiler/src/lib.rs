//! Passes over weighted ranged transducers.
//!
//! - `compile` - range-merging sweep into a [`RangedGraph`], and back
//! - `optimize` - trim, pseudo-minimization, edge reduction
//! - `analyze` - powerset, products, subset and functionality checks
//! - `transform` - sequential composition and inversion
//!
//! [`RangedGraph`]: solomonoff_ranged::RangedGraph

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod compile;
pub mod optimize;
pub mod transform;

#[cfg(test)]
pub mod test_utils;

use solomonoff_core::{Edge, Output, Partial, StateId, Weight};
use solomonoff_ranged::StateIdx;

pub use analyze::{
    FunctionalityCounterexample, OutputCounterexample, SubsetCounterexample, check_subset,
    intersection, is_output_subset, is_strongly_functional, is_subset,
    is_subset_nondeterministic, powerset, product,
};
pub use compile::{compile, decompile};
pub use optimize::{
    MinimizeStats, PseudoMinimize, TrimStats, merge_finals, pseudo_minimize,
    pseudo_minimize_with, reduce_edges, same_output, trim,
};
pub use transform::{compose, inverse};

/// Errors raised by compiler passes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Two states picked for merging have equal-weight finals with different outputs.
    #[error("final edges {lhs} and {rhs} have equal weight but different outputs")]
    MinimizationNondeterminism { lhs: Partial, rhs: Partial },

    #[error("state {state} has transitions {lhs} and {rhs} to N{target} with equal weight")]
    EdgeReductionNondeterminism {
        state: StateIdx,
        target: StateIdx,
        lhs: Edge,
        rhs: Edge,
    },

    #[error("composition is ambiguous: outputs {lhs} and {rhs} share weight {weight}")]
    CompositionNondeterminism {
        lhs: Output,
        rhs: Output,
        weight: Weight,
    },

    #[error(transparent)]
    Inversion(#[from] InversionError),

    /// Left-hand language is not contained in the right-hand one.
    #[error("input {input} is accepted on the left but rejected on the right")]
    TypecheckMismatch { input: Output },
}

/// Reasons a transducer cannot be inverted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InversionError {
    #[error("edge {edge} reflects its input more than once")]
    DoubleReflection { edge: Edge },

    #[error("edge {edge} spans several symbols but does not reflect its input")]
    RangeWithoutReflection { edge: Edge },

    #[error("state {state} lies on a cycle of edges with empty output")]
    EpsilonCycle { state: StateId },

    #[error("state {state} is reached by several paths of edges with empty output")]
    AmbiguousEpsilon { state: StateId },

    #[error("state {state} accepts with {lhs} and {rhs} at equal weight")]
    FinalConflict {
        state: StateId,
        lhs: Partial,
        rhs: Partial,
    },
}

pub type Result<T> = std::result::Result<T, CompileError>;
