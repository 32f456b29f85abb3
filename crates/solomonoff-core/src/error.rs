//! Errors raised by the graph algebra.

use crate::alphabet::{Symbol, Weight};
use crate::edge::Output;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgebraError {
    /// Union of two languages that both accept the empty word ambiguously.
    #[error("epsilons {lhs} and {rhs} have equal weight {weight} but different outputs")]
    EpsilonConflict {
        lhs: Output,
        rhs: Output,
        weight: Weight,
    },

    /// Kleene closure over a language whose empty word already produces output.
    #[error("epsilon with output {output} under Kleene closure")]
    KleeneNonNeutralEpsilon { output: Output },

    #[error("empty range ({from_exclusive:#x}, {to_inclusive:#x}]")]
    EmptyRange {
        from_exclusive: Symbol,
        to_inclusive: Symbol,
    },
}

/// Result type for graph algebra operations.
pub type Result<T> = std::result::Result<T, AlgebraError>;
