//! Errors that can occur during evaluation.

use solomonoff_core::Weight;
use solomonoff_ranged::StateIdx;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Two runs reached the same state (or accepted) with equal weight but
    /// different outputs.
    #[error("nondeterministic output at state {state}: two runs of weight {weight} disagree")]
    FunctionalityViolation { state: StateIdx, weight: Weight },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
