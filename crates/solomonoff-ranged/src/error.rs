//! Partition validation errors.

use solomonoff_core::Symbol;

use crate::graph::StateIdx;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangedError {
    #[error("state {state} has an empty partition")]
    EmptyPartition { state: StateIdx },

    #[error("state {state} has a boundary at the minimal symbol")]
    StartsAtMinimal { state: StateIdx },

    #[error("state {state} has unsorted or duplicate boundary {boundary:#x}")]
    Unsorted { state: StateIdx, boundary: Symbol },

    #[error("state {state} partition ends at {last:#x} instead of the maximal symbol")]
    DoesNotReachMaximal { state: StateIdx, last: Symbol },

    #[error("state {state} has a transition to missing state {target}")]
    DanglingTarget { state: StateIdx, target: StateIdx },

    #[error("initial state {initial} out of bounds")]
    InitialOutOfBounds { initial: StateIdx },
}

pub type Result<T> = std::result::Result<T, RangedError>;
