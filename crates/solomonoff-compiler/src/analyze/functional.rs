//! Strong functionality check.
//!
//! A graph is strongly functional when no two distinct paths reading the same
//! input can tie: no two different transitions with equal weight meet in one
//! state, and no two different states accept with equal weight. The check
//! runs over the self-product; passing it guarantees that evaluation never
//! reports a functionality violation.

use solomonoff_core::{Edge, Partial, Symbol};
use solomonoff_ranged::{RangedGraph, StateIdx, zip_partitions};

use super::search::Frontier;

/// Witness of a possible tie between two paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionalityCounterexample {
    /// Two different transitions with equal weight enter the same state.
    ToSameState {
        input: Vec<Symbol>,
        sources: (StateIdx, StateIdx),
        target: StateIdx,
        edges: (Edge, Edge),
    },
    /// Two different states both accept with equal weight.
    Final {
        input: Vec<Symbol>,
        states: (StateIdx, StateIdx),
        finals: (Partial, Partial),
    },
}

impl FunctionalityCounterexample {
    pub fn input(&self) -> &[Symbol] {
        match self {
            Self::ToSameState { input, .. } | Self::Final { input, .. } => input,
        }
    }
}

pub fn is_strongly_functional<V>(
    graph: &RangedGraph<V>,
) -> Result<(), FunctionalityCounterexample> {
    let minimal = graph.alphabet().minimal();
    let mut frontier = Frontier::new((graph.initial(), graph.initial()));

    let mut next = 0;
    while let Some((l, r)) = frontier.get(next) {
        if l != r {
            let finals = (graph.accepting(Some(l)), graph.accepting(Some(r)));
            if let (Some(a), Some(b)) = finals {
                if a.weight == b.weight {
                    return Err(FunctionalityCounterexample::Final {
                        input: frontier.word(next),
                        states: (l, r),
                        finals: (a.clone(), b.clone()),
                    });
                }
            }
        }

        for segment in zip_partitions(minimal, &[graph.ranges(l), graph.ranges(r)]) {
            for (i, a) in segment.transitions[0].iter().enumerate() {
                for (j, b) in segment.transitions[1].iter().enumerate() {
                    let same_path = l == r && i == j;
                    if !same_path && a.target == b.target && a.edge.weight == b.edge.weight {
                        let mut input = frontier.word(next);
                        input.push(segment.to_inclusive);
                        return Err(FunctionalityCounterexample::ToSameState {
                            input,
                            sources: (l, r),
                            target: a.target,
                            edges: (a.edge.clone(), b.edge.clone()),
                        });
                    }
                    frontier.discover((a.target, b.target), next, segment.to_inclusive);
                }
            }
        }
        next += 1;
    }

    tracing::debug!(pairs = next, "strongly functional");
    Ok(())
}
