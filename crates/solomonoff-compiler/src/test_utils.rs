//! Test utilities: small graph builders and a reference acceptor.

use solomonoff_core::{Alphabet, Graph, Partial};
use solomonoff_ranged::{RangedGraph, StateIdx};

use crate::compile::compile;

/// Graph reading exactly `text`, emitting nothing.
pub fn lit(text: &str) -> Graph<()> {
    text.chars()
        .map(|c| Graph::atomic_symbol((), c as u32).expect("non-zero symbol"))
        .fold(Graph::atomic_epsilon(Partial::neutral()), Graph::concat)
}

/// Graph reading one symbol from the closed range `from..=to`.
pub fn class(from: char, to: char) -> Graph<()> {
    Graph::atomic_range((), from as u32 - 1, to as u32).expect("non-empty range")
}

pub fn union(lhs: Graph<()>, rhs: Graph<()>) -> Graph<()> {
    lhs.union(rhs, solomonoff_core::epsilon_union)
        .expect("compatible epsilons")
}

pub fn compiled(graph: &Graph<()>) -> RangedGraph<()> {
    compile(graph, &Alphabet::UNICODE)
}

/// Nondeterministic acceptance, ignoring outputs and weights.
pub fn accepts<V>(graph: &RangedGraph<V>, input: &str) -> bool {
    let mut current: Vec<StateIdx> = vec![graph.initial()];
    for c in input.chars() {
        let mut next: Vec<StateIdx> = current
            .iter()
            .flat_map(|&s| graph.transitions(s, c as u32))
            .map(|t| t.target)
            .collect();
        next.sort_unstable();
        next.dedup();
        current = next;
    }
    current
        .into_iter()
        .any(|s| graph.accepting(Some(s)).is_some())
}
