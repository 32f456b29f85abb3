//! Subset construction.
//!
//! Outputs and weights are dropped: the result is a deterministic acceptor
//! for the input language.

use indexmap::IndexSet;
use solomonoff_core::{Edge, Partial};
use solomonoff_ranged::{Range, RangedGraph, RangedState, StateIdx, Trans, zip_partitions};

/// Determinize the acceptor view of `graph`.
///
/// Each result state carries its sorted member list as metadata. Subsets are
/// created on first reach, starting from `{initial}` at index 0.
pub fn powerset<V>(graph: &RangedGraph<V>) -> RangedGraph<Vec<StateIdx>> {
    let minimal = graph.alphabet().minimal();
    let mut subsets: IndexSet<Vec<StateIdx>> = IndexSet::new();
    subsets.insert(vec![graph.initial()]);

    let mut states = Vec::new();
    let mut next = 0;
    while let Some(members) = subsets.get_index(next).cloned() {
        let partitions: Vec<&[Range]> = members.iter().map(|&m| graph.ranges(m)).collect();
        let mut ranges = Vec::new();
        for segment in zip_partitions(minimal, &partitions) {
            let mut targets: Vec<StateIdx> = segment
                .transitions
                .iter()
                .flat_map(|ts| ts.iter().map(|t| t.target))
                .collect();
            targets.sort_unstable();
            targets.dedup();

            let edges = if targets.is_empty() {
                Vec::new()
            } else {
                let (idx, _) = subsets.insert_full(targets);
                let edge = Edge::neutral(segment.from_exclusive, segment.to_inclusive);
                vec![Trans::new(edge, idx as StateIdx)]
            };
            ranges.push(Range::new(segment.to_inclusive, edges));
        }

        let accepting = members
            .iter()
            .any(|&m| graph.accepting(Some(m)).is_some())
            .then(Partial::neutral);
        states.push(RangedState {
            ranges,
            accepting,
            meta: members,
        });
        next += 1;
    }

    tracing::debug!(states = graph.len(), subsets = states.len(), "powerset");
    RangedGraph::new(*graph.alphabet(), states, 0)
}
