//! Range-merging sweep.
//!
//! Turns the overlapping, unordered edge ranges of each construction-graph
//! state into a sorted partition of the whole alphabet.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use solomonoff_core::{Alphabet, Edge, Graph, StateId, Symbol};
use solomonoff_ranged::{Range, RangedGraph, RangedState, StateIdx, Trans};

/// Compile a construction graph into a ranged graph.
///
/// A synthetic entry state (index 0, default meta) takes the initial edges as
/// its outgoing edges and the epsilon as its final edge. The remaining
/// reachable states are numbered in discovery order; unreachable ones are
/// dropped.
pub fn compile<V: Clone + Default>(graph: &Graph<V>, alphabet: &Alphabet) -> RangedGraph<V> {
    let order = discover(graph);
    let dense = |id: StateId| -> StateIdx {
        // Discovery covers every edge target, so the lookup cannot miss.
        order.get_index_of(&id).map_or(0, |i| i as StateIdx + 1)
    };

    let mut states = Vec::with_capacity(order.len() + 1);
    states.push(RangedState {
        ranges: sweep(graph.initial(), &dense, alphabet),
        accepting: graph.epsilon().cloned(),
        meta: V::default(),
    });
    for &id in &order {
        states.push(RangedState {
            ranges: sweep(graph.outgoing(id), &dense, alphabet),
            accepting: graph.final_edge(id).cloned(),
            meta: graph.meta(id).clone(),
        });
    }

    let ranged = RangedGraph::new(*alphabet, states, 0);
    debug_assert!(ranged.validate().is_ok(), "sweep produced a broken partition");
    tracing::debug!(
        states = graph.len(),
        reachable = order.len(),
        compiled = ranged.len(),
        "compiled ranged graph"
    );
    ranged
}

/// States reachable from the initial edges, in depth-first discovery order.
fn discover<V>(graph: &Graph<V>) -> IndexSet<StateId> {
    let mut order = IndexSet::new();
    let mut stack = Vec::new();
    let visit = |target: StateId, order: &mut IndexSet<StateId>, stack: &mut Vec<StateId>| {
        if order.insert(target) {
            stack.push(target);
        }
    };

    for (_, target) in graph.initial() {
        visit(*target, &mut order, &mut stack);
    }
    while let Some(state) = stack.pop() {
        for (_, target) in graph.outgoing(state) {
            visit(*target, &mut order, &mut stack);
        }
    }
    order
}

/// One end of an edge's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Boundary {
    symbol: Symbol,
    begins: bool,
    edge: usize,
}

/// Sweep the boundaries of `edges` left to right, emitting one range per
/// distinct boundary above `minimal`.
fn sweep(
    edges: &[(Edge, StateId)],
    dense: &impl Fn(StateId) -> StateIdx,
    alphabet: &Alphabet,
) -> Vec<Range> {
    let mut boundaries = Vec::with_capacity(edges.len() * 2);
    for (idx, (edge, _)) in edges.iter().enumerate() {
        debug_assert!(
            edge.from_exclusive < edge.to_inclusive && edge.to_inclusive <= alphabet.maximal(),
            "edge {edge} does not fit the alphabet"
        );
        boundaries.push(Boundary {
            symbol: edge.from_exclusive,
            begins: true,
            edge: idx,
        });
        boundaries.push(Boundary {
            symbol: edge.to_inclusive,
            begins: false,
            edge: idx,
        });
    }
    boundaries.sort_unstable();

    let mut ranges = Vec::with_capacity(boundaries.len() + 1);
    let mut active: BTreeSet<usize> = BTreeSet::new();
    for group in boundaries.chunk_by(|a, b| a.symbol == b.symbol) {
        let symbol = group[0].symbol;
        if symbol > alphabet.minimal() {
            let transitions = active
                .iter()
                .map(|&idx| {
                    let (edge, target) = &edges[idx];
                    Trans::new(edge.clone(), dense(*target))
                })
                .collect();
            ranges.push(Range::new(symbol, transitions));
        }
        for boundary in group {
            if boundary.begins {
                active.insert(boundary.edge);
            } else {
                active.remove(&boundary.edge);
            }
        }
    }
    debug_assert!(active.is_empty());

    if ranges.last().is_none_or(|r| r.input != alphabet.maximal()) {
        ranges.push(Range::new(alphabet.maximal(), Vec::new()));
    }
    ranges
}
