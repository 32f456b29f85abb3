//! Ranged graph back to construction graph.

use solomonoff_core::Graph;
use solomonoff_ranged::RangedGraph;

/// Rebuild a construction graph with one state per ranged state.
///
/// Each transition becomes an edge over its range. The ranged initial state
/// stays an ordinary state (loops may re-enter it); its transitions are also
/// copied to the initial edges and its acceptance becomes the epsilon.
pub fn decompile<V: Clone>(ranged: &RangedGraph<V>) -> Graph<V> {
    let minimal = ranged.alphabet().minimal();
    let mut graph = Graph::new();
    for (_, state) in ranged.iter() {
        graph.add_state(state.meta.clone());
    }

    for (idx, state) in ranged.iter() {
        let mut prev = minimal;
        for range in &state.ranges {
            for trans in &range.edges {
                graph.connect(idx, trans.edge.with_range(prev, range.input), trans.target);
            }
            prev = range.input;
        }
        if let Some(fin) = &state.accepting {
            graph.set_final(idx, fin.clone());
        }
    }

    let initial = ranged.initial();
    for (edge, target) in graph.outgoing(initial).to_vec() {
        graph.add_initial(edge, target);
    }
    graph.set_epsilon(ranged.accepting(Some(initial)).cloned());
    graph
}
