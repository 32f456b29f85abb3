//! Inversion: read what the graph wrote, write what it read.
//!
//! Edges with output become chains reading that output one symbol at a time.
//! Edges without output read nothing once inverted; they are eliminated by
//! splicing every chain onto the states whose empty-output closure reaches the
//! chain's source, carrying the closure's original input as output.

use std::collections::HashSet;

use indexmap::IndexMap;
use solomonoff_core::{Alphabet, Edge, Graph, Output, Partial, StateId, Symbol};

use crate::{InversionError, Result};

type Inverted<T> = std::result::Result<T, InversionError>;

/// Invert `graph` over `alphabet`.
///
/// Requirements, checked per edge:
/// - at most one reflect per output
/// - edges without reflect read a single symbol
/// - edges without output read a single symbol and form no cycle or diamond
pub fn inverse<V>(mut graph: Graph<V>, alphabet: &Alphabet) -> Result<Graph<V>>
where
    V: Clone + Default,
{
    let entry = graph.make_unique_initial_state(V::default());

    // sources[q]: every state whose closure reaches q, with the closure's
    // original input and weight.
    let mut sources: Vec<Vec<(StateId, Partial)>> = vec![Vec::new(); graph.len()];
    for start in 0..graph.len() as StateId {
        for (reached, via) in epsilon_closure(&graph, start)? {
            sources[reached as usize].push((start, via));
        }
    }

    let mut inverted = Graph::new();
    for (_, state) in graph.iter() {
        inverted.add_state(state.meta.clone());
    }

    for (q, state) in graph.iter() {
        for (edge, target) in &state.outgoing {
            if edge.output.is_empty() {
                continue;
            }
            let hops = plan_chain(edge, alphabet)?;
            let mut stops: Vec<StateId> = (1..hops.len())
                .map(|_| inverted.add_state(state.meta.clone()))
                .collect();
            stops.push(*target);

            for (j, hop) in hops.iter().enumerate().skip(1) {
                inverted.connect(stops[j - 1], hop.clone(), stops[j]);
            }
            for (source, via) in &sources[q as usize] {
                let first = hops[0].left_action(via).right_action(&edge_weight(edge));
                inverted.connect(*source, first, stops[0]);
            }
        }

        if let Some(fin) = graph.final_edge(q) {
            let symbols: Vec<Symbol> = fin
                .output
                .iter()
                .filter(|&s| s != alphabet.reflect())
                .collect();
            for (source, via) in &sources[q as usize] {
                let mut at = *source;
                for &symbol in &symbols {
                    let next = inverted.add_state(state.meta.clone());
                    inverted.connect(at, Edge::neutral(alphabet.predecessor(symbol), symbol), next);
                    at = next;
                }
                let accept = via.multiply(&Partial::new(Output::empty(), fin.weight));
                settle_final(&mut inverted, at, accept)?;
            }
        }
    }

    for (edge, target) in inverted.outgoing(entry).to_vec() {
        inverted.add_initial(edge, target);
    }
    let epsilon = inverted.final_edge(entry).cloned();
    inverted.set_epsilon(epsilon);
    let mut keep = vec![true; inverted.len()];
    keep[entry as usize] = false;
    inverted.retain_states(&keep);

    tracing::debug!(states = graph.len(), inverted = inverted.len(), "inverse");
    Ok(inverted)
}

fn edge_weight(edge: &Edge) -> Partial {
    Partial::new(Output::empty(), edge.weight)
}

/// One inverted edge per output symbol, all with zero weight.
///
/// A reflect reads the original range and writes a reflect; a literal reads
/// itself. Without a reflect the first hop writes the original input symbol.
fn plan_chain(edge: &Edge, alphabet: &Alphabet) -> Inverted<Vec<Edge>> {
    let reflect = alphabet.reflect();
    let reflections = edge.output.iter().filter(|&s| s == reflect).count();
    if reflections > 1 {
        return Err(InversionError::DoubleReflection { edge: edge.clone() });
    }
    if reflections == 0 && !edge.is_single_symbol() {
        return Err(InversionError::RangeWithoutReflection { edge: edge.clone() });
    }

    let mut hops: Vec<Edge> = edge
        .output
        .iter()
        .map(|symbol| {
            if symbol == reflect {
                Edge::new(edge.from_exclusive, edge.to_inclusive, Output::new(vec![reflect]), 0)
            } else {
                Edge::neutral(alphabet.predecessor(symbol), symbol)
            }
        })
        .collect();
    if reflections == 0 {
        hops[0].output = Output::new(vec![edge.to_inclusive]);
    }
    Ok(hops)
}

enum Visit {
    Enter(StateId, Partial),
    Exit(StateId),
}

/// States reachable from `start` over empty-output edges, with the input
/// read and weight collected on the way. `start` itself comes first.
fn epsilon_closure<V>(graph: &Graph<V>, start: StateId) -> Inverted<Vec<(StateId, Partial)>> {
    let mut found: IndexMap<StateId, Partial> = IndexMap::new();
    let mut on_path: HashSet<StateId> = HashSet::new();
    let mut stack = vec![Visit::Enter(start, Partial::neutral())];

    while let Some(visit) = stack.pop() {
        let (state, via) = match visit {
            Visit::Exit(state) => {
                on_path.remove(&state);
                continue;
            }
            Visit::Enter(state, via) => (state, via),
        };
        if on_path.contains(&state) {
            return Err(InversionError::EpsilonCycle { state });
        }
        if found.contains_key(&state) {
            return Err(InversionError::AmbiguousEpsilon { state });
        }

        on_path.insert(state);
        stack.push(Visit::Exit(state));
        for (edge, target) in graph.outgoing(state).iter().rev() {
            if !edge.output.is_empty() {
                continue;
            }
            if !edge.is_single_symbol() {
                return Err(InversionError::RangeWithoutReflection { edge: edge.clone() });
            }
            let step = Partial::new(vec![edge.to_inclusive], edge.weight);
            stack.push(Visit::Enter(*target, via.multiply(&step)));
        }
        found.insert(state, via);
    }

    Ok(found.into_iter().collect())
}

/// Set or reconcile the final edge of `state`: heavier wins, equal weight
/// must agree on output.
fn settle_final<V>(graph: &mut Graph<V>, state: StateId, accept: Partial) -> Inverted<()> {
    match graph.final_edge(state) {
        Some(existing) if existing.weight > accept.weight => Ok(()),
        Some(existing) if existing.weight == accept.weight => {
            if existing.output == accept.output {
                Ok(())
            } else {
                Err(InversionError::FinalConflict {
                    state,
                    lhs: existing.clone(),
                    rhs: accept,
                })
            }
        }
        _ => {
            graph.set_final(state, accept);
            Ok(())
        }
    }
}
