//! Trim pass.
//!
//! Removes states that cannot take part in any accepting path: those not
//! reachable from the initial edges and those from which no final edge can be
//! reached.

use solomonoff_core::{Graph, StateId};

/// Statistics from trimming.
#[derive(Debug, Default)]
pub struct TrimStats {
    pub unreachable: usize,
    pub unobservable: usize,
}

impl TrimStats {
    pub fn removed(&self) -> usize {
        self.unreachable + self.unobservable
    }
}

/// Remove dead states and compact the arena.
pub fn trim<V>(graph: &mut Graph<V>) -> TrimStats {
    let reachable = compute_reachable(graph);
    let predecessors = build_predecessor_map(graph);
    let observable = compute_observable(graph, &predecessors);

    let mut stats = TrimStats::default();
    let keep: Vec<bool> = reachable
        .iter()
        .zip(&observable)
        .map(|(&r, &o)| {
            if !r {
                stats.unreachable += 1;
            } else if !o {
                stats.unobservable += 1;
            }
            r && o
        })
        .collect();

    if stats.removed() > 0 {
        graph.retain_states(&keep);
    }
    tracing::debug!(
        unreachable = stats.unreachable,
        unobservable = stats.unobservable,
        remaining = graph.len(),
        "trim"
    );
    stats
}

/// States reachable from the initial edges.
fn compute_reachable<V>(graph: &Graph<V>) -> Vec<bool> {
    let mut reachable = vec![false; graph.len()];
    let mut queue: Vec<StateId> = graph.initial().iter().map(|(_, t)| *t).collect();

    while let Some(state) = queue.pop() {
        if std::mem::replace(&mut reachable[state as usize], true) {
            continue;
        }
        queue.extend(graph.outgoing(state).iter().map(|(_, t)| *t));
    }

    reachable
}

/// States from which some final edge is reachable.
fn compute_observable<V>(graph: &Graph<V>, predecessors: &[Vec<StateId>]) -> Vec<bool> {
    let mut observable = vec![false; graph.len()];
    let mut queue: Vec<StateId> = graph.finals().keys().copied().collect();

    while let Some(state) = queue.pop() {
        if std::mem::replace(&mut observable[state as usize], true) {
            continue;
        }
        queue.extend(predecessors[state as usize].iter().copied());
    }

    observable
}

/// Reverse adjacency: for each state, the states with an edge into it.
fn build_predecessor_map<V>(graph: &Graph<V>) -> Vec<Vec<StateId>> {
    let mut predecessors = vec![Vec::new(); graph.len()];
    for (source, state) in graph.iter() {
        for (_, target) in &state.outgoing {
            predecessors[*target as usize].push(source);
        }
    }
    predecessors
}
