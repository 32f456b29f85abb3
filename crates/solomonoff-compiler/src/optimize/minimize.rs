//! Heuristic pseudo-minimization.
//!
//! Merges states without building equivalence classes:
//! - forward: states with identical outgoing edges and equivalent finals
//!   share their future, so one can stand in for the other
//! - backward: states with identical incoming edges share their past, so one
//!   can carry both futures
//!
//! Each phase repeats until a round merges nothing. The result is not the
//! minimal automaton; edges over adjacent ranges are never fused, so states
//! differing only in how a range is split stay apart.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use indexmap::IndexMap;
use solomonoff_core::{Edge, Graph, Partial, StateId};

use crate::{CompileError, Result};

/// Pseudo-minimization options.
#[derive(Debug, Clone)]
pub struct PseudoMinimize {
    forward: bool,
    backward: bool,
    max_rounds: usize,
}

impl Default for PseudoMinimize {
    fn default() -> Self {
        Self {
            forward: true,
            backward: true,
            max_rounds: usize::MAX,
        }
    }
}

impl PseudoMinimize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the forward (identical future) phase.
    pub fn forward(mut self, enabled: bool) -> Self {
        self.forward = enabled;
        self
    }

    /// Enable or disable the backward (identical past) phase.
    pub fn backward(mut self, enabled: bool) -> Self {
        self.backward = enabled;
        self
    }

    /// Cap the number of rounds per phase.
    pub fn max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }
}

/// Statistics from pseudo-minimization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MinimizeStats {
    pub forward_merges: usize,
    pub backward_merges: usize,
    /// Candidate pairs whose finals could not be merged.
    pub blocked: usize,
    pub rounds: usize,
}

/// Default final equivalence: equal outputs.
pub fn same_output(lhs: &Partial, rhs: &Partial) -> bool {
    lhs.output == rhs.output
}

/// Default final merge: the heavier final wins.
pub fn merge_finals(lhs: &Partial, rhs: &Partial) -> Result<Partial> {
    if lhs.weight == rhs.weight && lhs.output != rhs.output {
        return Err(CompileError::MinimizationNondeterminism {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        });
    }
    let winner = if rhs.weight > lhs.weight { rhs } else { lhs };
    Ok(winner.clone())
}

/// Pseudo-minimize with the default final strategies.
pub fn pseudo_minimize<V>(graph: &mut Graph<V>, options: &PseudoMinimize) -> MinimizeStats {
    pseudo_minimize_with(graph, options, same_output, merge_finals)
}

/// Pseudo-minimize with caller-supplied final strategies.
///
/// `equivalent` decides whether two finals may live on one state; `merge`
/// produces the surviving final and may refuse, which blocks that merge only.
pub fn pseudo_minimize_with<V, E, M>(
    graph: &mut Graph<V>,
    options: &PseudoMinimize,
    equivalent: E,
    merge: M,
) -> MinimizeStats
where
    E: Fn(&Partial, &Partial) -> bool,
    M: Fn(&Partial, &Partial) -> Result<Partial>,
{
    let mut merger = Merger {
        alive: vec![true; graph.len()],
        equivalent,
        merge,
        stats: MinimizeStats::default(),
    };

    if options.forward {
        for _ in 0..options.max_rounds {
            merger.stats.rounds += 1;
            if merger.forward_round(graph) == 0 {
                break;
            }
        }
    }
    if options.backward {
        for _ in 0..options.max_rounds {
            merger.stats.rounds += 1;
            if merger.backward_round(graph) == 0 {
                break;
            }
        }
    }

    let stats = merger.stats;
    if stats.forward_merges + stats.backward_merges > 0 {
        graph.retain_states(&merger.alive);
    }
    tracing::debug!(
        forward = stats.forward_merges,
        backward = stats.backward_merges,
        blocked = stats.blocked,
        rounds = stats.rounds,
        remaining = graph.len(),
        "pseudo-minimize"
    );
    stats
}

/// Incoming edge; `None` is the virtual source of the initial edges.
type Incoming = (Option<StateId>, Edge);

struct Merger<E, M> {
    alive: Vec<bool>,
    equivalent: E,
    merge: M,
    stats: MinimizeStats,
}

impl<E, M> Merger<E, M>
where
    E: Fn(&Partial, &Partial) -> bool,
    M: Fn(&Partial, &Partial) -> Result<Partial>,
{
    // ------------------------------------------------------------------------
    // Forward phase
    // ------------------------------------------------------------------------

    fn forward_round<V>(&mut self, graph: &mut Graph<V>) -> usize {
        for state in self.live_states() {
            normalize(&mut graph.state_mut(state).outgoing);
        }

        let mut groups: IndexMap<u64, Vec<StateId>> = IndexMap::new();
        for state in self.live_states() {
            let mut hasher = DefaultHasher::new();
            graph.outgoing(state).hash(&mut hasher);
            graph.final_edge(state).map(|f| &f.output).hash(&mut hasher);
            groups.entry(hasher.finish()).or_default().push(state);
        }

        let mut replacement: Vec<StateId> = (0..graph.len() as StateId).collect();
        let mut merged = 0;
        for group in groups.values().filter(|g| g.len() > 1) {
            for (i, &survivor) in group.iter().enumerate() {
                if replacement[survivor as usize] != survivor {
                    continue;
                }
                for &loser in &group[i + 1..] {
                    if replacement[loser as usize] != loser
                        || graph.outgoing(survivor) != graph.outgoing(loser)
                    {
                        continue;
                    }
                    let fin = match (graph.final_edge(survivor), graph.final_edge(loser)) {
                        (None, None) => None,
                        (Some(lhs), Some(rhs)) => match self.merge_pair(lhs, rhs) {
                            Some(fin) => Some(fin),
                            None => continue,
                        },
                        _ => continue,
                    };

                    replacement[loser as usize] = survivor;
                    self.alive[loser as usize] = false;
                    graph.state_mut(loser).outgoing.clear();
                    graph.remove_final(loser);
                    if let Some(fin) = fin {
                        graph.set_final(survivor, fin);
                    }
                    merged += 1;
                }
            }
        }

        if merged > 0 {
            redirect(graph, &replacement);
        }
        self.stats.forward_merges += merged;
        merged
    }

    // ------------------------------------------------------------------------
    // Backward phase
    // ------------------------------------------------------------------------

    fn backward_round<V>(&mut self, graph: &mut Graph<V>) -> usize {
        let incoming = self.build_incoming(graph);

        let mut groups: IndexMap<u64, Vec<StateId>> = IndexMap::new();
        for state in self.live_states() {
            let edges = &incoming[state as usize];
            if edges.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            edges.hash(&mut hasher);
            groups.entry(hasher.finish()).or_default().push(state);
        }

        // Losers of this round; their labels in `incoming` are stale.
        let mut merged_away = vec![false; graph.len()];
        let mut merged = 0;
        for group in groups.values().filter(|g| g.len() > 1) {
            for (i, &survivor) in group.iter().enumerate() {
                if merged_away[survivor as usize] {
                    continue;
                }
                for &loser in &group[i + 1..] {
                    let shared = &incoming[survivor as usize];
                    if merged_away[loser as usize] || *shared != incoming[loser as usize] {
                        continue;
                    }
                    let self_referencing = shared.iter().any(|(source, _)| match source {
                        Some(s) => *s == survivor || *s == loser || merged_away[*s as usize],
                        None => false,
                    });
                    if self_referencing {
                        continue;
                    }
                    let fin = match (graph.final_edge(survivor), graph.final_edge(loser)) {
                        (None, None) => None,
                        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
                        (Some(lhs), Some(rhs)) => match self.merge_pair(lhs, rhs) {
                            Some(fin) => Some(fin),
                            None => continue,
                        },
                    };

                    let moved = std::mem::take(&mut graph.state_mut(loser).outgoing);
                    let outgoing = &mut graph.state_mut(survivor).outgoing;
                    outgoing.extend(moved);
                    normalize(outgoing);

                    for (source, _) in &incoming[loser as usize] {
                        match source {
                            Some(s) => graph.state_mut(*s).outgoing.retain(|(_, t)| *t != loser),
                            None => graph.initial_mut().retain(|(_, t)| *t != loser),
                        }
                    }

                    graph.remove_final(loser);
                    if let Some(fin) = fin {
                        graph.set_final(survivor, fin);
                    }
                    self.alive[loser as usize] = false;
                    merged_away[loser as usize] = true;
                    merged += 1;
                }
            }
        }

        self.stats.backward_merges += merged;
        merged
    }

    /// Reverse adjacency of the live states, each list sorted and deduplicated.
    fn build_incoming<V>(&self, graph: &Graph<V>) -> Vec<Vec<Incoming>> {
        let mut incoming: Vec<Vec<Incoming>> = vec![Vec::new(); graph.len()];
        for (edge, target) in graph.initial() {
            incoming[*target as usize].push((None, edge.clone()));
        }
        for source in self.live_states() {
            for (edge, target) in graph.outgoing(source) {
                incoming[*target as usize].push((Some(source), edge.clone()));
            }
        }
        for edges in &mut incoming {
            edges.sort_unstable();
            edges.dedup();
        }
        incoming
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn live_states(&self) -> Vec<StateId> {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(id, _)| id as StateId)
            .collect()
    }

    /// Merged final of two candidates, or `None` when they must stay apart.
    fn merge_pair(&mut self, lhs: &Partial, rhs: &Partial) -> Option<Partial> {
        if !(self.equivalent)(lhs, rhs) {
            return None;
        }
        match (self.merge)(lhs, rhs) {
            Ok(fin) => Some(fin),
            Err(_) => {
                self.stats.blocked += 1;
                None
            }
        }
    }
}

/// Sort an adjacency list and drop exact duplicates.
fn normalize(edges: &mut Vec<(Edge, StateId)>) {
    edges.sort_unstable();
    edges.dedup();
}

/// Point every edge and initial edge at its state's replacement.
fn redirect<V>(graph: &mut Graph<V>, replacement: &[StateId]) {
    let mut seen = HashSet::new();
    let initial = graph.initial_mut();
    for (_, target) in initial.iter_mut() {
        *target = replacement[*target as usize];
    }
    initial.retain(|entry| seen.insert(entry.clone()));

    for id in 0..graph.len() as StateId {
        for (_, target) in &mut graph.state_mut(id).outgoing {
            *target = replacement[*target as usize];
        }
    }
}
