//! Construction graph storage.
//!
//! States live in an arena and are addressed by [`StateId`]. Adjacency is
//! outgoing-only; passes that need predecessors build a scoped reverse index.

use indexmap::IndexMap;

use crate::edge::{Edge, Partial};

/// Index of a state in the graph's arena.
pub type StateId = u32;

/// A state with its metadata and outgoing transitions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct State<V> {
    pub meta: V,
    pub outgoing: Vec<(Edge, StateId)>,
}

/// Mutable, singly-linked transducer used while building and splicing.
///
/// Besides its states the graph has three entry/exit slots:
/// - `initial`: edges from a virtual entry point into the graph
/// - `finals`: subsequential output of accepting states
/// - `epsilon`: output for the empty input, bypassing all states
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Graph<V> {
    states: Vec<State<V>>,
    initial: Vec<(Edge, StateId)>,
    finals: IndexMap<StateId, Partial>,
    epsilon: Option<Partial>,
}

/// Entry/exit slots of a graph whose states were moved into another arena,
/// already renumbered.
pub(crate) struct Spliced {
    pub initial: Vec<(Edge, StateId)>,
    pub finals: IndexMap<StateId, Partial>,
    pub epsilon: Option<Partial>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Graph<V> {
    /// A graph of the empty language.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: Vec::new(),
            finals: IndexMap::new(),
            epsilon: None,
        }
    }

    pub fn add_state(&mut self, meta: V) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State {
            meta,
            outgoing: Vec::new(),
        });
        id
    }

    pub fn connect(&mut self, from: StateId, edge: Edge, to: StateId) {
        self.states[from as usize].outgoing.push((edge, to));
    }

    pub fn add_initial(&mut self, edge: Edge, to: StateId) {
        self.initial.push((edge, to));
    }

    /// Mark `state` accepting. Returns the previous final edge, if any.
    pub fn set_final(&mut self, state: StateId, edge: Partial) -> Option<Partial> {
        self.finals.insert(state, edge)
    }

    pub fn remove_final(&mut self, state: StateId) -> Option<Partial> {
        self.finals.shift_remove(&state)
    }

    pub fn set_epsilon(&mut self, epsilon: Option<Partial>) {
        self.epsilon = epsilon;
    }

    pub fn state(&self, id: StateId) -> &State<V> {
        &self.states[id as usize]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut State<V> {
        &mut self.states[id as usize]
    }

    pub fn meta(&self, id: StateId) -> &V {
        &self.states[id as usize].meta
    }

    pub fn outgoing(&self, id: StateId) -> &[(Edge, StateId)] {
        &self.states[id as usize].outgoing
    }

    pub fn initial(&self) -> &[(Edge, StateId)] {
        &self.initial
    }

    pub fn initial_mut(&mut self) -> &mut Vec<(Edge, StateId)> {
        &mut self.initial
    }

    pub fn finals(&self) -> &IndexMap<StateId, Partial> {
        &self.finals
    }

    pub fn finals_mut(&mut self) -> &mut IndexMap<StateId, Partial> {
        &mut self.finals
    }

    pub fn final_edge(&self, id: StateId) -> Option<&Partial> {
        self.finals.get(&id)
    }

    pub fn epsilon(&self) -> Option<&Partial> {
        self.epsilon.as_ref()
    }

    pub(crate) fn take_epsilon(&mut self) -> Option<Partial> {
        self.epsilon.take()
    }

    pub(crate) fn epsilon_mut(&mut self) -> Option<&mut Partial> {
        self.epsilon.as_mut()
    }

    /// Number of states in the arena (including unreachable ones).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total number of state-to-state edges.
    pub fn edge_count(&self) -> usize {
        self.states.iter().map(|s| s.outgoing.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State<V>)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StateId, s))
    }

    /// Whether the graph trivially accepts nothing: no epsilon and either no
    /// way in or no way out.
    pub fn is_empty_language(&self) -> bool {
        self.epsilon.is_none() && (self.initial.is_empty() || self.finals.is_empty())
    }

    /// Materialize the virtual entry point as a real state.
    ///
    /// The new state gets a copy of every initial edge as its outgoing edges and
    /// the epsilon as its final edge. Initial edges and epsilon are left as is;
    /// nothing points back at the new state.
    pub fn make_unique_initial_state(&mut self, meta: V) -> StateId {
        let entry = self.add_state(meta);
        self.states[entry as usize].outgoing = self.initial.clone();
        if let Some(eps) = self.epsilon.clone() {
            self.finals.insert(entry, eps);
        }
        entry
    }

    /// Move all states of `other` to the end of this arena and hand back its
    /// entry/exit slots renumbered into this arena.
    pub(crate) fn absorb(&mut self, other: Graph<V>) -> Spliced {
        let offset = self.states.len() as StateId;
        let shift = move |(edge, target): (Edge, StateId)| (edge, target + offset);
        self.states
            .extend(other.states.into_iter().map(|s| State {
                meta: s.meta,
                outgoing: s.outgoing.into_iter().map(shift).collect(),
            }));
        Spliced {
            initial: other.initial.into_iter().map(shift).collect(),
            finals: other
                .finals
                .into_iter()
                .map(|(state, fin)| (state + offset, fin))
                .collect(),
            epsilon: other.epsilon,
        }
    }

    /// Drop every state whose `keep` flag is false and compact the arena.
    ///
    /// Edges, initial edges and finals touching a dropped state are removed.
    /// Returns the old-to-new id mapping.
    pub fn retain_states(&mut self, keep: &[bool]) -> Vec<Option<StateId>> {
        debug_assert_eq!(keep.len(), self.states.len());
        let mut remap = vec![None; self.states.len()];
        let mut next: StateId = 0;
        for (id, &kept) in keep.iter().enumerate() {
            if kept {
                remap[id] = Some(next);
                next += 1;
            }
        }

        let relink = |(edge, target): (Edge, StateId)| remap[target as usize].map(|t| (edge, t));
        let states = std::mem::take(&mut self.states);
        self.states = states
            .into_iter()
            .zip(keep)
            .filter(|(_, kept)| **kept)
            .map(|(s, _)| State {
                meta: s.meta,
                outgoing: s.outgoing.into_iter().filter_map(relink).collect(),
            })
            .collect();
        self.initial = std::mem::take(&mut self.initial)
            .into_iter()
            .filter_map(relink)
            .collect();
        self.finals = std::mem::take(&mut self.finals)
            .into_iter()
            .filter_map(|(state, fin)| remap[state as usize].map(|s| (s, fin)))
            .collect();
        remap
    }

    pub fn map_meta<W>(self, mut f: impl FnMut(V) -> W) -> Graph<W> {
        Graph {
            states: self
                .states
                .into_iter()
                .map(|s| State {
                    meta: f(s.meta),
                    outgoing: s.outgoing,
                })
                .collect(),
            initial: self.initial,
            finals: self.finals,
            epsilon: self.epsilon,
        }
    }
}
