//! Ranged graph storage and lookup.

use solomonoff_core::{Alphabet, Edge, Partial, Symbol};

use crate::error::{RangedError, Result};

/// Dense state index. The sink is represented as `None`.
pub type StateIdx = u32;

/// A transition: the original edge (output, weight, range) and its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Trans {
    pub edge: Edge,
    pub target: StateIdx,
}

impl Trans {
    pub fn new(edge: Edge, target: StateIdx) -> Self {
        Self { edge, target }
    }
}

/// One cell of a partition: every symbol above the previous boundary and up to
/// `input` (inclusive) takes the transitions in `edges`. No transitions means
/// the symbol leads to the sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Range {
    pub input: Symbol,
    pub edges: Vec<Trans>,
}

impl Range {
    pub fn new(input: Symbol, edges: Vec<Trans>) -> Self {
        Self { input, edges }
    }

    pub fn is_sink(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Partition sending every symbol to the sink.
pub fn sink_ranges(alphabet: &Alphabet) -> Vec<Range> {
    vec![Range::new(alphabet.maximal(), Vec::new())]
}

/// Index of the range containing `symbol` (lower bound on the boundary).
///
/// Equals `ranges.len()` when `symbol` lies above the last boundary.
pub fn range_index(ranges: &[Range], symbol: Symbol) -> usize {
    ranges.partition_point(|r| r.input < symbol)
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RangedState<V> {
    pub ranges: Vec<Range>,
    pub accepting: Option<Partial>,
    pub meta: V,
}

/// Frozen transducer with a binary-searchable partition per state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RangedGraph<V> {
    alphabet: Alphabet,
    states: Vec<RangedState<V>>,
    initial: StateIdx,
}

impl<V> RangedGraph<V> {
    pub fn new(alphabet: Alphabet, states: Vec<RangedState<V>>, initial: StateIdx) -> Self {
        Self {
            alphabet,
            states,
            initial,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn initial(&self) -> StateIdx {
        self.initial
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, idx: StateIdx) -> &RangedState<V> {
        &self.states[idx as usize]
    }

    pub fn states(&self) -> &[RangedState<V>] {
        &self.states
    }

    /// Mutable access for in-place passes. Boundaries must stay untouched.
    pub fn states_mut(&mut self) -> &mut [RangedState<V>] {
        &mut self.states
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIdx, &RangedState<V>)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StateIdx, s))
    }

    pub fn meta(&self, idx: StateIdx) -> &V {
        &self.states[idx as usize].meta
    }

    /// Partition of `state`; the sink has a single empty range.
    pub fn ranges(&self, state: StateIdx) -> &[Range] {
        &self.states[state as usize].ranges
    }

    /// Final edge of `state`. The sink never accepts.
    pub fn accepting(&self, state: Option<StateIdx>) -> Option<&Partial> {
        state.and_then(|s| self.states[s as usize].accepting.as_ref())
    }

    /// Transitions of `state` on `symbol`, found by binary search.
    pub fn transitions(&self, state: StateIdx, symbol: Symbol) -> &[Trans] {
        let ranges = self.ranges(state);
        ranges
            .get(range_index(ranges, symbol))
            .map(|r| r.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Follow the first transition on `symbol`. `None` is the sink.
    pub fn delta(&self, state: Option<StateIdx>, symbol: Symbol) -> Option<StateIdx> {
        let state = state?;
        self.transitions(state, symbol).first().map(|t| t.target)
    }

    /// Every range holds at most one transition.
    pub fn is_deterministic(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.ranges.iter().all(|r| r.edges.len() <= 1))
    }

    /// Check the partition invariant of every state: boundaries strictly
    /// increasing, above `minimal`, ending exactly at `maximal`, and all
    /// targets in bounds.
    pub fn validate(&self) -> Result<()> {
        let len = self.states.len() as StateIdx;
        if self.initial >= len {
            return Err(RangedError::InitialOutOfBounds {
                initial: self.initial,
            });
        }
        for (state, s) in self.iter() {
            let Some(last) = s.ranges.last() else {
                return Err(RangedError::EmptyPartition { state });
            };
            if s.ranges[0].input <= self.alphabet.minimal() {
                return Err(RangedError::StartsAtMinimal { state });
            }
            if let Some(pair) = s.ranges.windows(2).find(|w| w[0].input >= w[1].input) {
                return Err(RangedError::Unsorted {
                    state,
                    boundary: pair[1].input,
                });
            }
            if last.input != self.alphabet.maximal() {
                return Err(RangedError::DoesNotReachMaximal {
                    state,
                    last: last.input,
                });
            }
            let dangling = s
                .ranges
                .iter()
                .flat_map(|r| &r.edges)
                .find(|t| t.target >= len);
            if let Some(t) = dangling {
                return Err(RangedError::DanglingTarget {
                    state,
                    target: t.target,
                });
            }
        }
        Ok(())
    }

    pub fn map_meta<W>(self, mut f: impl FnMut(V) -> W) -> RangedGraph<W> {
        RangedGraph {
            alphabet: self.alphabet,
            states: self
                .states
                .into_iter()
                .map(|s| RangedState {
                    ranges: s.ranges,
                    accepting: s.accepting,
                    meta: f(s.meta),
                })
                .collect(),
            initial: self.initial,
        }
    }
}
