//! Pairwise traversal of two ranged graphs.

use indexmap::IndexSet;
use solomonoff_core::{Edge, Graph, Output, Partial, StateId, Symbol};
use solomonoff_ranged::{Range, RangedGraph, StateIdx, Trans, sink_ranges, zip_partitions};

use super::powerset::powerset;
use super::search::Frontier;
use crate::{CompileError, Result};

/// A state of a product. Either side may be the sink.
pub type Pair = (Option<StateIdx>, Option<StateIdx>);

/// Input accepted on the left but not on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetCounterexample {
    pub input: Vec<Symbol>,
    pub lhs: StateIdx,
    pub rhs: Option<StateIdx>,
}

fn ranges_of<'a, V>(
    graph: &'a RangedGraph<V>,
    state: Option<StateIdx>,
    sink: &'a [Range],
) -> &'a [Range] {
    state.map_or(sink, |s| graph.ranges(s))
}

/// Whether the input language of `lhs` is contained in that of `rhs`.
///
/// `rhs` must be deterministic. Pairs are explored breadth-first, so the
/// counterexample is a shortest one.
pub fn is_subset<V, W>(
    lhs: &RangedGraph<V>,
    rhs: &RangedGraph<W>,
) -> std::result::Result<(), SubsetCounterexample> {
    debug_assert!(rhs.is_deterministic(), "right-hand side must be deterministic");
    debug_assert_eq!(lhs.alphabet(), rhs.alphabet());
    let minimal = lhs.alphabet().minimal();
    let sink = sink_ranges(rhs.alphabet());

    let mut frontier = Frontier::new((lhs.initial(), Some(rhs.initial())));
    let mut next = 0;
    while let Some((l, r)) = frontier.get(next) {
        if lhs.accepting(Some(l)).is_some() && rhs.accepting(r).is_none() {
            return Err(SubsetCounterexample {
                input: frontier.word(next),
                lhs: l,
                rhs: r,
            });
        }
        for segment in zip_partitions(minimal, &[lhs.ranges(l), ranges_of(rhs, r, &sink)]) {
            let rhs_target = segment.transitions[1].first().map(|t| t.target);
            for trans in segment.transitions[0] {
                frontier.discover((trans.target, rhs_target), next, segment.to_inclusive);
            }
        }
        next += 1;
    }
    Ok(())
}

/// [`is_subset`] for a nondeterministic right-hand side, determinized first.
pub fn is_subset_nondeterministic<V, W>(
    lhs: &RangedGraph<V>,
    rhs: &RangedGraph<W>,
) -> std::result::Result<(), SubsetCounterexample> {
    is_subset(lhs, &powerset(rhs))
}

/// Type check: every input of `lhs` must be an input of `rhs`.
pub fn check_subset<V, W>(lhs: &RangedGraph<V>, rhs: &RangedGraph<W>) -> Result<()> {
    is_subset_nondeterministic(lhs, rhs).map_err(|c| CompileError::TypecheckMismatch {
        input: Output::new(c.input),
    })
}

/// Build the product of two ranged graphs as a construction graph.
///
/// For every segment of a reachable pair, `edge_product` is called with the
/// segment bounds and each combination of left and right transitions (`None`
/// standing for the sink); it decides whether the product has an edge there.
/// `output_product` decides the final edge of a pair from the two sides'
/// acceptance. The pair of two sinks is never entered.
///
/// State metadata is the pair. The initial pair stays a state (loops may
/// return to it); its edges are copied to the initial edges and its final edge
/// becomes the epsilon.
pub fn product<V, W, E, F>(
    lhs: &RangedGraph<V>,
    rhs: &RangedGraph<W>,
    mut edge_product: E,
    mut output_product: F,
) -> Graph<Pair>
where
    E: FnMut(Symbol, Symbol, Option<&Trans>, Option<&Trans>) -> Option<Edge>,
    F: FnMut(Option<&Partial>, Option<&Partial>) -> Option<Partial>,
{
    debug_assert_eq!(lhs.alphabet(), rhs.alphabet());
    let minimal = lhs.alphabet().minimal();
    let lhs_sink = sink_ranges(lhs.alphabet());
    let rhs_sink = sink_ranges(rhs.alphabet());

    let mut graph = Graph::new();
    let mut pairs: IndexSet<Pair> = IndexSet::new();
    pairs.insert((Some(lhs.initial()), Some(rhs.initial())));

    let mut next = 0;
    while let Some(&(l, r)) = pairs.get_index(next) {
        let state = graph.add_state((l, r));
        if let Some(fin) = output_product(lhs.accepting(l), rhs.accepting(r)) {
            graph.set_final(state, fin);
        }

        let partitions = [ranges_of(lhs, l, &lhs_sink), ranges_of(rhs, r, &rhs_sink)];
        for segment in zip_partitions(minimal, &partitions) {
            let left = sides(segment.transitions[0]);
            let right = sides(segment.transitions[1]);
            for a in &left {
                for b in &right {
                    let target = (a.map(|t| t.target), b.map(|t| t.target));
                    if target == (None, None) {
                        continue;
                    }
                    let (from, to) = (segment.from_exclusive, segment.to_inclusive);
                    let Some(edge) = edge_product(from, to, *a, *b) else {
                        continue;
                    };
                    let (idx, _) = pairs.insert_full(target);
                    graph.connect(state, edge, idx as StateId);
                }
            }
        }
        next += 1;
    }

    for (edge, target) in graph.outgoing(0).to_vec() {
        graph.add_initial(edge, target);
    }
    let epsilon = graph.final_edge(0).cloned();
    graph.set_epsilon(epsilon);
    tracing::debug!(pairs = graph.len(), "product");
    graph
}

/// Transitions of one side, or a lone `None` for the sink.
fn sides(transitions: &[Trans]) -> Vec<Option<&Trans>> {
    if transitions.is_empty() {
        vec![None]
    } else {
        transitions.iter().map(Some).collect()
    }
}

/// Acceptor of the inputs both sides accept.
pub fn intersection<V, W>(lhs: &RangedGraph<V>, rhs: &RangedGraph<W>) -> Graph<Pair> {
    product(
        lhs,
        rhs,
        |from, to, a, b| (a.is_some() && b.is_some()).then(|| Edge::neutral(from, to)),
        |a, b| (a.is_some() && b.is_some()).then(Partial::neutral),
    )
}
