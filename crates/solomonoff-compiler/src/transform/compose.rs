//! Sequential composition.
//!
//! `compose(a, b)` maps `x` to `b(a(x))`. Composed states pair a state of `a`
//! with a state of `b`; each output `a` emits is fed to `b` on the spot, so the
//! composed edge reads `a`'s input and emits what `b` emits.

use indexmap::IndexSet;
use indexmap::map::{Entry, IndexMap};
use solomonoff_core::{Edge, Graph, Output, Partial, StateId, Symbol, Weight};
use solomonoff_ranged::{RangedGraph, StateIdx};

use crate::{CompileError, Result};

/// Compose `lhs` with the compiled `rhs`.
///
/// Paths on which `rhs` falls into the sink are dropped. Equal-weight
/// alternatives with different outputs in `rhs` make the result ambiguous and
/// fail.
pub fn compose<V, W>(mut lhs: Graph<V>, rhs: &RangedGraph<W>) -> Result<Graph<V>>
where
    V: Clone + Default,
{
    let reflect = rhs.alphabet().reflect();
    let entry = lhs.make_unique_initial_state(V::default());

    let mut graph = Graph::new();
    let mut pairs: IndexSet<(StateId, StateIdx)> = IndexSet::new();
    pairs.insert((entry, rhs.initial()));

    let mut next = 0;
    while let Some(&(l, r)) = pairs.get_index(next) {
        let state = graph.add_state(lhs.meta(l).clone());

        if let Some(fin) = lhs.final_edge(l) {
            let symbols: Vec<Symbol> = fin.output.iter().filter(|&s| s != reflect).collect();
            let start = Branch::new(0, 0, r);
            let mut best: Option<Partial> = None;
            for branch in replay(rhs, start, &symbols, reflect)? {
                let Some(accept) = rhs.accepting(Some(branch.state)) else {
                    continue;
                };
                let candidate = Partial::new(branch.output, branch.weight)
                    .multiply(accept)
                    .multiply(&Partial::new(Output::empty(), fin.weight));
                best = Some(match best {
                    None => candidate,
                    Some(kept) => heavier(kept, candidate)?,
                });
            }
            if let Some(fin) = best {
                graph.set_final(state, fin);
            }
        }

        for (edge, target) in lhs.outgoing(l) {
            let symbols: Vec<Symbol> = edge.output.iter().collect();
            let start = Branch::new(edge.from_exclusive, edge.to_inclusive, r);
            for branch in replay(rhs, start, &symbols, reflect)? {
                let (idx, _) = pairs.insert_full((*target, branch.state));
                let composed = Edge::new(
                    branch.from_exclusive,
                    branch.to_inclusive,
                    branch.output,
                    edge.weight.saturating_add(branch.weight),
                );
                graph.connect(state, composed, idx as StateId);
            }
        }
        next += 1;
    }

    // The entry pair has no incoming edges: turn it into the entry slots.
    for (edge, target) in graph.outgoing(0).to_vec() {
        graph.add_initial(edge, target);
    }
    let epsilon = graph.final_edge(0).cloned();
    graph.set_epsilon(epsilon);
    let mut keep = vec![true; graph.len()];
    keep[0] = false;
    graph.retain_states(&keep);

    tracing::debug!(pairs = next, states = graph.len(), "compose");
    Ok(graph)
}

/// One alternative of the superposition: the part of the input range that
/// drives `rhs` into `state`, with what `rhs` emitted on the way.
#[derive(Debug, Clone)]
struct Branch {
    from_exclusive: Symbol,
    to_inclusive: Symbol,
    state: StateIdx,
    weight: Weight,
    output: Output,
}

impl Branch {
    fn new(from_exclusive: Symbol, to_inclusive: Symbol, state: StateIdx) -> Self {
        Self {
            from_exclusive,
            to_inclusive,
            state,
            weight: 0,
            output: Output::empty(),
        }
    }

    fn advance(
        &self,
        from_exclusive: Symbol,
        to_inclusive: Symbol,
        target: StateIdx,
        edge: &Edge,
        emitted: Output,
    ) -> Self {
        Self {
            from_exclusive,
            to_inclusive,
            state: target,
            weight: self.weight.saturating_add(edge.weight),
            output: self.output.concat(&emitted),
        }
    }
}

/// Feed `symbols` through `rhs`, keeping the best branch per range and state.
fn replay<W>(
    rhs: &RangedGraph<W>,
    start: Branch,
    symbols: &[Symbol],
    reflect: Symbol,
) -> Result<Vec<Branch>> {
    let mut branches = vec![start];
    for &symbol in symbols {
        let mut stepped = Vec::new();
        for branch in &branches {
            if symbol == reflect {
                step_reflect(rhs, branch, &mut stepped);
            } else {
                step_symbol(rhs, branch, symbol, reflect, &mut stepped);
            }
        }
        branches = resolve(stepped)?;
    }
    Ok(branches)
}

/// `rhs` reads a literal symbol; its reflects echo that symbol.
fn step_symbol<W>(
    rhs: &RangedGraph<W>,
    branch: &Branch,
    symbol: Symbol,
    reflect: Symbol,
    out: &mut Vec<Branch>,
) {
    for trans in rhs.transitions(branch.state, symbol) {
        let emitted = trans
            .edge
            .output
            .iter()
            .map(|s| if s == reflect { symbol } else { s })
            .collect();
        out.push(branch.advance(
            branch.from_exclusive,
            branch.to_inclusive,
            trans.target,
            &trans.edge,
            emitted,
        ));
    }
}

/// `rhs` reads whatever input symbol `lhs` reflected, so the branch splits
/// along `rhs`'s partition and its reflects stay reflects.
fn step_reflect<W>(rhs: &RangedGraph<W>, branch: &Branch, out: &mut Vec<Branch>) {
    let mut lo = rhs.alphabet().minimal();
    for range in rhs.ranges(branch.state) {
        let from_exclusive = lo.max(branch.from_exclusive);
        let to_inclusive = range.input.min(branch.to_inclusive);
        lo = range.input;
        if from_exclusive >= to_inclusive {
            continue;
        }
        for trans in &range.edges {
            out.push(branch.advance(
                from_exclusive,
                to_inclusive,
                trans.target,
                &trans.edge,
                trans.edge.output.clone(),
            ));
        }
    }
}

/// Collapse branches sharing range and state; the heavier one survives.
fn resolve(branches: Vec<Branch>) -> Result<Vec<Branch>> {
    let mut best: IndexMap<(Symbol, Symbol, StateIdx), Branch> = IndexMap::new();
    for branch in branches {
        let key = (branch.from_exclusive, branch.to_inclusive, branch.state);
        match best.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(branch);
            }
            Entry::Occupied(mut slot) => {
                let kept = slot.get_mut();
                if branch.weight > kept.weight {
                    *kept = branch;
                } else if branch.weight == kept.weight && branch.output != kept.output {
                    return Err(CompileError::CompositionNondeterminism {
                        lhs: kept.output.clone(),
                        rhs: branch.output,
                        weight: branch.weight,
                    });
                }
            }
        }
    }
    Ok(best.into_values().collect())
}

fn heavier(kept: Partial, candidate: Partial) -> Result<Partial> {
    if candidate.weight > kept.weight {
        return Ok(candidate);
    }
    if candidate.weight == kept.weight && candidate.output != kept.output {
        return Err(CompileError::CompositionNondeterminism {
            lhs: kept.output,
            rhs: candidate.output,
            weight: candidate.weight,
        });
    }
    Ok(kept)
}
