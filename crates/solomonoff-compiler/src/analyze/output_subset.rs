//! Output language containment.

use solomonoff_core::{Output, Symbol};
use solomonoff_ranged::{RangedGraph, StateIdx};

use super::search::Frontier;

/// Input for which the left graph produces an output the right graph rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCounterexample {
    pub input: Vec<Symbol>,
    pub lhs: StateIdx,
}

/// Whether every output `lhs` can produce is accepted by `rhs`.
///
/// `rhs` must be deterministic. Reflected symbols stand for every symbol of
/// the transition's input range, so the range is split along the partitions
/// `rhs` walks through.
pub fn is_output_subset<V, W>(
    lhs: &RangedGraph<V>,
    rhs: &RangedGraph<W>,
) -> Result<(), OutputCounterexample> {
    debug_assert!(rhs.is_deterministic(), "right-hand side must be deterministic");
    let minimal = lhs.alphabet().minimal();
    let reflect = lhs.alphabet().reflect();

    let mut frontier = Frontier::new((lhs.initial(), Some(rhs.initial())));
    let mut next = 0;
    while let Some((l, r)) = frontier.get(next) {
        if let Some(fin) = lhs.accepting(Some(l)) {
            let end = fin
                .output
                .iter()
                .filter(|&s| s != reflect)
                .fold(r, |state, symbol| rhs.delta(state, symbol));
            if rhs.accepting(end).is_none() {
                return Err(OutputCounterexample {
                    input: frontier.word(next),
                    lhs: l,
                });
            }
        }

        let mut prev = minimal;
        for range in lhs.ranges(l) {
            for trans in &range.edges {
                let start = Branch {
                    from_exclusive: prev,
                    to_inclusive: range.input,
                    state: r,
                };
                for branch in replay(rhs, start, &trans.edge.output, reflect) {
                    frontier.discover((trans.target, branch.state), next, branch.to_inclusive);
                }
            }
            prev = range.input;
        }
        next += 1;
    }
    Ok(())
}

/// The part of an input range that drives `rhs` into `state`.
#[derive(Debug, Clone, Copy)]
struct Branch {
    from_exclusive: Symbol,
    to_inclusive: Symbol,
    state: Option<StateIdx>,
}

fn replay<W>(rhs: &RangedGraph<W>, start: Branch, output: &Output, reflect: Symbol) -> Vec<Branch> {
    let mut branches = vec![start];
    for symbol in output.iter() {
        branches = branches
            .into_iter()
            .flat_map(|branch| step(rhs, branch, symbol, reflect))
            .collect();
    }
    branches
}

fn step<W>(rhs: &RangedGraph<W>, branch: Branch, symbol: Symbol, reflect: Symbol) -> Vec<Branch> {
    if symbol != reflect {
        return vec![Branch {
            state: rhs.delta(branch.state, symbol),
            ..branch
        }];
    }
    let Some(state) = branch.state else {
        return vec![branch];
    };

    let mut split = Vec::new();
    let mut lo = rhs.alphabet().minimal();
    for range in rhs.ranges(state) {
        let from_exclusive = lo.max(branch.from_exclusive);
        let to_inclusive = range.input.min(branch.to_inclusive);
        if from_exclusive < to_inclusive {
            split.push(Branch {
                from_exclusive,
                to_inclusive,
                state: range.edges.first().map(|t| t.target),
            });
        }
        lo = range.input;
    }
    split
}
