//! Weighted evaluation of compiled graphs.
//!
//! All live runs advance together, one input symbol at a time. Runs that meet
//! in the same state during a step are resolved immediately by the weight of
//! the edges that brought them there, so at most one run per state survives.
//! Each surviving run is a chain of nodes in a backtracking arena; the output
//! is rebuilt by walking the winning chain backwards.

use solomonoff_core::{Output, Partial, Symbol};
use solomonoff_ranged::{RangedGraph, StateIdx, Trans};

use super::error::{Result, RuntimeError};
use super::trace::{NoopTracer, Tracer};

type NodeIdx = usize;

/// One consumed symbol of a run.
struct Node<'g> {
    prev: Option<NodeIdx>,
    symbol: Symbol,
    trans: &'g Trans,
}

/// A live run: the state it is in and the last node of its chain.
#[derive(Clone, Copy)]
struct Head {
    state: StateIdx,
    node: Option<NodeIdx>,
}

/// Evaluator over a borrowed compiled graph.
pub struct Evaluator<'g, V> {
    graph: &'g RangedGraph<V>,
}

impl<'g, V> Evaluator<'g, V> {
    pub fn new(graph: &'g RangedGraph<V>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g RangedGraph<V> {
        self.graph
    }

    /// Output of the best accepting run over `input`, or `None` if no run
    /// accepts.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn evaluate(&self, input: &[Symbol]) -> Result<Option<Output>> {
        self.evaluate_with(input, &mut NoopTracer)
    }

    /// Evaluate with a tracer for debugging.
    pub fn evaluate_with<T: Tracer>(
        &self,
        input: &[Symbol],
        tracer: &mut T,
    ) -> Result<Option<Output>> {
        let graph = self.graph;
        let alphabet = graph.alphabet();

        let mut arena: Vec<Node<'g>> = Vec::new();
        let mut heads = vec![Head {
            state: graph.initial(),
            node: None,
        }];
        let mut next: Vec<Head> = Vec::new();
        // state -> node that reached it during the current step
        let mut slot: Vec<Option<NodeIdx>> = vec![None; graph.len()];

        for &symbol in input {
            tracer.trace_step(symbol);
            if !alphabet.contains(symbol) {
                heads.clear();
                break;
            }

            for head in &heads {
                for trans in graph.transitions(head.state, symbol) {
                    let weight = trans.edge.weight;
                    tracer.trace_transition(head.state, trans.target, weight);

                    let candidate = Node {
                        prev: head.node,
                        symbol,
                        trans,
                    };
                    let Some(existing) = slot[trans.target as usize] else {
                        slot[trans.target as usize] = Some(arena.len());
                        next.push(Head {
                            state: trans.target,
                            node: Some(arena.len()),
                        });
                        arena.push(candidate);
                        continue;
                    };

                    let kept_weight = arena[existing].trans.edge.weight;
                    if weight > kept_weight {
                        tracer.trace_collision(trans.target, weight, kept_weight);
                        // Nodes of the current step are not referenced yet.
                        arena[existing] = candidate;
                    } else if weight < kept_weight {
                        tracer.trace_collision(trans.target, kept_weight, weight);
                    } else {
                        tracer.trace_collision(trans.target, kept_weight, weight);
                        if !self.same_run_output(&arena, &arena[existing], &candidate) {
                            return Err(RuntimeError::FunctionalityViolation {
                                state: trans.target,
                                weight,
                            });
                        }
                    }
                }
            }

            for head in &next {
                slot[head.state as usize] = None;
            }
            std::mem::swap(&mut heads, &mut next);
            next.clear();
            if heads.is_empty() {
                break;
            }
        }

        let mut best: Option<(Head, &Partial)> = None;
        for head in &heads {
            let Some(fin) = graph.accepting(Some(head.state)) else {
                continue;
            };
            match best {
                Some((_, kept)) if fin.weight < kept.weight => {}
                Some((winner, kept)) if fin.weight == kept.weight => {
                    let lhs = self.accepted_output(&arena, winner.node, kept);
                    let rhs = self.accepted_output(&arena, head.node, fin);
                    if lhs != rhs {
                        return Err(RuntimeError::FunctionalityViolation {
                            state: head.state,
                            weight: fin.weight,
                        });
                    }
                }
                _ => best = Some((*head, fin)),
            }
        }

        let Some((winner, fin)) = best else {
            tracer.trace_reject();
            return Ok(None);
        };
        tracer.trace_accept(winner.state, fin.weight);
        Ok(Some(self.accepted_output(&arena, winner.node, fin)))
    }

    /// Evaluate a string over the Unicode code points of `input`.
    pub fn evaluate_str(&self, input: &str) -> Result<Option<String>> {
        let symbols: Vec<Symbol> = input.chars().map(Symbol::from).collect();
        Ok(self.evaluate(&symbols)?.map(|out| out.to_text()))
    }

    // ------------------------------------------------------------------------
    // Deterministic helpers
    // ------------------------------------------------------------------------

    /// Follow the first transition of `state` on `symbol`. `None` is the sink.
    pub fn delta(&self, state: Option<StateIdx>, symbol: Symbol) -> Option<StateIdx> {
        if !self.graph.alphabet().contains(symbol) {
            return None;
        }
        self.graph.delta(state, symbol)
    }

    /// State reached by always taking the first transition, or `None` once
    /// the run falls into the sink.
    pub fn run_deterministic(&self, input: &[Symbol]) -> Option<StateIdx> {
        input
            .iter()
            .try_fold(self.graph.initial(), |state, &symbol| {
                self.delta(Some(state), symbol)
            })
    }

    /// Whether the deterministic run over `input` ends in an accepting state.
    pub fn accepts(&self, input: &[Symbol]) -> bool {
        self.graph
            .accepting(self.run_deterministic(input))
            .is_some()
    }

    // ------------------------------------------------------------------------
    // Output reconstruction
    // ------------------------------------------------------------------------

    fn same_run_output(&self, arena: &[Node<'g>], lhs: &Node<'g>, rhs: &Node<'g>) -> bool {
        if lhs.prev == rhs.prev && lhs.trans.edge.output == rhs.trans.edge.output {
            return true;
        }
        self.run_output(arena, lhs) == self.run_output(arena, rhs)
    }

    /// Output of the chain ending in `last`, which need not be in the arena.
    fn run_output(&self, arena: &[Node<'g>], last: &Node<'g>) -> Vec<Symbol> {
        let mut out = self.chain_output(arena, last.prev);
        out.extend(self.edge_output(last));
        out
    }

    fn accepted_output(&self, arena: &[Node<'g>], node: Option<NodeIdx>, fin: &Partial) -> Output {
        let reflect = self.graph.alphabet().reflect();
        let mut out = self.chain_output(arena, node);
        out.extend(fin.output.iter().filter(|&s| s != reflect));
        Output::new(out)
    }

    fn chain_output(&self, arena: &[Node<'g>], mut node: Option<NodeIdx>) -> Vec<Symbol> {
        let mut reversed = Vec::new();
        while let Some(idx) = node {
            let n = &arena[idx];
            reversed.extend(self.edge_output(n).rev());
            node = n.prev;
        }
        reversed.reverse();
        reversed
    }

    /// Edge output with every reflect marker replaced by the consumed symbol.
    fn edge_output<'n>(&self, node: &'n Node<'g>) -> impl DoubleEndedIterator<Item = Symbol> + 'n {
        let reflect = self.graph.alphabet().reflect();
        node.trans
            .edge
            .output
            .iter()
            .map(move |s| if s == reflect { node.symbol } else { s })
    }
}
