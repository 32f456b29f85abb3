//! Graph builders shared by the end-to-end tests.

#![allow(dead_code)]

use solomonoff::{Alphabet, Evaluator, Graph, Partial, RangedGraph, epsilon_union};

/// Graph reading exactly `text`, emitting nothing.
pub fn lit(text: &str) -> Graph<()> {
    text.chars()
        .map(|c| Graph::atomic_symbol((), c as u32).unwrap())
        .fold(Graph::atomic_epsilon(Partial::neutral()), Graph::concat)
}

/// Graph reading `input` and emitting `output` up front.
pub fn emit(input: &str, output: &str) -> Graph<()> {
    lit(input).left_action(&Partial::new(output, 0))
}

/// Graph reading `input` and emitting `output` on acceptance.
pub fn rewrite(input: &str, output: &str) -> Graph<()> {
    lit(input).right_action(&Partial::new(output, 0))
}

/// Graph reading one symbol from the closed range `from..=to`.
pub fn class(from: char, to: char) -> Graph<()> {
    Graph::atomic_range((), from as u32 - 1, to as u32).unwrap()
}

pub fn union(lhs: Graph<()>, rhs: Graph<()>) -> Graph<()> {
    lhs.union(rhs, epsilon_union).unwrap()
}

pub fn compiled(graph: &Graph<()>) -> RangedGraph<()> {
    solomonoff::compile(graph, &Alphabet::UNICODE)
}

/// Evaluate, panicking on a functionality violation.
pub fn run<V>(graph: &RangedGraph<V>, input: &str) -> Option<String> {
    Evaluator::new(graph).evaluate_str(input).unwrap()
}

/// Every word over `letters` of length at most `max_len`.
pub fn words(letters: &str, max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|w| letters.chars().map(move |c| format!("{w}{c}")))
            .collect();
        all.extend(layer.iter().cloned());
    }
    all
}
