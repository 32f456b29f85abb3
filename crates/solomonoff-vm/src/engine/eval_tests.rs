use solomonoff_compiler::compile;
use solomonoff_core::{Alphabet, Edge, Graph, Output, Partial, Symbol};
use solomonoff_ranged::RangedGraph;

use super::{Evaluator, RuntimeError};

fn sym(c: char) -> Symbol {
    c as Symbol
}

/// Edge reading exactly `c`.
fn on(c: char, output: &str, weight: i32) -> Edge {
    Edge::new(sym(c) - 1, sym(c), output, weight)
}

fn lit(text: &str, output: &str) -> Graph<()> {
    text.chars()
        .map(|c| Graph::atomic_symbol((), sym(c)).unwrap())
        .fold(Graph::atomic_epsilon(Partial::neutral()), Graph::concat)
        .left_action(&Partial::new(output, 0))
}

fn compiled(graph: &Graph<()>) -> RangedGraph<()> {
    compile(graph, &Alphabet::UNICODE)
}

/// Two initial edges on 'a' into one accepting state.
fn converging(lhs: Edge, rhs: Edge) -> RangedGraph<()> {
    let mut g = Graph::new();
    let s = g.add_state(());
    g.add_initial(lhs, s);
    g.add_initial(rhs, s);
    g.set_final(s, Partial::neutral());
    compiled(&g)
}

/// 'a' splits into two accepting states with the given outputs and finals.
fn diverging(lhs: (&str, Partial), rhs: (&str, Partial)) -> RangedGraph<()> {
    let mut g = Graph::new();
    let p = g.add_state(());
    let q = g.add_state(());
    g.add_initial(on('a', lhs.0, 0), p);
    g.add_initial(on('a', rhs.0, 0), q);
    g.set_final(p, lhs.1);
    g.set_final(q, rhs.1);
    compiled(&g)
}

#[test]
fn single_symbol() {
    let ranged = compiled(&lit("a", ""));
    let eval = Evaluator::new(&ranged);

    assert_eq!(ranged.len(), 2);
    assert_eq!(eval.evaluate_str("a").unwrap(), Some(String::new()));
    assert_eq!(eval.evaluate_str("b").unwrap(), None);
    assert_eq!(eval.evaluate_str("").unwrap(), None);
    assert_eq!(eval.evaluate_str("aa").unwrap(), None);
}

#[test]
fn edge_outputs_are_concatenated() {
    let ranged = compiled(&lit("ab", "xy").right_action(&Partial::new("z", 0)));
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("ab").unwrap().as_deref(), Some("xyz"));
}

#[test]
fn empty_input_uses_epsilon() {
    let ranged = compiled(&Graph::atomic_epsilon(Partial::new("e", 0)));
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate(&[]).unwrap(), Some(Output::from("e")));
    assert_eq!(eval.evaluate_str("a").unwrap(), None);
}

#[test]
fn reflect_echoes_input() {
    let mut g = Graph::new();
    let s = g.add_state(());
    let edge_out = Output::new(vec![0, sym('!')]);
    g.add_initial(Edge::new(sym('a') - 1, sym('z'), edge_out, 0), s);
    g.set_final(s, Partial::new(Output::new(vec![0, sym('.')]), 0));
    let ranged = compiled(&g);
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("q").unwrap().as_deref(), Some("q!."));
    assert_eq!(eval.evaluate_str("A").unwrap(), None);
}

#[test]
fn heavier_edge_wins_collision() {
    let ranged = converging(on('a', "x", 1), on('a', "y", 2));
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("a").unwrap().as_deref(), Some("y"));
}

#[test]
fn equal_weight_collision_is_a_violation() {
    let ranged = converging(on('a', "x", 0), on('a', "y", 0));
    let eval = Evaluator::new(&ranged);

    let err = eval.evaluate_str("a").unwrap_err();

    assert_eq!(
        err,
        RuntimeError::FunctionalityViolation {
            state: 1,
            weight: 0
        }
    );
    insta::assert_snapshot!(err, @"nondeterministic output at state 1: two runs of weight 0 disagree");
}

#[test]
fn equal_weight_collision_with_same_output_is_fine() {
    // 'a' then 'b' through two different middle states, same total output.
    let mut g = Graph::new();
    let p = g.add_state(());
    let q = g.add_state(());
    let end = g.add_state(());
    g.add_initial(on('a', "x", 0), p);
    g.add_initial(on('a', "", 0), q);
    g.connect(p, on('b', "", 0), end);
    g.connect(q, on('b', "x", 0), end);
    g.set_final(end, Partial::neutral());
    let ranged = compiled(&g);
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("ab").unwrap().as_deref(), Some("x"));
}

#[test]
fn heavier_final_wins_acceptance() {
    let ranged = diverging(("x", Partial::new("", 1)), ("y", Partial::new("", 3)));
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("a").unwrap().as_deref(), Some("y"));
}

#[test]
fn equal_final_weights_must_agree() {
    let agree = diverging(("x", Partial::new("", 0)), ("", Partial::new("x", 0)));
    assert_eq!(
        Evaluator::new(&agree).evaluate_str("a").unwrap().as_deref(),
        Some("x")
    );

    let disagree = diverging(("x", Partial::neutral()), ("y", Partial::neutral()));
    assert_eq!(
        Evaluator::new(&disagree).evaluate_str("a"),
        Err(RuntimeError::FunctionalityViolation {
            state: 2,
            weight: 0
        })
    );
}

#[test]
fn weights_are_local_to_each_step() {
    // The light first edge leads to the only accepting path.
    let mut g = Graph::new();
    let p = g.add_state(());
    let q = g.add_state(());
    let end = g.add_state(());
    g.add_initial(on('a', "light", -5), p);
    g.add_initial(on('a', "heavy", 5), q);
    g.connect(p, on('b', "", 0), end);
    g.set_final(end, Partial::neutral());
    let ranged = compiled(&g);
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate_str("ab").unwrap().as_deref(), Some("light"));
}

#[test]
fn symbols_outside_alphabet_are_rejected() {
    let ranged = compiled(&Graph::atomic_range((), 0, 0x10FFFF).unwrap());
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.evaluate(&[0]).unwrap(), None);
    assert_eq!(eval.evaluate(&[0x110000]).unwrap(), None);
    assert_eq!(eval.evaluate(&[0x10FFFF]).unwrap(), Some(Output::empty()));
    assert!(!eval.accepts(&[0]));
}

#[test]
fn deterministic_helpers() {
    let ranged = compiled(&lit("ab", ""));
    let eval = Evaluator::new(&ranged);

    assert_eq!(eval.delta(None, sym('a')), None);
    assert_eq!(eval.delta(Some(ranged.initial()), sym('b')), None);
    assert!(eval.delta(Some(ranged.initial()), sym('a')).is_some());

    let ab: Vec<Symbol> = "ab".chars().map(sym).collect();
    assert_eq!(eval.run_deterministic(&ab), Some(2));
    assert_eq!(eval.run_deterministic(&ab[..1]), Some(1));
    assert_eq!(eval.run_deterministic(&[sym('b')]), None);

    assert!(eval.accepts(&ab));
    assert!(!eval.accepts(&ab[..1]));
    assert!(!eval.accepts(&[]));
}
