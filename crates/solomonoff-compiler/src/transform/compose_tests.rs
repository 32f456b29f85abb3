use solomonoff_core::{Edge, Graph, Output, Partial};

use crate::test_utils::{class, compiled, lit};
use crate::transform::compose;

fn emit(input: &str, output: &str) -> Graph<()> {
    lit(input).left_action(&Partial::new(output, 0))
}

fn choice(edges: &[Edge]) -> Graph<()> {
    let mut g = Graph::new();
    let s = g.add_state(());
    for edge in edges {
        g.add_initial(edge.clone(), s);
    }
    g.set_final(s, Partial::neutral());
    g
}

#[test]
fn edge_outputs_are_rewritten() {
    let rhs = compiled(&emit("b", "c"));

    let g = compose(emit("a", "b"), &rhs).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'a':"c"
    N0 ⊣ ""
    "#);
}

#[test]
fn final_outputs_are_rewritten() {
    let lhs = lit("a").right_action(&Partial::new("b", 0));
    let rhs = compiled(&emit("b", "c"));

    let g = compose(lhs, &rhs).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'a'
    N0 ⊣ "c"
    "#);
}

#[test]
fn epsilon_is_rewritten() {
    let lhs: Graph<()> = Graph::atomic_epsilon(Partial::new("b", 0));
    let rhs = compiled(&emit("b", "c"));

    let g = compose(lhs, &rhs).unwrap();

    assert!(g.is_empty());
    insta::assert_snapshot!(g.dump(), @r#"ε "c""#);
}

#[test]
fn rejected_outputs_vanish() {
    let rhs = compiled(&emit("z", "c"));

    let g = compose(emit("a", "b"), &rhs).unwrap();

    assert!(g.initial().is_empty());
    assert!(g.finals().is_empty());
}

#[test]
fn reflect_splits_input_range() {
    let a = 'a' as u32;
    let lhs = choice(&[Edge::new(a - 1, 'c' as u32, Output::new(vec![0]), 0)]);
    let rhs = compiled(&choice(&[
        Edge::new(a - 1, a, "x", 0),
        Edge::new(a, a + 1, Output::new(vec![0]), 0),
    ]));

    let g = compose(lhs, &rhs).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'a':"x"
    → N0 'b':"\0"
    N0 ⊣ ""
    "#);
}

#[test]
fn heavier_alternative_wins() {
    let b = 'b' as u32;
    let rhs = compiled(&choice(&[Edge::new(b - 1, b, "x", 1), Edge::new(b - 1, b, "y", 0)]));

    let g = compose(emit("a", "b"), &rhs).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'a':"x" w1
    N0 ⊣ ""
    "#);
}

#[test]
fn equal_weight_alternatives_fail() {
    let b = 'b' as u32;
    let rhs = compiled(&choice(&[Edge::new(b - 1, b, "x", 0), Edge::new(b - 1, b, "y", 0)]));

    let err = compose(emit("a", "b"), &rhs).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"composition is ambiguous: outputs "x" and "y" share weight 0"#);
}

#[test]
fn loops_are_followed() {
    let lhs = emit("a", "b").kleene().unwrap();
    let rhs = compiled(&class('b', 'b').kleene().unwrap());

    let g = compose(lhs, &rhs).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    ε ""
    → N0 'a'
    N0 → N0 'a'
    N0 ⊣ ""
    "#);
}
