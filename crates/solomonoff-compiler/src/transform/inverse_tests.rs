use solomonoff_core::{Alphabet, Edge, Graph, Output, Partial};

use crate::optimize::trim;
use crate::test_utils::{class, lit};
use crate::transform::inverse;
use crate::{CompileError, InversionError};

fn invert(graph: Graph<()>) -> Result<Graph<()>, CompileError> {
    inverse(graph, &Alphabet::UNICODE)
}

fn single(edge: Edge) -> Graph<()> {
    let mut g = Graph::new();
    let s = g.add_state(());
    g.add_initial(edge, s);
    g.set_final(s, Partial::neutral());
    g
}

#[test]
fn final_output_becomes_input() {
    let mut g = invert(lit("ab").right_action(&Partial::new("xy", 0))).unwrap();

    trim(&mut g);

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'x'
    N0 → N1 'y'
    N1 ⊣ "ab"
    "#);
}

#[test]
fn edge_output_becomes_chain() {
    let g = invert(lit("a").left_action(&Partial::new("xy", 0))).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N1 'x':"a"
    N0 ⊣ ""
    N1 → N0 'y'
    "#);
}

#[test]
fn reflect_keeps_range() {
    let a = 'a' as u32;
    let g = invert(single(Edge::new(a - 1, 'c' as u32, Output::new(vec![0]), 0))).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'a'-'c':"\0"
    N0 ⊣ ""
    "#);
}

#[test]
fn weights_move_to_first_hop() {
    let a = 'a' as u32;
    let g = invert(single(Edge::new(a - 1, a, "x", 3))).unwrap();

    insta::assert_snapshot!(g.dump(), @r#"
    → N0 'x':"a" w3
    N0 ⊣ ""
    "#);
}

#[test]
fn double_reflection() {
    let edge = Edge::new('a' as u32 - 1, 'c' as u32, Output::new(vec![0, 0]), 0);

    let err = invert(single(edge.clone())).unwrap_err();

    assert_eq!(err, CompileError::Inversion(InversionError::DoubleReflection { edge }));
}

#[test]
fn range_without_reflection() {
    let edge = Edge::new('a' as u32 - 1, 'c' as u32, "x", 0);

    let err = invert(single(edge)).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"edge 'a'-'c':"x" spans several symbols but does not reflect its input"#);
}

#[test]
fn silent_range_cannot_be_inverted() {
    let err = invert(class('a', 'c')).unwrap_err();

    assert!(matches!(
        err,
        CompileError::Inversion(InversionError::RangeWithoutReflection { .. })
    ));
}

#[test]
fn epsilon_cycle() {
    let err = invert(lit("a").kleene().unwrap()).unwrap_err();

    assert_eq!(
        err,
        CompileError::Inversion(InversionError::EpsilonCycle { state: 0 })
    );
}

#[test]
fn ambiguous_epsilon() {
    let mut g = Graph::<()>::new();
    let s = g.add_state(());
    g.add_initial(Edge::neutral('a' as u32 - 1, 'a' as u32), s);
    g.add_initial(Edge::neutral('b' as u32 - 1, 'b' as u32), s);
    g.set_final(s, Partial::neutral());

    let err = invert(g).unwrap_err();

    assert_eq!(
        err,
        CompileError::Inversion(InversionError::AmbiguousEpsilon { state: 0 })
    );
}

#[test]
fn final_conflict() {
    let err = invert(lit("a").kleene_optional().unwrap()).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"state 1 accepts with "a" and "" at equal weight"#);
}
