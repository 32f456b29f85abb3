use solomonoff_core::{Edge, Graph, Partial};

use crate::analyze::{FunctionalityCounterexample, is_strongly_functional};
use crate::test_utils::{compiled, lit, union};

fn rewrite(input: &str, output: &str, weight: i32) -> Graph<()> {
    lit(input).right_action(&Partial::new(output, weight))
}

#[test]
fn deterministic_graph_is_functional() {
    let ranged = compiled(&union(lit("ab"), lit("cd")).kleene().unwrap());

    assert_eq!(is_strongly_functional(&ranged), Ok(()));
}

#[test]
fn ambiguous_finals() {
    let ranged = compiled(&union(rewrite("a", "x", 0), rewrite("a", "y", 0)));

    let err = is_strongly_functional(&ranged).unwrap_err();

    assert_eq!(
        err,
        FunctionalityCounterexample::Final {
            input: vec!['a' as u32],
            states: (1, 2),
            finals: (Partial::new("x", 0), Partial::new("y", 0)),
        }
    );
}

#[test]
fn weights_break_ties() {
    let ranged = compiled(&union(rewrite("a", "x", 1), rewrite("a", "y", 0)));

    assert_eq!(is_strongly_functional(&ranged), Ok(()));
}

#[test]
fn parallel_edges_into_one_state() {
    let a = 'a' as u32;
    let mut g = Graph::<()>::new();
    let s = g.add_state(());
    g.add_initial(Edge::new(a - 1, a, "x", 0), s);
    g.add_initial(Edge::new(a - 1, a, "y", 0), s);
    g.set_final(s, Partial::neutral());

    let err = is_strongly_functional(&compiled(&g)).unwrap_err();

    assert_eq!(err.input(), &[a]);
    assert!(matches!(
        err,
        FunctionalityCounterexample::ToSameState {
            sources: (0, 0),
            target: 1,
            ..
        }
    ));
}

#[test]
fn tie_found_after_longer_input() {
    let g = union(
        lit("ab").right_action(&Partial::new("1", 0)),
        lit("a").concat(lit("b")).right_action(&Partial::new("2", 0)),
    );

    let err = is_strongly_functional(&compiled(&g)).unwrap_err();

    assert_eq!(err.input(), &['a' as u32, 'b' as u32]);
}
