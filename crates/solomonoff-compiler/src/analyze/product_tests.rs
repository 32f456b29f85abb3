use crate::analyze::{
    SubsetCounterexample, check_subset, intersection, is_subset, is_subset_nondeterministic,
};
use crate::compile::compile;
use crate::test_utils::{accepts, class, compiled, lit, union};
use solomonoff_core::Alphabet;

#[test]
fn subset_holds() {
    let small = compiled(&lit("ab"));
    let large = compiled(&union(lit("ab"), lit("ac")));

    assert_eq!(is_subset_nondeterministic(&small, &large), Ok(()));
    assert_eq!(check_subset(&small, &large), Ok(()));
}

#[test]
fn subset_counterexample() {
    let large = compiled(&union(lit("ab"), lit("ac")));
    let small = compiled(&lit("ab"));

    let err = is_subset(&large, &small).unwrap_err();

    assert_eq!(
        err,
        SubsetCounterexample {
            input: vec!['a' as u32, 'c' as u32],
            lhs: 3,
            rhs: None,
        }
    );
}

#[test]
fn typecheck_mismatch() {
    let large = compiled(&union(lit("ab"), lit("ac")));
    let small = compiled(&lit("ab"));

    let err = check_subset(&large, &small).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"input "ac" is accepted on the left but rejected on the right"#);
}

#[test]
fn empty_word_counts() {
    let star = compiled(&lit("a").kleene().unwrap());
    let plus = compiled(&lit("a").kleene_plus().unwrap());

    assert_eq!(is_subset(&plus, &star), Ok(()));
    assert_eq!(is_subset(&star, &plus).unwrap_err().input, Vec::<u32>::new());
}

#[test]
fn intersection_dump() {
    let g = intersection(&compiled(&lit("a")), &compiled(&class('a', 'c')));

    insta::assert_snapshot!(g.printer().show_meta(true).dump(), @r#"
    → N1 'a'
    N0: (Some(0), Some(0))
    N0 → N1 'a'
    N1: (Some(1), Some(1))
    N1 ⊣ ""
    "#);
}

#[test]
fn intersection_language() {
    let lhs = compiled(&lit("a").kleene().unwrap());
    let rhs = compiled(&union(lit("aa"), lit("b")));

    let both = compile(&intersection(&lhs, &rhs), &Alphabet::UNICODE);

    for (word, expected) in [("", false), ("a", false), ("aa", true), ("aaa", false), ("b", false)] {
        assert_eq!(accepts(&both, word), expected, "{word:?}");
    }
}
