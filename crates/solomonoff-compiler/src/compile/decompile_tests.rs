use crate::compile::decompile;
use crate::test_utils::{accepts, compiled, lit};

#[test]
fn chain() {
    let g = decompile(&compiled(&lit("ab")));

    insta::assert_snapshot!(g.dump(), @r#"
    → N1 'a'
    N0 → N1 'a'
    N1 → N2 'b'
    N2 ⊣ ""
    "#);
}

#[test]
fn entry_acceptance_becomes_epsilon() {
    let g = decompile(&compiled(&lit("a").kleene().unwrap()));

    insta::assert_snapshot!(g.dump(), @r#"
    ε ""
    → N1 'a'
    N0 → N1 'a'
    N0 ⊣ ""
    N1 → N1 'a'
    N1 ⊣ ""
    "#);
}

#[test]
fn language_survives_round_trip() {
    let original = compiled(&lit("ab").kleene().unwrap());
    let again = compiled(&decompile(&original));

    for word in ["", "ab", "abab", "a", "ba", "aba"] {
        assert_eq!(accepts(&original, word), accepts(&again, word), "{word:?}");
    }
}
