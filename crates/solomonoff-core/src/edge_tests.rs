use crate::{Alphabet, Edge, Output, Partial, format_range, format_symbol};

#[test]
fn partial_multiply_concatenates_and_adds() {
    let a = Partial::new("ab", 2);
    let b = Partial::new("c", -5);

    assert_eq!(a.multiply(&b), Partial::new("abc", -3));
    assert_eq!(Partial::neutral().multiply(&a), a);
    assert_eq!(a.multiply(&Partial::neutral()), a);
}

#[test]
fn weights_saturate() {
    let heavy = Partial::new("", i32::MAX);
    assert_eq!(heavy.multiply(&Partial::new("", 1)).weight, i32::MAX);
}

#[test]
fn edge_actions() {
    let edge = Edge::new('a' as u32 - 1, 'a' as u32, "x", 1);
    let p = Partial::new("<", 2);

    let left = edge.left_action(&p);
    assert_eq!(left.output, Output::from("<x"));
    assert_eq!(left.weight, 3);
    assert_eq!(
        (left.from_exclusive, left.to_inclusive),
        (edge.from_exclusive, edge.to_inclusive)
    );

    let right = edge.right_action(&p);
    assert_eq!(right.output, Output::from("x<"));
    assert_eq!(right.weight, 3);
}

#[test]
fn edge_range_membership() {
    let edge = Edge::neutral('a' as u32, 'e' as u32);

    assert!(!edge.contains('a' as u32));
    assert!(edge.contains('b' as u32));
    assert!(edge.contains('e' as u32));
    assert!(!edge.is_single_symbol());
    assert!(Edge::neutral(96, 97).is_single_symbol());
}

#[test]
fn alphabet_bounds() {
    let alphabet = Alphabet::UNICODE;

    assert!(!alphabet.contains(0));
    assert!(alphabet.contains(1));
    assert!(alphabet.contains(0x10FFFF));
    assert!(!alphabet.contains(0x110000));
    assert_eq!(alphabet.reflect(), alphabet.minimal());
    assert_eq!(alphabet.successor(41), 42);
    assert_eq!(Alphabet::default(), Alphabet::UNICODE);
}

#[test]
fn display_forms() {
    assert_eq!(Edge::neutral(96, 97).to_string(), "'a'");
    assert_eq!(Edge::new(96, 101, "X", 3).to_string(), "'a'-'e':\"X\" w3");
    assert_eq!(Partial::neutral().to_string(), "\"\"");
    assert_eq!(Partial::new("ok", -1).to_string(), "\"ok\" w-1");
    assert_eq!(Output::new(vec![0, 'b' as u32]).to_string(), "\"\\0b\"");
    assert_eq!(format_symbol('z' as u32), "'z'");
    assert_eq!(format_symbol(0xD800), "0xd800");
    assert_eq!(format_range('a' as u32, 'c' as u32), "'b'-'c'");
}

#[test]
fn output_text() {
    let out = Output::from("héllo");
    assert_eq!(out.len(), 5);
    assert_eq!(out.to_text(), "héllo");
    assert_eq!(Output::new(vec![0xD800]).to_text(), "\u{FFFD}");
}

#[test]
fn edge_serializes_as_plain_record() {
    let json = serde_json::to_string(&Edge::new(96, 97, "x", 2)).unwrap();
    assert_eq!(
        json,
        r#"{"from_exclusive":96,"to_inclusive":97,"output":[120],"weight":2}"#
    );
}
