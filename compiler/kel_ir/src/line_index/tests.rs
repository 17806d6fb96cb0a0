#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_positions_are_zero_based() {
    let index = LineIndex::build("ab\ncd\n\nxyz");
    assert_eq!(index.position(0), Position::new(0, 0));
    assert_eq!(index.position(1), Position::new(0, 1));
    assert_eq!(index.position(2), Position::new(0, 2));
    assert_eq!(index.position(3), Position::new(1, 0));
    assert_eq!(index.position(6), Position::new(2, 0));
    assert_eq!(index.position(9), Position::new(3, 2));
}

#[test]
fn test_offset_past_end_clamps() {
    let index = LineIndex::build("ab");
    assert_eq!(index.position(99), Position::new(0, 2));
}

#[test]
fn test_line_count() {
    assert_eq!(LineIndex::build("").line_count(), 1);
    assert_eq!(LineIndex::build("a\n").line_count(), 2);
    assert_eq!(LineIndex::build("a\nb\nc").line_count(), 3);
}

#[test]
fn test_line_text() {
    let source = "(one)\n(two)\nthree";
    let index = LineIndex::build(source);
    assert_eq!(index.line_text(source, 0), Some("(one)"));
    assert_eq!(index.line_text(source, 1), Some("(two)"));
    assert_eq!(index.line_text(source, 2), Some("three"));
    assert_eq!(index.line_text(source, 3), None);
}

#[test]
fn test_location_of_span() {
    let index = LineIndex::build("x\n  \"abc");
    let loc = index.location(Span::new(4, 8));
    assert_eq!(loc.begin, Position::new(1, 2));
    assert_eq!(loc.end, Position::new(1, 6));
}

proptest! {
    #[test]
    fn position_and_offset_agree(source in "[a-z\n]{0,64}", pick in 0usize..64) {
        let index = LineIndex::build(&source);
        let offset = u32::try_from(pick.min(source.len())).unwrap();
        let position = index.position(offset);
        prop_assert_eq!(index.offset(position), Some(offset));

        let newlines = source.as_bytes()[..offset as usize]
            .iter()
            .filter(|b| **b == b'\n')
            .count();
        prop_assert_eq!(position.line as usize, newlines);
    }
}
