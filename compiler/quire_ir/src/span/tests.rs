use super::*;

#[test]
fn span_len_and_empty() {
    let span = Span::new(3, 8);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn span_round_trips_through_range() {
    let span = Span::from_range(2..10);
    assert_eq!(span, Span::new(2, 10));
    assert_eq!(span.to_range(), 2..10);
}

#[test]
fn span_debug_is_compact() {
    assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
}

#[test]
fn position_display_is_line_colon_column() {
    let pos = Position::new(17, 3, 5);
    assert_eq!(pos.to_string(), "3:5");
    assert_eq!(format!("{pos:?}"), "3:5@17");
}
