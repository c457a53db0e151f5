use super::*;

#[test]
fn join_interleaves_separator() {
    let doc = join(&text(","), ["a", "b", "c"].map(text));
    assert_eq!(
        doc,
        concat(vec![text("a"), text(","), text("b"), text(","), text("c")])
    );
}

#[test]
fn join_of_nothing_is_empty() {
    assert!(join(&line(), Vec::new()).is_empty());
}

#[test]
fn hardline_carries_break_parent() {
    assert_eq!(
        hardline(),
        concat(vec![Doc::Line(LineKind::Hard), Doc::BreakParent])
    );
}

#[test]
fn literal_text_splits_lines() {
    assert_eq!(literal_text("one"), text("one"));
    assert_eq!(
        literal_text("a\nb"),
        concat(vec![text("a"), literalline(), text("b")])
    );
}

#[test]
fn emptiness() {
    assert!(nil().is_empty());
    assert!(group(text("")).is_empty());
    assert!(!softline().is_empty());
    assert!(!if_break(text("x"), nil()).is_empty());
}
