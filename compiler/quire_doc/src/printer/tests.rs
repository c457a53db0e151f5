use pretty_assertions::assert_eq;

use super::*;
use crate::builders::*;
use crate::doc::GroupIds;

fn render(doc: &Doc, width: usize) -> String {
    print(
        doc,
        &PrintOptions {
            width,
            indent_width: 4,
        },
    )
}

fn call(args: &[&str]) -> Doc {
    group(vec![
        text("f("),
        indent(vec![softline(), join(&concat(vec![text(","), line()]), args.iter().map(|a| text(*a)))]),
        softline(),
        text(")"),
    ])
}

#[test]
fn group_stays_flat_when_it_fits() {
    assert_eq!(render(&call(&["a", "b"]), 80), "f(a, b)");
}

#[test]
fn group_breaks_when_too_wide() {
    assert_eq!(render(&call(&["alpha", "beta"]), 10), "f(\n    alpha,\n    beta\n)");
}

#[test]
fn nested_group_gets_its_own_decision() {
    let doc = group(vec![
        text("["),
        indent(vec![softline(), call(&["x"]), text(","), line(), text("long_name")]),
        softline(),
        text("]"),
    ]);
    assert_eq!(render(&doc, 12), "[\n    f(x),\n    long_name\n]");
}

#[test]
fn hardline_breaks_enclosing_groups() {
    let doc = group(vec![text("a"), line(), text("b"), hardline(), text("c")]);
    assert_eq!(render(&doc, 80), "a\nb\nc");
}

#[test]
fn propagation_marks_groups() {
    let mut doc = group(group(vec![text("a"), hardline()]));
    assert!(propagate_breaks(&mut doc));
    match doc {
        Doc::Group { should_break, .. } => assert!(should_break),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn if_break_follows_named_group() {
    let mut ids = GroupIds::new();
    let id = ids.next_id();
    let doc = concat(vec![
        group_with_id(vec![text("long"), line(), text("words")], id),
        if_break_in(text("!"), text("?"), id),
    ]);
    assert_eq!(render(&doc, 80), "long words?");
    assert_eq!(render(&doc, 5), "long\nwords!");
}

#[test]
fn if_break_before_its_group_prints_nothing() {
    let mut ids = GroupIds::new();
    let id = ids.next_id();
    let doc = concat(vec![
        if_break_in(text("!"), text("?"), id),
        group_with_id(text("x"), id),
    ]);
    assert_eq!(render(&doc, 80), "x");
}

#[test]
fn fill_wraps_per_separator() {
    let words = ["one", "two", "three", "four", "five"];
    let mut parts = Vec::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            parts.push(line());
        }
        parts.push(text(*w));
    }
    assert_eq!(render(&fill(parts), 9), "one two\nthree\nfour five");
}

#[test]
fn literal_lines_start_at_column_zero() {
    let doc = concat(vec![
        text("<pre>"),
        indent(vec![hardline(), literal_text("a\n  b")]),
    ]);
    assert_eq!(render(&doc, 80), "<pre>\n    a\n  b");
}

#[test]
fn trailing_spaces_are_trimmed_before_newlines() {
    let doc = concat(vec![text("a "), hardline(), text("b")]);
    assert_eq!(render(&doc, 80), "a\nb");
}

#[test]
fn width_counts_characters() {
    let doc = group(vec![text("ééééé"), line(), text("ü")]);
    assert_eq!(render(&doc, 7), "ééééé ü");
}
