use pretty_assertions::assert_eq;
use quire_ir::NodeKind;

use super::*;

fn parse_ok(source: &str) -> Tree {
    match parse(source) {
        Ok(tree) => tree,
        Err(err) => panic!("unexpected parse error: {err}"),
    }
}

fn top(tree: &Tree) -> Vec<NodeId> {
    tree[tree.root()].children.clone()
}

fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(_) => panic!("expected a parse error for {source:?}"),
        Err(err) => err,
    }
}

#[test]
fn elements_and_text() {
    let tree = parse_ok("<p>hi <b>there</b></p>");
    let p = top(&tree)[0];
    assert_eq!(tree[p].tag, "p");
    assert_eq!(tree[p].range, Span::new(0, 22));
    assert_eq!(tree[p].start_tag_end.offset, 3);
    assert_eq!(tree[p].end_tag_start.offset, 18);

    let kids = &tree[p].children;
    assert_eq!(kids.len(), 2);
    assert_eq!(tree[kids[0]].kind, NodeKind::Text);
    assert_eq!(tree[kids[0]].content, "hi ");
    assert_eq!(tree[kids[0]].range, Span::new(3, 5));
    assert_eq!(tree[kids[1]].tag, "b");
    assert_eq!(tree[kids[1]].prev, Some(kids[0]));
}

#[test]
fn whitespace_only_runs_are_dropped() {
    let tree = parse_ok("<div>\n    <p></p>\n</div>\n");
    let div = top(&tree)[0];
    assert_eq!(top(&tree).len(), 1);
    assert_eq!(tree[div].children.len(), 1);
    let p = tree[div].children[0];
    assert_eq!(tree[p].range, Span::new(10, 17));
    assert_eq!(tree[p].loc.start.line, 2);
    assert_eq!(tree[p].loc.start.column, 5);
}

#[test]
fn root_spans_the_source() {
    let source = "a\n<b></b>";
    let tree = parse_ok(source);
    let root = &tree[tree.root()];
    assert_eq!(root.start_tag_end.offset, 0);
    assert_eq!(root.end_tag_start.offset, 9);
    assert_eq!(root.end_tag_start.line, 2);
    assert_eq!(root.kind, NodeKind::Root);
}

#[test]
fn comments_keep_inner_text() {
    let tree = parse_ok("<!-- display: inline --><div></div>");
    let nodes = top(&tree);
    assert_eq!(tree[nodes[0]].kind, NodeKind::Comment);
    assert_eq!(tree[nodes[0]].content, " display: inline ");
    assert_eq!(tree[nodes[0]].range, Span::new(0, 24));
    assert_eq!(tree[nodes[1]].prev, Some(nodes[0]));
}

#[test]
fn void_and_self_closing_tags() {
    let tree = parse_ok("<br><img src=\"a.png\"><Foo />");
    let nodes = top(&tree);
    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|&id| tree[id].is_self_closing));
    assert_eq!(tree[nodes[0]].range, Span::new(0, 4));
    assert_eq!(tree[nodes[2]].component_tag.as_deref(), Some("Foo"));
}

#[test]
fn raw_text_bodies_are_not_parsed() {
    let tree = parse_ok("<lang-js>if (a < b) { x() }</lang-js><style>a>b{}</style >");
    let nodes = top(&tree);
    assert_eq!(tree[nodes[0]].content, "if (a < b) { x() }");
    assert!(tree[nodes[0]].is_embedded);
    assert!(tree[nodes[0]].children.is_empty());
    assert_eq!(tree[nodes[0]].component_tag, None);
    assert_eq!(tree[nodes[1]].content, "a>b{}");
    assert!(!tree[nodes[1]].is_embedded);
    assert_eq!(tree[nodes[1]].end_tag_start.offset, 49);
}

#[test]
fn attribute_kinds() {
    let tree = parse_ok(r#"<input disabled a="1" b='2' c=3 !d={x > 1} #for="i of l">"#);
    let attrs = &tree[top(&tree)[0]].attributes;
    let summary: Vec<(&str, &str, AttributeQuote)> = attrs
        .iter()
        .map(|a| (a.key.as_str(), a.value.as_str(), a.quote))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("disabled", "", AttributeQuote::None),
            ("a", "1", AttributeQuote::Double),
            ("b", "2", AttributeQuote::Single),
            ("c", "3", AttributeQuote::Unquoted),
            ("!d", "x > 1", AttributeQuote::Curly),
            ("#for", "i of l", AttributeQuote::Double),
        ]
    );
    assert_eq!(attrs[1].value_span, Span::new(19, 20));
    assert_eq!(attrs[1].key_span, Span::new(16, 17));
}

#[test]
fn interpolations_may_contain_angle_brackets() {
    let tree = parse_ok("<p>{a < b ? '</p>' : c} done</p>");
    let p = top(&tree)[0];
    let kids = &tree[p].children;
    assert_eq!(kids.len(), 1);
    assert_eq!(tree[kids[0]].content, "{a < b ? '</p>' : c} done");
}

#[test]
fn stray_angle_bracket_is_text() {
    let tree = parse_ok("a < b");
    let nodes = top(&tree);
    assert_eq!(nodes.len(), 1);
    assert_eq!(tree[nodes[0]].content, "a < b");
}

#[test]
fn hyphenated_tags_are_components() {
    assert_eq!(component_name("my-button").as_deref(), Some("MyButton"));
    assert_eq!(component_name("Card").as_deref(), Some("Card"));
    assert_eq!(component_name("div"), None);
    assert_eq!(component_name("lang-css"), None);
}

#[test]
fn descendants_of_pre_preserve_whitespace() {
    let tree = parse_ok("<pre> <b>x</b> </pre><i>y</i>");
    let nodes = top(&tree);
    let pre = nodes[0];
    assert!(!tree[pre].preserve_whitespace);
    let b = tree[pre].children[0];
    assert!(tree[b].preserve_whitespace);
    assert!(tree[tree[b].children[0]].preserve_whitespace);
    assert!(!tree[nodes[1]].preserve_whitespace);
}

#[test]
fn mismatched_closing_tag() {
    let err = parse_err("<div>\n  <p>text</span>\n</div>");
    assert_eq!(
        err.kind,
        ParseErrorKind::MismatchedClosingTag {
            expected: "p".to_owned(),
            found: "span".to_owned(),
        }
    );
    assert_eq!((err.position.line, err.position.column), (2, 10));
    assert_eq!(err.position.offset, 15);
    assert_eq!(err.to_string(), "expected `</p>`, found `</span>` (2:10)");
    assert_eq!(
        err.to_diagnostic().notes,
        vec!["end tags are not implied; close `<p>` first".to_owned()]
    );
}

#[test]
fn unclosed_element_points_at_opening_tag() {
    let err = parse_err("<section><p></p>");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnclosedElement {
            tag: "section".to_owned()
        }
    );
    assert_eq!(err.span, Span::new(0, 8));
    assert_eq!(
        err.to_diagnostic().notes,
        vec!["add `</section>` or write the tag as `<section />`".to_owned()]
    );
    assert!(parse_err("<!-- open").to_diagnostic().notes.is_empty());
}

#[test]
fn other_errors() {
    assert_eq!(parse_err("<!-- open").kind, ParseErrorKind::UnterminatedComment);
    assert_eq!(
        parse_err("</div>").kind,
        ParseErrorKind::UnexpectedClosingTag {
            tag: "div".to_owned()
        }
    );
    assert_eq!(
        parse_err("<p>{a</p>").kind,
        ParseErrorKind::UnbalancedInterpolation { location: "text" }
    );
    assert_eq!(parse_err("<p a=\"x>").kind.code(), quire_diagnostic::ErrorCode::E1005);
    assert_eq!(parse_err("<lang-js>x").kind.code(), quire_diagnostic::ErrorCode::E1001);
}

#[test]
fn diagnostic_carries_code_and_span() {
    let err = parse_err("<a></b>");
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, quire_diagnostic::ErrorCode::E1002);
    assert_eq!(diag.primary_span(), Some(Span::new(3, 7)));
}
