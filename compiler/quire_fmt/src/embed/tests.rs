use pretty_assertions::assert_eq;
use quire_doc::builders::text;
use quire_doc::Doc;
use quire_ir::{ExpressionDialect, Tree};

use super::*;
use crate::config::FormatConfig;
use crate::{format, format_with};

/// Echoes trimmed text back and records every request it sees.
#[derive(Default)]
struct Recorder {
    seen: Vec<(String, EmbedLang, EmbedHints)>,
    fail_on: Option<(EmbedLang, SubFormatError)>,
}

impl EmbedFormatter for Recorder {
    fn format(&mut self, request: &EmbedRequest<'_>) -> Result<Doc, SubFormatError> {
        self.seen
            .push((request.text.to_owned(), request.lang, request.hints));
        match &self.fail_on {
            Some((lang, err)) if *lang == request.lang => Err(err.clone()),
            _ => Ok(text(request.text.trim())),
        }
    }
}

fn parse_ok(source: &str) -> Tree {
    match quire_parse::parse(source) {
        Ok(tree) => tree,
        Err(err) => panic!("unexpected parse error: {err}"),
    }
}

fn fmt(source: &str, config: &FormatConfig) -> String {
    match format(source, config) {
        Ok(out) => out,
        Err(err) => panic!("unexpected format error: {err}"),
    }
}

#[test]
fn languages_by_tag() {
    let tree = parse_ok(
        "<style></style><script></script><lang-ts></lang-ts><lang-scss></lang-scss>\
         <lang-less></lang-less><lang-sass></lang-sass><div></div>",
    );
    let langs: Vec<Option<EmbedLang>> = tree[tree.root()]
        .children
        .iter()
        .map(|&id| embedded_lang(&tree[id]))
        .collect();
    assert_eq!(
        langs,
        vec![
            Some(EmbedLang::Css),
            Some(EmbedLang::JavaScript),
            Some(EmbedLang::TypeScript),
            Some(EmbedLang::Scss),
            Some(EmbedLang::Less),
            Some(EmbedLang::Css),
            None,
        ]
    );
}

#[test]
fn requests_follow_document_order_and_dialect() {
    let mut recorder = Recorder::default();
    let out = format_with(
        "<p>{ x }</p>\n<lang-ts>let a</lang-ts>",
        &FormatConfig::default(),
        &mut recorder,
    );
    assert_eq!(
        out.as_deref(),
        Ok("<lang-ts>\n    let a\n</lang-ts>\n\n<p>{x}</p>\n")
    );
    assert_eq!(
        recorder.seen,
        vec![
            ("let a".to_owned(), EmbedLang::TypeScript, EmbedHints::default()),
            (
                " x ".to_owned(),
                EmbedLang::Expression(ExpressionDialect::Typed),
                EmbedHints::default()
            ),
        ]
    );
}

#[test]
fn for_directive_splits_binding_and_iterable() {
    let mut recorder = Recorder::default();
    let out = format_with(
        r#"<li #for="a, b of xs"></li>"#,
        &FormatConfig::default(),
        &mut recorder,
    );
    assert_eq!(out.as_deref(), Ok("<li #for={a, b of xs}></li>\n"));
    let hints: Vec<(&str, EmbedHints)> = recorder
        .seen
        .iter()
        .map(|(text, _, hints)| (text.as_str(), *hints))
        .collect();
    assert_eq!(
        hints,
        vec![
            (
                "a, b",
                EmbedHints {
                    in_attribute: true,
                    for_binding_target: true
                }
            ),
            (
                "xs",
                EmbedHints {
                    in_attribute: true,
                    for_binding_target: false
                }
            ),
        ]
    );
}

#[test]
fn empty_content_skips_the_sub_formatter() {
    let mut recorder = Recorder::default();
    let out = format_with("<p>{}</p><style> </style>", &FormatConfig::default(), &mut recorder);
    assert_eq!(out.as_deref(), Ok("<p>{}</p>\n<style></style>\n"));
    assert!(recorder.seen.is_empty());
}

#[test]
fn sub_format_errors_point_into_the_document() {
    let mut recorder = Recorder {
        fail_on: Some((
            EmbedLang::Css,
            SubFormatError::new("<css input>:2:3: Unknown word", 2, 3),
        )),
        ..Recorder::default()
    };
    let err = match format_with(
        "<lang-css>\na {\n  b\n}</lang-css>",
        &FormatConfig::default(),
        &mut recorder,
    ) {
        Ok(out) => panic!("expected an error, got {out:?}"),
        Err(err) => err,
    };
    assert_eq!(err.to_string(), "Unknown word (2:3)");
    let position = err.position().map(|p| (p.offset, p.line, p.column));
    assert_eq!(position, Some((13, 2, 3)));
    assert!(err.code_frame().is_some_and(|frame| frame.contains("Unknown word")));
}

#[test]
fn sub_format_positions_outside_the_region_are_rejected() {
    let mut recorder = Recorder {
        fail_on: Some((EmbedLang::Css, SubFormatError::new("Unknown word", 9, 1))),
        ..Recorder::default()
    };
    match format_with(
        "<lang-css>\na {\n}</lang-css>",
        &FormatConfig::default(),
        &mut recorder,
    ) {
        Err(FormatError::Invariant(message)) => {
            assert_eq!(message, "sub-formatter reported 9:1 outside its input: Unknown word");
        }
        other => panic!("expected an invariant error, got {other:?}"),
    }
}

#[test]
fn text_fills_the_line() {
    assert_eq!(
        fmt("<p>aaa   bbb ccc\nddd</p>", &FormatConfig::with_max_width(16)),
        "<p>\n    aaa bbb ccc\n    ddd\n</p>\n"
    );
}

#[test]
fn interpolations_stick_to_words() {
    assert_eq!(
        fmt("<p>a{ x }b  c</p>", &FormatConfig::default()),
        "<p>a{x}b c</p>\n"
    );
    let spaced = FormatConfig {
        space_around_interpolation: true,
        ..FormatConfig::default()
    };
    assert_eq!(fmt("<p>{x} {}</p>", &spaced), "<p>{ x } {}</p>\n");
}
