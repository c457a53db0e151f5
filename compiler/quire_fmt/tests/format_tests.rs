#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end formatting scenarios.
//!
//! Each case pins down one whitespace rule: where a boundary may break,
//! which delimiters move to keep a break from rendering as a space, and how
//! configuration changes the layout.

use pretty_assertions::assert_eq;
use quire_fmt::{analyze, format, FormatConfig, FormatError, WhitespaceSensitivity};

fn fmt(source: &str) -> String {
    format(source, &FormatConfig::default()).unwrap()
}

fn fmt_with(source: &str, config: &FormatConfig) -> String {
    format(source, config).unwrap()
}

// Inline vs block boundaries

#[test]
fn inline_boundary_stays_glued() {
    assert_eq!(fmt("...<a>...</a>"), "...<a>...</a>\n");
}

#[test]
fn block_boundary_breaks() {
    assert_eq!(fmt("...<div>...</div>"), "...\n<div>...</div>\n");
}

#[test]
fn runs_of_spaces_collapse() {
    assert_eq!(fmt("<b> ...  </b>  ..."), "<b> ... </b> ...\n");
    assert_eq!(fmt(" ... <u>  ...  </u>"), "... <u> ... </u>\n");
}

#[test]
fn forced_break_borrows_delimiters() {
    assert_eq!(
        fmt("<a>...<div></div></a>"),
        "<a\n    >...\n    <div></div\n></a>\n"
    );
}

#[test]
fn void_elements_self_close() {
    assert_eq!(fmt("<br>"), "<br />\n");
    assert_eq!(fmt("<p>one<br>two</p>"), fmt(&fmt("<p>one<br>two</p>")));
}

#[test]
fn empty_document() {
    assert_eq!(fmt(""), "");
    assert_eq!(fmt("  \n\n "), "");
}

// Interpolations and embedded regions

#[test]
fn interpolation_round_trip() {
    assert_eq!(fmt("{ a.slice (x )}"), "{a.slice(x)}\n");
    let spaced = FormatConfig {
        space_around_interpolation: true,
        ..FormatConfig::default()
    };
    assert_eq!(fmt_with("{ a.slice (x )}", &spaced), "{ a.slice(x) }\n");
}

#[test]
fn regions_are_reordered_and_spaced() {
    let source = "<div>a</div>\n<lang-js>let a = 1</lang-js>\n<lang-css>.a{color:red}</lang-css>";
    let expected = "<lang-js>\n    let a = 1\n</lang-js>\n\n<div>a</div>\n\n<lang-css>\n    .a{color:red}\n</lang-css>\n";
    let once = fmt(source);
    assert_eq!(once, expected);
    assert_eq!(fmt(&once), once);
}

// Configuration

#[test]
fn one_attribute_per_line() {
    let config = FormatConfig {
        single_attribute_per_line: true,
        ..FormatConfig::with_max_width(30)
    };
    assert_eq!(
        fmt_with(r#"<div id="main" class="container">text</div>"#, &config),
        "<div\n    id=\"main\"\n    class=\"container\"\n>\n    text\n</div>\n"
    );
}

#[test]
fn strict_mode_treats_blocks_as_inline() {
    let strict = FormatConfig::with_whitespace_sensitivity(WhitespaceSensitivity::Strict);
    assert_eq!(fmt_with("...<div>...</div>", &strict), "...<div>...</div>\n");
}

#[test]
fn ignore_mode_drops_inline_block_sensitivity() {
    let text_in_video = |mode| {
        let (tree, _) = analyze("<video>a</video>", &FormatConfig::with_whitespace_sensitivity(mode)).unwrap();
        let video = tree[tree.root()].children[0];
        let text = tree[video].children[0];
        tree[text].leading_space_sensitive
    };
    assert!(text_in_video(WhitespaceSensitivity::Css));
    assert!(!text_in_video(WhitespaceSensitivity::Ignore));
}

#[test]
fn indent_width() {
    let config = FormatConfig::with_indent_width(2);
    assert_eq!(
        fmt_with("<ul><li>one</li><li>two</li></ul>", &config),
        "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>\n"
    );
}

// Errors

#[test]
fn parse_errors_carry_position_and_frame() {
    let err = format("<div>\n  <p>text</span>\n</div>", &FormatConfig::default()).unwrap_err();
    assert!(matches!(err, FormatError::Parse { .. }));
    assert_eq!(err.to_string(), "expected `</p>`, found `</span>` (2:10)");
    let position = err.position().unwrap();
    assert_eq!((position.line, position.column), (2, 10));
    let frame = err.code_frame().unwrap();
    assert!(frame.contains("found `</span>`"), "{frame}");
    assert!(frame.contains("end tags are not implied; close `<p>` first"), "{frame}");
}

#[test]
fn sub_format_errors_are_relative_to_the_document() {
    let err = format("<p>ok</p>\n<p>{ f(a }</p>", &FormatConfig::default()).unwrap_err();
    let FormatError::SubFormat { message, position, .. } = &err else {
        panic!("expected a sub-format error, got {err:?}");
    };
    assert_eq!(message, "`(` is never closed (2:7)");
    assert_eq!((position.line, position.column, position.offset), (2, 7, 16));
}

#[test]
fn css_errors_lose_their_preamble() {
    let err = format("<div></div>\n<style>\na {\n</style>", &FormatConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Unclosed block (3:3)");
}
