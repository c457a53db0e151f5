use quire_ir::Span;

use super::*;
use crate::ErrorCode;

#[test]
fn frame_shows_message_code_and_source_line() {
    let source = "<div>\n    <p>text</span>\n</div>";
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("mismatched closing tag")
        .with_label(Span::new(17, 24), "expected `</p>`");

    let frame = CodeFrame::new(source).render(&diag);

    assert!(frame.contains("mismatched closing tag"), "{frame}");
    assert!(frame.contains("E1002"), "{frame}");
    assert!(frame.contains("<p>text</span>"), "{frame}");
    assert!(frame.contains("expected `</p>`"), "{frame}");
    assert!(!frame.contains('\u{1b}'), "colour codes leaked: {frame}");
}

#[test]
fn label_at_end_of_source_is_clamped() {
    let source = "<div>";
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("unclosed element")
        .with_label(Span::new(5, 5), "input ends here");

    let frame = CodeFrame::new(source).render(&diag);
    assert!(frame.contains("unclosed element"), "{frame}");
}

#[test]
fn empty_source_renders_message_only() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("broken")
        .with_label(Span::DUMMY, "here");
    let frame = CodeFrame::new("").render(&diag);
    assert!(frame.contains("broken"), "{frame}");
}

#[test]
fn label_range_uses_character_offsets() {
    let frame = CodeFrame::new("ä<b>");
    // byte 2 is '<' after the two-byte 'ä'
    assert_eq!(frame.label_range(2..5), Some(1..4));
    assert_eq!(frame.label_range(9..9), Some(3..4));
}
