//! Block structure checks for style sheets.

use quire_diagnostic::LineIndex;

use crate::embed::SubFormatError;

/// Verify that braces balance outside strings and comments. `line_comments`
/// enables `//` comments (SCSS, Less).
pub(super) fn check_blocks(source: &str, line_comments: bool) -> Result<(), SubFormatError> {
    let bytes = source.as_bytes();
    let mut open: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let start = i;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None | Some(b'\n') => return Err(error(source, start, "Unclosed string")),
                        Some(b'\\') => i += 2,
                        Some(&b) if b == quote => break,
                        Some(_) => i += 1,
                    }
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let Some(end) = source[i + 2..].find("*/") else {
                    return Err(error(source, i, "Unclosed comment"));
                };
                i += end + 3;
            }
            b'/' if line_comments && bytes.get(i + 1) == Some(&b'/') => {
                i = source[i..].find('\n').map_or(bytes.len(), |end| i + end);
            }
            b'{' => open.push(i),
            b'}' => {
                if open.pop().is_none() {
                    return Err(error(source, i, "Unexpected }"));
                }
            }
            _ => {}
        }
        i += 1;
    }
    match open.last() {
        Some(&start) => Err(error(source, start, "Unclosed block")),
        None => Ok(()),
    }
}

/// Errors carry a `<css input>:L:C: ` preamble like common CSS toolchains.
fn error(source: &str, offset: usize, message: &str) -> SubFormatError {
    let lines = LineIndex::build(source);
    let (line, column) = lines.line_col(source, u32::try_from(offset).unwrap_or(u32::MAX));
    SubFormatError::new(format!("<css input>:{line}:{column}: {message}"), line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_sheets_pass() {
        assert_eq!(check_blocks("a { color: red; }\n@media x { b { c: d } }", false), Ok(()));
        assert_eq!(check_blocks("a::after { content: '}'; } /* { */", false), Ok(()));
        assert_eq!(check_blocks("// {\n.a { .b { } }", true), Ok(()));
    }

    #[test]
    fn unclosed_block_points_at_its_brace() {
        let err = check_blocks(".a {\n  .b {\n}", false);
        assert_eq!(
            err,
            Err(SubFormatError::new("<css input>:1:4: Unclosed block", 1, 4))
        );
    }

    #[test]
    fn other_failures() {
        assert_eq!(
            check_blocks("a }", false).map_err(|e| (e.line, e.column)),
            Err((1, 3))
        );
        assert_eq!(
            check_blocks("a { content: \"x }", false).map_err(|e| e.message),
            Err("<css input>:1:14: Unclosed string".to_owned())
        );
        assert!(check_blocks("/* open", false).is_err());
        assert!(check_blocks("// {", false).is_err());
    }
}
