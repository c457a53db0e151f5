//! Bracket matching over expression text.
//!
//! Both helpers skip over string and template literals, so quotes and
//! braces inside them never affect nesting.

/// Index of the `}` that closes a brace opened just before `start`.
///
/// Returns `None` when the brace is never closed or a string literal is
/// left unterminated.
///
/// ```
/// use quire_parse::find_end_bracket;
///
/// let text = "{ a: '}' }.b";
/// assert_eq!(find_end_bracket(text, 1), Some(9));
/// ```
pub fn find_end_bracket(text: &str, start: usize) -> Option<usize> {
    end_bracket(text.as_bytes(), start)
}

/// Index of the first `needle` that is outside any bracket pair and any
/// string literal.
///
/// ```
/// use quire_parse::find_outside_nesting;
///
/// assert_eq!(find_outside_nesting("(a, b) of f(x of y)", " of "), Some(6));
/// assert_eq!(find_outside_nesting("' of '", " of "), None);
/// ```
pub fn find_outside_nesting(text: &str, needle: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return None;
    }
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i)?,
            b'`' => i = skip_template(bytes, i)?,
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(needle) => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn end_bracket(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i)?,
            b'`' => i = skip_template(bytes, i)?,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the quote closing the string opened at `open`.
fn skip_string(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the backtick closing the template opened at `open`, stepping
/// over `${...}` substitutions.
fn skip_template(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'`' => return Some(i),
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = end_bracket(bytes, i + 2)?,
            _ => {}
        }
        i += 1;
    }
    None
}
