//! Constructors for [`Doc`] values.

use crate::doc::{Doc, GroupId, LineKind};

/// The document that prints nothing.
#[inline]
pub fn nil() -> Doc {
    Doc::Concat(Vec::new())
}

#[inline]
pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

#[inline]
pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

#[inline]
pub fn indent(contents: impl Into<Doc>) -> Doc {
    Doc::Indent(Box::new(contents.into()))
}

#[inline]
pub fn group(contents: impl Into<Doc>) -> Doc {
    Doc::Group {
        contents: Box::new(contents.into()),
        should_break: false,
        id: None,
    }
}

/// A group whose break decision can be queried through `id`.
#[inline]
pub fn group_with_id(contents: impl Into<Doc>, id: GroupId) -> Doc {
    Doc::Group {
        contents: Box::new(contents.into()),
        should_break: false,
        id: Some(id),
    }
}

#[inline]
pub fn fill(parts: Vec<Doc>) -> Doc {
    Doc::Fill(parts)
}

/// Interleave `docs` with clones of `sep`.
pub fn join(sep: &Doc, docs: impl IntoIterator<Item = Doc>) -> Doc {
    let mut parts = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(sep.clone());
        }
        parts.push(doc);
    }
    Doc::Concat(parts)
}

#[inline]
pub fn if_break(break_contents: impl Into<Doc>, flat_contents: impl Into<Doc>) -> Doc {
    Doc::IfBreak {
        break_contents: Box::new(break_contents.into()),
        flat_contents: Box::new(flat_contents.into()),
        group_id: None,
    }
}

/// Like [`if_break`], but follows the group named `group_id`.
#[inline]
pub fn if_break_in(
    break_contents: impl Into<Doc>,
    flat_contents: impl Into<Doc>,
    group_id: GroupId,
) -> Doc {
    Doc::IfBreak {
        break_contents: Box::new(break_contents.into()),
        flat_contents: Box::new(flat_contents.into()),
        group_id: Some(group_id),
    }
}

#[inline]
pub fn line() -> Doc {
    Doc::Line(LineKind::Normal)
}

#[inline]
pub fn softline() -> Doc {
    Doc::Line(LineKind::Soft)
}

#[inline]
pub fn hardline() -> Doc {
    Doc::Concat(vec![Doc::Line(LineKind::Hard), Doc::BreakParent])
}

#[inline]
pub fn literalline() -> Doc {
    Doc::Concat(vec![Doc::Line(LineKind::Literal), Doc::BreakParent])
}

#[inline]
pub fn break_parent() -> Doc {
    Doc::BreakParent
}

/// Text that may span lines; continuation lines start at column zero.
pub fn literal_text(s: &str) -> Doc {
    if !s.contains('\n') {
        return text(s);
    }
    join(&literalline(), s.split('\n').map(text))
}

#[cfg(test)]
mod tests;
