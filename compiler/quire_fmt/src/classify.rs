//! Display classification and source-space detection.
//!
//! Runs once over the whole tree, in document order, before sensitivity is
//! computed. Whitespace-only text never becomes a node, so whether a
//! boundary had source whitespace is read off the gap between neighbouring
//! ranges (or the raw content of text nodes).

use quire_ir::{Display, NodeId, NodeKind, TagRoles, Tree};
use tracing::trace;

use crate::config::WhitespaceSensitivity;
use crate::patterns::DISPLAY_DIRECTIVE_RE;

/// Comment that makes the following node print verbatim.
pub const IGNORE_DIRECTIVE: &str = "fmt-ignore";

/// Assign roles, display and the `has_*_space` flags to every node.
pub(crate) fn classify(tree: &mut Tree, mode: WhitespaceSensitivity) {
    for id in tree.preorder() {
        let node = &tree[id];
        let roles = match node.kind {
            NodeKind::Element => TagRoles::for_element(&node.tag),
            NodeKind::Comment => TagRoles::COMMENT,
            NodeKind::Root | NodeKind::Text => TagRoles::empty(),
        };
        let display = if node.is_text() {
            Display::Inline
        } else {
            display_of(tree, id, roles, mode)
        };
        let (leading, trailing) = source_space(tree, id);
        let (prev, next, is_text) = (node.prev, node.next, node.is_text());

        let node = &mut tree[id];
        node.last_child = node.children.last().copied();
        node.roles = roles;
        node.display = display;
        node.has_leading_space |= leading;
        node.has_trailing_space |= trailing;

        if is_text {
            if let Some(prev) = prev.filter(|_| leading) {
                tree[prev].has_trailing_space = true;
            }
            if let Some(next) = next.filter(|_| trailing) {
                tree[next].has_leading_space = true;
            }
        }
    }
}

fn display_of(tree: &Tree, id: NodeId, roles: TagRoles, mode: WhitespaceSensitivity) -> Display {
    if let Some(found) = directive_display(tree, id) {
        trace!(?id, ?found, "display directive");
        return found;
    }
    if roles.contains(TagRoles::INLINE) {
        return Display::Inline;
    }
    match mode {
        WhitespaceSensitivity::Strict => Display::Inline,
        WhitespaceSensitivity::Ignore => Display::Block,
        WhitespaceSensitivity::Css if roles.contains(TagRoles::INLINE_BLOCK) => {
            Display::InlineBlock
        }
        WhitespaceSensitivity::Css => Display::Block,
    }
}

/// Display named by a `<!-- display: ... -->` comment right before `id`.
fn directive_display(tree: &Tree, id: NodeId) -> Option<Display> {
    let prev = &tree[tree[id].prev?];
    if !prev.is_comment() {
        return None;
    }
    let caps = DISPLAY_DIRECTIVE_RE.captures(&prev.content)?;
    Some(Display::parse(&caps[1]))
}

/// Whether source whitespace existed before and after `id`.
fn source_space(tree: &Tree, id: NodeId) -> (bool, bool) {
    let node = &tree[id];
    if node.is_text() {
        return (
            node.content.starts_with(char::is_whitespace),
            node.content.ends_with(char::is_whitespace),
        );
    }
    let Some(parent) = node.parent.map(|p| &tree[p]) else {
        return (false, false);
    };
    let leading = match node.prev {
        Some(prev) => node.range.start != tree[prev].range.end,
        None => node.range.start != parent.start_tag_end.offset,
    };
    let trailing = match node.next {
        Some(next) => node.range.end != tree[next].range.start,
        None => node.range.end != parent.end_tag_start.offset,
    };
    (leading, trailing)
}

/// Whether `id` is printed verbatim: a preserving tag, anything inside
/// `pre`, or a node right after an ignore directive.
pub(crate) fn is_preserved(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    if node.roles.contains(TagRoles::PRESERVE) || node.preserve_whitespace {
        return true;
    }
    node.prev.is_some_and(|prev| {
        let prev = &tree[prev];
        prev.is_comment() && prev.content.trim() == IGNORE_DIRECTIVE
    })
}

/// Text, or an element/comment displayed inline.
#[inline]
pub(crate) fn is_regarded_inline(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.is_text() || node.display.is_inline()
}
