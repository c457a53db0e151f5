//! Delimiter borrowing.
//!
//! When a line break is placed at a whitespace-significant boundary that had
//! no source whitespace, the break must fall *inside* a tag so it renders as
//! nothing. Each predicate below names one delimiter that is printed by a
//! neighbouring node instead of its owner. They are evaluated on demand at
//! every emission point and read only the decorated tree.

use quire_ir::{NodeId, Tree};

use crate::classify::is_preserved;

/// `n` prints the previous sibling's `>` or `/>` as its prefix.
pub(crate) fn borrows_prev_closing_end(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.prev.is_some_and(|prev| !tree[prev].is_text_or_comment())
        && node.leading_space_sensitive
        && !node.has_leading_space
}

/// Text or comment `n` prints the next sibling's `<tag` as its suffix.
pub(crate) fn borrows_next_opening_start(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.next.is_some_and(|next| !tree[next].is_text_or_comment())
        && node.is_text_or_comment()
        && node.trailing_space_sensitive
        && !node.has_trailing_space
}

/// First child `n` prints its parent's opening `>` as its prefix.
pub(crate) fn borrows_parent_opening_end(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.prev.is_none()
        && !node.has_leading_space
        && !tree.is_top_level(id)
        && node.leading_space_sensitive
}

/// Last child `n` prints its parent's `</tag` as its suffix. Only happens
/// when the subtree ends in text or a comment.
pub(crate) fn borrows_parent_closing_start(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.next.is_none()
        && !node.has_trailing_space
        && !tree.is_top_level(id)
        && node.trailing_space_sensitive
        && tree[tree.last_descendant(id)].is_text_or_comment()
}

/// `parent`'s closing tag is prefixed with its last child's `>` or `/>`.
pub(crate) fn borrows_last_child_closing_end(tree: &Tree, parent: NodeId) -> bool {
    let Some(last) = tree[parent].last_child else {
        return false;
    };
    let last_node = &tree[last];
    !last_node.is_text_or_comment()
        && !is_preserved(tree, parent)
        && last_node.trailing_space_sensitive
        && !last_node.has_trailing_space
        && !tree[tree.last_descendant(parent)].is_text_or_comment()
}

/// The delimiter that ends an element: `/>` when self-closing, else `>`.
#[inline]
pub(crate) fn closing_end_marker(tree: &Tree, id: NodeId) -> &'static str {
    if tree[id].is_self_closing {
        "/>"
    } else {
        ">"
    }
}
