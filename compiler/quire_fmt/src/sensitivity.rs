//! Whitespace sensitivity.
//!
//! A boundary between two nodes is only treated as significant when both
//! sides agree. The first pass judges each side of each node on its own; the
//! second downgrades a side whenever its neighbour disagrees, so afterwards
//! `prev.trailing_space_sensitive == next.leading_space_sensitive` holds for
//! every pair of siblings.

use quire_ir::{ensure_sufficient_stack, Display, NodeId, Tree};

use crate::classify::{is_preserved, is_regarded_inline};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Head,
    Tail,
}

/// Fill in `leading_space_sensitive` and `trailing_space_sensitive` for every
/// node below the root.
pub(crate) fn attach_sensitivity(tree: &mut Tree) {
    visit(tree, Tree::ROOT);
}

fn visit(tree: &mut Tree, parent: NodeId) {
    let children = tree[parent].children.clone();
    for &child in &children {
        let leading = is_sensitive(tree, child, Side::Head);
        let trailing = is_sensitive(tree, child, Side::Tail);
        let node = &mut tree[child];
        node.leading_space_sensitive = leading;
        node.trailing_space_sensitive = trailing;
    }

    for (i, &child) in children.iter().enumerate() {
        if let Some(&prev) = i.checked_sub(1).and_then(|p| children.get(p)) {
            let agreed = tree[prev].trailing_space_sensitive;
            tree[child].leading_space_sensitive &= agreed;
        }
        if let Some(&next) = children.get(i + 1) {
            let agreed = tree[next].leading_space_sensitive;
            tree[child].trailing_space_sensitive &= agreed;
        }
    }

    for &child in &children {
        ensure_sufficient_stack(|| visit(tree, child));
    }
}

fn is_sensitive(tree: &Tree, id: NodeId, side: Side) -> bool {
    let node = &tree[id];
    let Some(parent) = node.parent else {
        return false;
    };
    if tree[parent].display == Display::None {
        return false;
    }
    if is_preserved(tree, parent) {
        return true;
    }

    let sibling = match side {
        Side::Head => node.prev,
        Side::Tail => node.next,
    };
    if let Some(sibling) = sibling {
        return is_regarded_inline(tree, sibling);
    }

    let parent_flows_inline = matches!(tree[parent].display, Display::Inline | Display::InlineBlock);
    !(tree.is_top_level(id)
        || node.is_script_or_style()
        || is_preserved(tree, id)
        || !parent_flows_inline)
}
