//! Child sequencing.
//!
//! Decides what goes between adjacent siblings and how each child's group is
//! tied to its neighbours' break decisions.

use quire_doc::builders::{
    break_parent, concat, group, group_with_id, hardline, if_break_in, line, nil, softline,
};
use quire_doc::{Doc, GroupId};
use quire_ir::tags::lang_region;
use quire_ir::{LangRegion, NodeId, TagRoles, Tree};
use tracing::trace;

use crate::borrow::{borrows_next_opening_start, borrows_parent_closing_start, borrows_prev_closing_end};
use crate::embed::EmbedFormatter;
use crate::error::FormatError;
use crate::printer::Printer;

/// Separator between a node and its previous sibling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BetweenLine {
    /// Nothing may go here without corrupting a borrowed delimiter.
    None,
    Hard,
    /// A space, or a newline when the group breaks.
    Line,
    /// Nothing, or a newline when the group breaks.
    Soft,
}

impl BetweenLine {
    fn to_doc(self) -> Doc {
        match self {
            BetweenLine::None => nil(),
            BetweenLine::Hard => hardline(),
            BetweenLine::Line => line(),
            BetweenLine::Soft => softline(),
        }
    }
}

/// What separates `id` from `tree[id].prev`.
pub(crate) fn between_line(tree: &Tree, id: NodeId) -> BetweenLine {
    let node = &tree[id];
    let Some(prev) = node.prev else {
        return BetweenLine::None;
    };
    let prev_node = &tree[prev];

    if (borrows_prev_closing_end(tree, id) && prev_node.is_self_closing)
        || (borrows_next_opening_start(tree, prev)
            && (node.is_self_closing || !node.children.is_empty() || !node.attributes.is_empty()))
    {
        return BetweenLine::None;
    }

    if !node.leading_space_sensitive
        || prefers_hardline_as_leading(tree, id)
        || closes_two_levels_up(tree, id, prev)
    {
        return BetweenLine::Hard;
    }

    if node.has_leading_space {
        BetweenLine::Line
    } else {
        BetweenLine::Soft
    }
}

/// `prev` ends in a chain of two borrowed closing starts that `id` picks up
/// through its own borrowed prefix.
fn closes_two_levels_up(tree: &Tree, id: NodeId, prev: NodeId) -> bool {
    let Some(last) = tree[prev].last_child else {
        return false;
    };
    let Some(last_last) = tree[last].last_child else {
        return false;
    };
    borrows_prev_closing_end(tree, id)
        && borrows_parent_closing_start(tree, last)
        && borrows_parent_closing_start(tree, last_last)
}

fn prefers_hardline_as_leading(tree: &Tree, id: NodeId) -> bool {
    tree[id].roles.contains(TagRoles::PREFER_HARDLINE)
        || tree[id]
            .prev
            .is_some_and(|prev| prefers_hardline_as_trailing(tree, prev))
        || has_surrounding_linebreak(tree, id)
}

fn prefers_hardline_as_trailing(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.roles.contains(TagRoles::PREFER_HARDLINE)
        || (node.is_element() && node.tag == "br")
        || has_surrounding_linebreak(tree, id)
}

fn has_surrounding_linebreak(tree: &Tree, id: NodeId) -> bool {
    has_leading_linebreak(tree, id) && has_trailing_linebreak(tree, id)
}

/// The node started on a later line than whatever preceded it in source.
pub(crate) fn has_leading_linebreak(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    if !node.has_leading_space {
        return false;
    }
    match node.source_prev {
        Some(prev) => tree[prev].loc.end.line < node.loc.start.line,
        None => {
            !tree.is_top_level(id)
                && node
                    .parent
                    .is_some_and(|parent| tree[parent].start_tag_end.line < node.loc.start.line)
        }
    }
}

/// Whatever followed the node in source started on a later line.
pub(crate) fn has_trailing_linebreak(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    if !node.has_trailing_space {
        return false;
    }
    match node.source_next {
        Some(next) => tree[next].loc.start.line > node.loc.end.line,
        None => {
            !tree.is_top_level(id)
                && node
                    .parent
                    .is_some_and(|parent| tree[parent].end_tag_start.line > node.loc.end.line)
        }
    }
}

/// A blank line followed the node in source.
pub(crate) fn force_next_empty_line(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    node.source_next
        .is_some_and(|next| node.loc.end.line + 1 < tree[next].loc.start.line)
}

/// Every child goes on its own line.
pub(crate) fn force_break_children(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    !node.children.is_empty() && node.roles.contains(TagRoles::ALWAYS_MULTILINE)
}

/// The element body always breaks away from its tags.
pub(crate) fn force_break_content(tree: &Tree, id: NodeId) -> bool {
    if force_break_children(tree, id) {
        return true;
    }
    let node = &tree[id];
    let Some(&first) = node.children.first() else {
        return false;
    };
    if node.roles.contains(TagRoles::FORCE_BREAK_CONTENT)
        || node.children.iter().any(|&child| {
            tree[child]
                .children
                .iter()
                .any(|&grandchild| !tree[grandchild].is_text())
        })
    {
        return true;
    }

    let only = &tree[first];
    node.children.len() == 1
        && !only.is_text()
        && has_leading_linebreak(tree, first)
        && (!only.trailing_space_sensitive || has_trailing_linebreak(tree, first))
}

impl<E: EmbedFormatter + ?Sized> Printer<'_, E> {
    pub(crate) fn print_children(&mut self, parent: NodeId) -> Result<Doc, FormatError> {
        if force_break_children(self.tree, parent) {
            return self.print_children_broken(parent);
        }

        let tree = self.tree;
        let children = &tree[parent].children;
        let ids: Vec<GroupId> = children.iter().map(|_| self.next_group_id()).collect();
        let mut parts = Vec::with_capacity(children.len());

        for (i, &child) in children.iter().enumerate() {
            let node = &tree[child];
            if node.is_text_or_comment() {
                if let Some(prev) = node.prev.filter(|&p| tree[p].is_text_or_comment()) {
                    let between = between_line(tree, child);
                    if between != BetweenLine::None {
                        if force_next_empty_line(tree, prev) {
                            parts.extend([hardline(), hardline()]);
                        } else {
                            parts.push(between.to_doc());
                        }
                    }
                }
                parts.push(self.print_node(child)?);
                continue;
            }

            let region = if node.is_embedded {
                lang_region(&node.tag)
            } else {
                None
            };
            let mut prev_parts = Vec::new();
            let mut leading_parts = Vec::new();
            let mut trailing_parts = Vec::new();
            let mut next_parts = Vec::new();

            if let Some(prev) = node.prev {
                let between = between_line(tree, child);
                if between != BetweenLine::None {
                    if force_next_empty_line(tree, prev) || region == Some(LangRegion::Style) {
                        prev_parts.extend([hardline(), hardline()]);
                    } else if between == BetweenLine::Hard {
                        prev_parts.push(hardline());
                    } else if tree[prev].is_text_or_comment() {
                        leading_parts.push(between.to_doc());
                    } else {
                        leading_parts.push(if_break_in(nil(), softline(), ids[i - 1]));
                    }
                }
            }

            if let Some(next) = node.next {
                let between = between_line(tree, next);
                let next_is_text = tree[next].is_text_or_comment();
                if between != BetweenLine::None {
                    if force_next_empty_line(tree, child) {
                        if next_is_text {
                            next_parts.extend([hardline(), hardline()]);
                        }
                    } else if between == BetweenLine::Hard {
                        if region == Some(LangRegion::Script) && self.ctx.has_non_embedded_node {
                            next_parts.push(hardline());
                        }
                        if next_is_text {
                            next_parts.push(hardline());
                        }
                    } else {
                        trailing_parts.push(between.to_doc());
                    }
                }
                trace!(?child, ?next, ?between, "sibling separator");
            }

            trailing_parts.insert(0, self.print_node(child)?);
            leading_parts.push(group_with_id(trailing_parts, ids[i]));
            parts.extend(prev_parts);
            parts.push(group(leading_parts));
            parts.extend(next_parts);
        }
        Ok(concat(parts))
    }

    /// Always-multiline containers: one child per line, blank lines kept.
    fn print_children_broken(&mut self, parent: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let mut parts = vec![break_parent()];
        for &child in &tree[parent].children {
            if let Some(prev) = tree[child].prev {
                let between = between_line(tree, child);
                if between != BetweenLine::None {
                    parts.push(between.to_doc());
                    if force_next_empty_line(tree, prev) {
                        parts.push(hardline());
                    }
                }
            }
            parts.push(self.print_node(child)?);
        }
        Ok(concat(parts))
    }
}
