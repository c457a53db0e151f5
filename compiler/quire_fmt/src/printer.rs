//! Document construction.
//!
//! [`Printer`] walks the decorated tree once and builds the [`Doc`] handed to
//! the layout engine. Its methods are spread over the modules that own each
//! concern: sibling sequencing in [`children`](crate::children), tags and
//! attributes in [`tag`](crate::tag), text and sub-formatted content in
//! [`embed`](crate::embed).

use quire_diagnostic::LineIndex;
use quire_doc::builders::{
    break_parent, concat, group, hardline, indent, line, literal_text, nil, softline, text,
};
use quire_doc::{Doc, GroupId, GroupIds};
use quire_ir::{ensure_sufficient_stack, Display, DocumentContext, NodeId, NodeKind, TagRoles, Tree};

use crate::borrow::{
    borrows_last_child_closing_end, borrows_next_opening_start, borrows_prev_closing_end,
    closing_end_marker,
};
use crate::children::force_break_content;
use crate::classify::is_preserved;
use crate::config::FormatConfig;
use crate::embed::{embedded_lang, EmbedFormatter};
use crate::error::FormatError;

pub(crate) struct Printer<'a, E: ?Sized> {
    pub(crate) tree: &'a Tree,
    pub(crate) source: &'a str,
    pub(crate) lines: &'a LineIndex,
    pub(crate) config: &'a FormatConfig,
    pub(crate) ctx: DocumentContext,
    pub(crate) embed: &'a mut E,
    group_ids: GroupIds,
}

impl<'a, E: EmbedFormatter + ?Sized> Printer<'a, E> {
    pub(crate) fn new(
        tree: &'a Tree,
        source: &'a str,
        lines: &'a LineIndex,
        config: &'a FormatConfig,
        ctx: DocumentContext,
        embed: &'a mut E,
    ) -> Self {
        Printer {
            tree,
            source,
            lines,
            config,
            ctx,
            embed,
            group_ids: GroupIds::new(),
        }
    }

    /// The whole document, ending in a newline unless it is empty.
    pub(crate) fn print_document(&mut self) -> Result<Doc, FormatError> {
        let root = self.tree.root();
        if self.tree[root].children.is_empty() {
            return Ok(nil());
        }
        Ok(concat(vec![self.print_children(root)?, hardline()]))
    }

    pub(crate) fn next_group_id(&mut self) -> GroupId {
        self.group_ids.next_id()
    }

    pub(crate) fn print_node(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        ensure_sufficient_stack(|| self.print_node_inner(id))
    }

    fn print_node_inner(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        match node.kind {
            NodeKind::Root => self.print_children(id),
            NodeKind::Text => self.print_text(id),
            NodeKind::Comment => self.print_verbatim(id),
            NodeKind::Element => {
                if node.display == Display::Unset {
                    return Err(FormatError::Invariant(format!(
                        "element `<{}>` at {} was never classified",
                        node.tag, node.loc.start
                    )));
                }
                if let Some(lang) = embedded_lang(node) {
                    return self.print_embedded(id, lang);
                }
                if is_preserved(tree, id) {
                    return self.print_verbatim(id);
                }
                self.print_element(id)
            }
        }
    }

    fn print_element(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];

        let body = match node.children.first() {
            None if is_dangling_space(tree, id) && node.roles.contains(TagRoles::INLINE) => line(),
            None => nil(),
            Some(&first) => {
                let first = &tree[first];
                let lead = if first.has_leading_space && first.leading_space_sensitive {
                    line()
                } else {
                    softline()
                };
                concat(vec![
                    if force_break_content(tree, id) {
                        break_parent()
                    } else {
                        nil()
                    },
                    indent(vec![lead, self.print_children(id)?]),
                    self.line_after_children(id),
                ])
            }
        };

        let opening = self.opening_tag(id)?;
        Ok(group(vec![group(opening), body, self.closing_tag(id)]))
    }

    /// Separator between the last child and the closing tag.
    fn line_after_children(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        let needs_borrow = match node.next {
            Some(next) => borrows_prev_closing_end(tree, next),
            None => node
                .parent
                .is_some_and(|parent| borrows_last_child_closing_end(tree, parent)),
        };
        let spaced = node.last_child.is_some_and(|last| {
            tree[last].has_trailing_space && tree[last].trailing_space_sensitive
        });
        match (needs_borrow, spaced) {
            (true, true) => text(" "),
            (true, false) => nil(),
            (false, true) => line(),
            (false, false) => softline(),
        }
    }

    /// Comments and preserved elements, copied from source minus any
    /// delimiters a neighbour prints on their behalf.
    fn print_verbatim(&self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        let mut start = node.range.start as usize;
        let mut end = node.range.end as usize;
        if node.is_element() {
            if node.prev.is_some_and(|prev| borrows_next_opening_start(tree, prev)) {
                start += 1 + node.tag.len();
            }
            if node.next.is_some_and(|next| borrows_prev_closing_end(tree, next)) {
                end = end.saturating_sub(closing_end_marker(tree, id).len());
            }
        }
        let Some(original) = self.source.get(start..end) else {
            return Err(FormatError::Invariant(format!(
                "verbatim range {start}..{end} of `{}` at {} is outside the source",
                node.tag, node.loc.start
            )));
        };
        Ok(concat(vec![
            self.opening_prefix(id),
            literal_text(original),
            self.closing_suffix(id),
        ]))
    }
}

/// An element whose body held nothing but whitespace.
fn is_dangling_space(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    !node.is_self_closing
        && node.children.is_empty()
        && node.start_tag_end.offset != node.end_tag_start.offset
}
