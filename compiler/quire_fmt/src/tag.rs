//! Opening and closing tags.
//!
//! Each tag is assembled from pieces that a neighbour may print instead:
//! the `<tag` start, the `>` end, the `</tag` closing start and the `>`/`/>`
//! closing end. The predicates in [`borrow`](crate::borrow) decide who prints
//! what; this module only stitches the pieces together.

use std::borrow::Cow;

use quire_doc::builders::{concat, group, hardline, indent, join, line, literal_text, nil, softline, text};
use quire_doc::Doc;
use quire_ir::{Attribute, AttributeQuote, Node, NodeId};

use crate::borrow::{
    borrows_last_child_closing_end, borrows_next_opening_start, borrows_parent_closing_start,
    borrows_parent_opening_end, borrows_prev_closing_end, closing_end_marker,
};
use crate::config::ComponentTagCase;
use crate::embed::EmbedFormatter;
use crate::error::FormatError;
use crate::printer::Printer;

const FOR_DIRECTIVE: &str = "#for";

impl<E: EmbedFormatter + ?Sized> Printer<'_, E> {
    /// Tag name as it should be printed under the configured component case.
    pub(crate) fn preferred_tag<'n>(&self, node: &'n Node) -> Cow<'n, str> {
        let Some(component) = node.component_tag.as_deref() else {
            return Cow::Borrowed(&node.tag);
        };
        match self.config.component_tag_case {
            ComponentTagCase::Preserve => Cow::Borrowed(&node.tag),
            ComponentTagCase::Camel => Cow::Borrowed(component),
            ComponentTagCase::Kebab => Cow::Owned(camel_to_kebab(&node.tag)),
        }
    }

    pub(crate) fn opening_tag(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        let end = if node.is_self_closing {
            nil()
        } else {
            self.opening_tag_end(id)
        };
        Ok(concat(vec![
            self.opening_tag_start(id),
            self.attributes(id)?,
            end,
        ]))
    }

    pub(crate) fn closing_tag(&self, id: NodeId) -> Doc {
        let start = if self.tree[id].is_self_closing {
            nil()
        } else {
            self.closing_tag_start(id)
        };
        concat(vec![start, self.closing_tag_end(id)])
    }

    fn opening_tag_start(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        if node.prev.is_some_and(|prev| borrows_next_opening_start(tree, prev)) {
            return nil();
        }
        concat(vec![
            self.opening_prefix(id),
            text(format!("<{}", self.preferred_tag(node))),
        ])
    }

    fn opening_tag_end(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        match tree[id].children.first() {
            Some(&first) if borrows_parent_opening_end(tree, first) => nil(),
            _ => text(">"),
        }
    }

    fn closing_tag_start(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        if node
            .last_child
            .is_some_and(|last| borrows_parent_closing_start(tree, last))
        {
            return nil();
        }
        concat(vec![
            self.closing_prefix(id),
            text(format!("</{}", self.preferred_tag(node))),
        ])
    }

    fn closing_tag_end(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        let lent = match node.next {
            Some(next) => borrows_prev_closing_end(tree, next),
            None => node
                .parent
                .is_some_and(|parent| borrows_last_child_closing_end(tree, parent)),
        };
        if lent {
            return nil();
        }
        concat(vec![
            text(closing_end_marker(tree, id)),
            self.closing_suffix(id),
        ])
    }

    /// The last child's `>` or `/>`, printed in front of `</tag`.
    fn closing_prefix(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        match tree[id].last_child {
            Some(last) if borrows_last_child_closing_end(tree, id) => {
                text(closing_end_marker(tree, last))
            }
            _ => nil(),
        }
    }

    /// Delimiters borrowed from the previous sibling or the parent.
    pub(crate) fn opening_prefix(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        if borrows_prev_closing_end(tree, id) {
            if let Some(prev) = node.prev {
                return text(closing_end_marker(tree, prev));
            }
        }
        if borrows_parent_opening_end(tree, id) {
            return text(">");
        }
        nil()
    }

    /// Delimiters borrowed from the parent's closing tag or the next sibling.
    pub(crate) fn closing_suffix(&self, id: NodeId) -> Doc {
        let tree = self.tree;
        let node = &tree[id];
        if borrows_parent_closing_start(tree, id) {
            if let Some(parent) = node.parent {
                return text(format!("</{}", self.preferred_tag(&tree[parent])));
            }
        }
        if borrows_next_opening_start(tree, id) {
            if let Some(next) = node.next {
                return text(format!("<{}", self.preferred_tag(&tree[next])));
            }
        }
        nil()
    }

    /// The attribute block together with whatever separates it from the
    /// opening tag's `>` or `/>`.
    fn attributes(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        if node.attributes.is_empty() {
            return Ok(if node.is_self_closing { text(" ") } else { nil() });
        }

        let mut printed = Vec::with_capacity(node.attributes.len());
        for attr in &node.attributes {
            printed.push(self.attribute(attr)?);
        }

        let force_not_break = node.tag == "script"
            && node.attributes.len() == 1
            && node.attributes[0].key == "src";
        let gap = if self.config.single_attribute_per_line && node.attributes.len() > 1 {
            hardline()
        } else {
            line()
        };
        let lead = if force_not_break { text(" ") } else { line() };
        let mut parts = vec![indent(vec![lead, join(&gap, printed)])];

        let keep_same_line = force_not_break
            || self.config.bracket_same_line
            || node
                .children
                .first()
                .is_some_and(|&first| borrows_parent_opening_end(tree, first))
            || (node.is_self_closing
                && node
                    .parent
                    .is_some_and(|parent| borrows_last_child_closing_end(tree, parent)));
        parts.push(match (keep_same_line, node.is_self_closing) {
            (true, true) => text(" "),
            (true, false) => nil(),
            (false, true) => line(),
            (false, false) => softline(),
        });
        Ok(concat(parts))
    }

    fn attribute(&mut self, attr: &Attribute) -> Result<Doc, FormatError> {
        if attr.quote == AttributeQuote::None {
            return Ok(text(attr.key.as_str()));
        }
        let value = if attr.is_dynamic() {
            let base = attr.value_span.start;
            if attr.key == FOR_DIRECTIVE {
                self.for_directive(&attr.value, base)?
            } else {
                self.interpolation(&attr.value, base, true)?
            }
        } else {
            let quote = self.attribute_quote(attr);
            concat(vec![
                text(quote.to_string()),
                literal_text(&attr.value),
                text(quote.to_string()),
            ])
        };
        Ok(group(vec![text(attr.key.as_str()), text("="), value]))
    }

    /// The configured quote, unless the value contains it.
    fn attribute_quote(&self, attr: &Attribute) -> char {
        let preferred = self.config.preferred_quote();
        if !attr.value.contains(preferred) {
            return preferred;
        }
        match attr.quote {
            AttributeQuote::Double => '"',
            AttributeQuote::Single => '\'',
            _ if preferred == '"' => '\'',
            _ => '"',
        }
    }
}

/// `MyButton` to `my-button`.
pub(crate) fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
