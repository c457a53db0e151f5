//! Node arena.
//!
//! All nodes of one document live in a single `Vec<Node>`; parent, child and
//! sibling relations are [`NodeId`] indices into it. Index 0 is always the
//! synthetic root.

use std::ops::{Index, IndexMut};

use crate::node::{Node, NodeId, NodeKind};
use crate::span::Position;
use crate::tags::{lang_region, LangRegion};

/// Expression grammar used for every interpolation in a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpressionDialect {
    #[default]
    Untyped,
    /// At least one top-level `lang-ts` region is present.
    Typed,
}

/// Per-document facts fixed by [`Tree::reorder_top_level`] and read during
/// printing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DocumentContext {
    pub expression_dialect: ExpressionDialect,
    /// Whether any top-level node is not an embedded language region.
    pub has_non_embedded_node: bool,
}

#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = NodeId::new(0);

    /// Create a tree holding only the root, spanning a source of `source_len`
    /// bytes that ends at `end`.
    pub fn new(source_len: u32, end: Position) -> Self {
        Tree {
            nodes: vec![Node::root(source_len, end)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Store a detached node.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    /// Link `child` as the new last child of `parent`.
    ///
    /// Sets both the current and the source-order sibling links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev = self.nodes[parent.index()].children.last().copied();
        if let Some(prev) = prev {
            let prev_node = &mut self.nodes[prev.index()];
            prev_node.next = Some(child);
            prev_node.source_next = Some(child);
        }
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.prev = prev;
        node.source_prev = prev;

        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.push(child);
        parent_node.last_child = Some(child);
    }

    /// Whether `id` is a direct child of the root.
    #[inline]
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self[id].parent == Some(Self::ROOT)
    }

    /// Follow `last_child` links down to a leaf. Returns `id` itself when it
    /// has no children.
    pub fn last_descendant(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(last) = self[current].last_child {
            current = last;
        }
        current
    }

    /// Every non-root node in document order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack: Vec<NodeId> = self[Self::ROOT].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self[id].children.iter().rev().copied());
        }
        out
    }

    /// Move embedded script regions to the front of the document and embedded
    /// style regions to the back, keeping relative order inside each group.
    ///
    /// Current sibling links are rebuilt from the new order; source-order
    /// links are left untouched.
    pub fn reorder_top_level(&mut self) -> DocumentContext {
        let mut scripts = Vec::new();
        let mut ordinary = Vec::new();
        let mut styles = Vec::new();
        let mut ctx = DocumentContext::default();

        for &id in &self.nodes[Self::ROOT.index()].children {
            let node = &self.nodes[id.index()];
            let region = if node.is_embedded && node.kind == NodeKind::Element {
                lang_region(&node.tag)
            } else {
                None
            };
            match region {
                Some(LangRegion::Script) => {
                    if node.tag.ends_with("-ts") {
                        ctx.expression_dialect = ExpressionDialect::Typed;
                    }
                    scripts.push(id);
                }
                Some(LangRegion::Style) => styles.push(id),
                None => ordinary.push(id),
            }
        }
        ctx.has_non_embedded_node = !ordinary.is_empty();

        let mut order = scripts;
        order.append(&mut ordinary);
        order.append(&mut styles);
        self.relink_children(Self::ROOT, order);
        ctx
    }

    fn relink_children(&mut self, parent: NodeId, order: Vec<NodeId>) {
        for (i, &id) in order.iter().enumerate() {
            let node = &mut self.nodes[id.index()];
            node.prev = i.checked_sub(1).map(|p| order[p]);
            node.next = order.get(i + 1).copied();
        }
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.last_child = order.last().copied();
        parent_node.children = order;
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Tree {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
