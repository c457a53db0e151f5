//! Tree nodes.
//!
//! Nodes live in a [`Tree`](crate::Tree) arena and refer to each other by
//! [`NodeId`]. The parser fills in identity, position and structure; the
//! formatter's classification and sensitivity passes fill in the derived
//! printing state (`roles`, `display`, the space flags).

use std::fmt;

use crate::span::{Position, SourceLoc, Span};
use crate::tags::TagRoles;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Synthetic document root; owns the top-level nodes.
    Root,
    Element,
    Text,
    /// `<!-- ... -->`; `content` holds the text between the delimiters.
    Comment,
}

/// How an attribute value was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeQuote {
    /// Bare key, no value.
    None,
    Double,
    Single,
    /// `key=value` without quotes.
    Unquoted,
    /// `key={expression}`.
    Curly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    /// Raw value between the quotes/braces. Empty for [`AttributeQuote::None`].
    pub value: String,
    pub quote: AttributeQuote,
    pub key_span: Span,
    /// Span of `value` itself, excluding quotes or braces.
    pub value_span: Span,
}

impl Attribute {
    /// Directive-style keys (`!class`, `@click`, `#for`, `&value`) carry
    /// expressions even when the value is quoted.
    pub fn is_dynamic(&self) -> bool {
        self.quote == AttributeQuote::Curly
            || matches!(self.key.as_bytes().first(), Some(b'!' | b'@' | b'#' | b'&'))
    }
}

/// CSS display category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// Not classified yet. Elements must never be printed in this state.
    #[default]
    Unset,
    Inline,
    InlineBlock,
    Block,
    None,
    /// Any other value supplied by a display directive comment.
    Other(String),
}

impl Display {
    pub fn parse(value: &str) -> Display {
        match value {
            "inline" => Display::Inline,
            "inline-block" => Display::InlineBlock,
            "block" => Display::Block,
            "none" => Display::None,
            other => Display::Other(other.to_owned()),
        }
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self, Display::Inline)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Tag name as written. Empty for text, comment and root nodes.
    pub tag: String,
    /// PascalCase component name, when the tag refers to a component.
    pub component_tag: Option<String>,
    pub content: String,
    pub attributes: Vec<Attribute>,
    pub is_embedded: bool,
    pub is_self_closing: bool,
    pub preserve_whitespace: bool,

    pub range: Span,
    pub loc: SourceLoc,
    /// Position just past the opening tag's `>`.
    pub start_tag_end: Position,
    /// Position of the closing tag's `<`.
    pub end_tag_start: Position,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub source_prev: Option<NodeId>,
    pub source_next: Option<NodeId>,

    pub roles: TagRoles,
    pub display: Display,
    pub has_leading_space: bool,
    pub has_trailing_space: bool,
    pub leading_space_sensitive: bool,
    pub trailing_space_sensitive: bool,
}

impl Node {
    fn blank(kind: NodeKind) -> Self {
        Node {
            kind,
            tag: String::new(),
            component_tag: None,
            content: String::new(),
            attributes: Vec::new(),
            is_embedded: false,
            is_self_closing: false,
            preserve_whitespace: false,
            range: Span::DUMMY,
            loc: SourceLoc::default(),
            start_tag_end: Position::default(),
            end_tag_start: Position::default(),
            parent: None,
            children: Vec::new(),
            last_child: None,
            prev: None,
            next: None,
            source_prev: None,
            source_next: None,
            roles: TagRoles::empty(),
            display: Display::Unset,
            has_leading_space: false,
            has_trailing_space: false,
            leading_space_sensitive: false,
            trailing_space_sensitive: false,
        }
    }

    pub(crate) fn root(source_len: u32, end: Position) -> Self {
        let start = Position::new(0, 1, 1);
        Node {
            range: Span::new(0, source_len),
            loc: SourceLoc::new(start, end),
            start_tag_end: start,
            end_tag_start: end,
            display: Display::Block,
            ..Node::blank(NodeKind::Root)
        }
    }

    pub fn element(tag: impl Into<String>, range: Span, loc: SourceLoc) -> Self {
        Node {
            tag: tag.into(),
            range,
            loc,
            ..Node::blank(NodeKind::Element)
        }
    }

    pub fn text(content: impl Into<String>, range: Span, loc: SourceLoc) -> Self {
        Node {
            content: content.into(),
            range,
            loc,
            ..Node::blank(NodeKind::Text)
        }
    }

    pub fn comment(content: impl Into<String>, range: Span, loc: SourceLoc) -> Self {
        Node {
            content: content.into(),
            range,
            loc,
            ..Node::blank(NodeKind::Comment)
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind == NodeKind::Comment
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[inline]
    pub fn is_text_or_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::Comment)
    }

    #[inline]
    pub fn is_script_or_style(&self) -> bool {
        self.is_element() && matches!(self.tag.as_str(), "script" | "style")
    }
}
