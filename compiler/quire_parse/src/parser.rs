//! Markup parser.
//!
//! Builds a [`Tree`] in one forward pass. Open elements live on an explicit
//! stack, so nesting depth never grows the call stack.
//!
//! Whitespace-only runs between tags are not materialised; the formatter
//! recovers them from the gaps between node ranges. A text node's `range`
//! covers its trimmed extent while `content` keeps the raw run.

use quire_diagnostic::LineIndex;
use quire_ir::tags::{is_lang_tag, is_raw_text_tag, is_void_tag};
use quire_ir::{Attribute, AttributeQuote, Node, NodeId, Position, SourceLoc, Span, Tree};
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::scan::find_end_bracket;

/// Parse markup source into a node tree.
///
/// ```
/// let tree = quire_parse::parse("<p>hi <b>there</b></p>").unwrap();
/// let p = tree[tree.root()].children[0];
/// assert_eq!(tree[p].tag, "p");
/// assert_eq!(tree[p].children.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    if u32::try_from(source.len()).is_err() {
        return Err(ParseError {
            kind: ParseErrorKind::MalformedTag {
                detail: "source exceeds 4 GiB",
            },
            span: Span::DUMMY,
            position: Position::new(0, 1, 1),
        });
    }
    let tree = Parser::new(source).parse_document()?;
    debug!(nodes = tree.len() - 1, "parsed markup");
    Ok(tree)
}

struct Parser<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
    lines: LineIndex,
    tree: Tree,
    open: Vec<NodeId>,
    /// Number of open `pre` elements.
    pre_depth: u32,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        let lines = LineIndex::build(source);
        let len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let end = lines.position(source, len);
        Parser {
            source,
            cursor: Cursor::new(source),
            lines,
            tree: Tree::new(len, end),
            open: Vec::new(),
            pre_depth: 0,
        }
    }

    fn parse_document(mut self) -> Result<Tree, ParseError> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with("<!--") {
                self.comment()?;
            } else if self.cursor.starts_with("</") {
                self.closing_tag()?;
            } else if self.cursor.current() == b'<' && self.cursor.peek().is_ascii_alphabetic() {
                self.opening_tag()?;
            } else {
                self.text()?;
            }
        }

        if let Some(&id) = self.open.last() {
            let node = &self.tree[id];
            let start = node.range.start;
            let tag = node.tag.clone();
            let end = start + 1 + len_u32(&tag);
            return Err(self.error(start, end, ParseErrorKind::UnclosedElement { tag }));
        }
        Ok(self.tree)
    }

    fn comment(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance_n(4);
        let Some(close) = self.cursor.find("-->") else {
            return Err(self.error(start, start + 4, ParseErrorKind::UnterminatedComment));
        };
        let end = close + 3;
        let content = self.cursor.slice(start + 4, close);
        self.cursor.set_pos(end);

        let node = Node::comment(content, Span::new(start, end), self.loc(start, end));
        self.attach(node);
        Ok(())
    }

    fn text(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        let len = len_u32(self.source);
        let mut scan = start;
        let end = loop {
            match self.cursor.find_either(scan, b'<', b'{') {
                None => break len,
                Some(i) if self.source.as_bytes()[i as usize] == b'{' => {
                    let Some(close) = find_end_bracket(self.source, i as usize + 1) else {
                        return Err(self.error(
                            i,
                            i + 1,
                            ParseErrorKind::UnbalancedInterpolation { location: "text" },
                        ));
                    };
                    scan = len_u32(&self.source[..close]) + 1;
                }
                Some(i) if is_markup_start(&self.source.as_bytes()[i as usize..]) => break i,
                Some(i) => scan = i + 1,
            }
        };
        self.cursor.set_pos(end);

        let raw = self.cursor.slice(start, end);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let lead = len_u32(raw) - len_u32(raw.trim_start());
        let trail = len_u32(raw) - len_u32(raw.trim_end());
        let (t_start, t_end) = (start + lead, end - trail);

        let node = Node::text(raw, Span::new(t_start, t_end), self.loc(t_start, t_end));
        self.attach(node);
        Ok(())
    }

    fn opening_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_byte);
        let tag = self.cursor.slice_from(name_start).to_owned();
        let attributes = self.attributes(start)?;

        let mut node = Node::element(tag.clone(), Span::new(start, start), self.loc(start, start));
        node.component_tag = component_name(&tag);
        node.is_embedded = is_lang_tag(&tag);
        node.attributes = attributes;

        if self.cursor.starts_with("/>") {
            self.cursor.advance_n(2);
            let end = self.cursor.pos();
            node.is_self_closing = true;
            self.finish_leaf(&mut node, start, end, end);
            self.attach(node);
            return Ok(());
        }

        // attributes() only returns in front of `>` or `/>`
        self.cursor.advance();
        let open_end = self.cursor.pos();
        node.start_tag_end = self.position(open_end);

        if is_void_tag(&tag) {
            node.is_self_closing = true;
            self.finish_leaf(&mut node, start, open_end, open_end);
            self.attach(node);
            return Ok(());
        }

        if is_raw_text_tag(&tag) {
            let closing = format!("</{tag}");
            let Some(close) = self.cursor.find(&closing) else {
                let end = start + 1 + len_u32(&tag);
                return Err(self.error(start, end, ParseErrorKind::UnclosedElement { tag }));
            };
            node.content = self.cursor.slice(open_end, close).to_owned();
            self.cursor.set_pos(close + len_u32(&closing));
            self.cursor.eat_whitespace();
            if self.cursor.current() != b'>' {
                let at = self.cursor.pos();
                return Err(self.error(
                    close,
                    at,
                    ParseErrorKind::MalformedTag {
                        detail: "expected `>` to end the closing tag",
                    },
                ));
            }
            self.cursor.advance();
            let end = self.cursor.pos();
            node.range = Span::new(start, end);
            node.loc = self.loc(start, end);
            node.end_tag_start = self.position(close);
            trace!(tag = %tag, body_len = node.content.len(), "raw text element");
            self.attach(node);
            return Ok(());
        }

        let id = self.attach(node);
        if tag == "pre" {
            self.pre_depth += 1;
        }
        self.open.push(id);
        Ok(())
    }

    /// Close out an element that has no body.
    fn finish_leaf(&self, node: &mut Node, start: u32, open_end: u32, end: u32) {
        node.range = Span::new(start, end);
        node.loc = self.loc(start, end);
        node.start_tag_end = self.position(open_end);
        node.end_tag_start = node.start_tag_end;
    }

    fn attributes(&mut self, tag_start: u32) -> Result<Vec<Attribute>, ParseError> {
        let mut attrs = Vec::new();
        loop {
            self.cursor.eat_whitespace();
            let pos = self.cursor.pos();
            match self.cursor.current() {
                b'>' => return Ok(attrs),
                b'/' if self.cursor.peek() == b'>' => return Ok(attrs),
                _ if self.cursor.is_eof() => {
                    return Err(self.error(
                        tag_start,
                        tag_start + 1,
                        ParseErrorKind::MalformedTag {
                            detail: "start tag is never closed",
                        },
                    ));
                }
                b'=' | b'"' | b'\'' | b'<' => {
                    return Err(self.error(
                        pos,
                        pos + 1,
                        ParseErrorKind::MalformedTag {
                            detail: "unexpected character in start tag",
                        },
                    ));
                }
                _ => {}
            }

            let key_start = pos;
            loop {
                let b = self.cursor.current();
                let ends = self.cursor.is_eof()
                    || b.is_ascii_whitespace()
                    || b == b'='
                    || b == b'>'
                    || (b == b'/' && self.cursor.peek() == b'>');
                if ends {
                    break;
                }
                self.cursor.advance();
            }
            let key_end = self.cursor.pos();
            let key = self.cursor.slice(key_start, key_end).to_owned();
            let key_span = Span::new(key_start, key_end);

            let before_eq = self.cursor.pos();
            self.cursor.eat_whitespace();
            if self.cursor.current() != b'=' {
                self.cursor.set_pos(before_eq);
                attrs.push(Attribute {
                    key,
                    value: String::new(),
                    quote: AttributeQuote::None,
                    key_span,
                    value_span: Span::new(key_end, key_end),
                });
                continue;
            }
            self.cursor.advance();
            self.cursor.eat_whitespace();

            let (quote, value_span) = self.attribute_value()?;
            attrs.push(Attribute {
                key,
                value: self.cursor.slice(value_span.start, value_span.end).to_owned(),
                quote,
                key_span,
                value_span,
            });
        }
    }

    fn attribute_value(&mut self) -> Result<(AttributeQuote, Span), ParseError> {
        let open = self.cursor.pos();
        match self.cursor.current() {
            q @ (b'"' | b'\'') => {
                self.cursor.advance();
                let Some(close) = self.cursor.find_byte(q) else {
                    return Err(self.error(
                        open,
                        open + 1,
                        ParseErrorKind::MalformedTag {
                            detail: "attribute value is never closed",
                        },
                    ));
                };
                self.cursor.set_pos(close + 1);
                let quote = if q == b'"' {
                    AttributeQuote::Double
                } else {
                    AttributeQuote::Single
                };
                Ok((quote, Span::new(open + 1, close)))
            }
            b'{' => {
                let Some(close) = find_end_bracket(self.source, open as usize + 1) else {
                    return Err(self.error(
                        open,
                        open + 1,
                        ParseErrorKind::UnbalancedInterpolation {
                            location: "attribute value",
                        },
                    ));
                };
                let close = len_u32(&self.source[..close]);
                self.cursor.set_pos(close + 1);
                Ok((AttributeQuote::Curly, Span::new(open + 1, close)))
            }
            _ => {
                self.cursor
                    .eat_while(|b| b != 0 && !b.is_ascii_whitespace() && b != b'>');
                let end = self.cursor.pos();
                if end == open {
                    return Err(self.error(
                        open,
                        open + 1,
                        ParseErrorKind::MalformedTag {
                            detail: "missing attribute value",
                        },
                    ));
                }
                Ok((AttributeQuote::Unquoted, Span::new(open, end)))
            }
        }
    }

    fn closing_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance_n(2);
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_byte);
        let name = self.cursor.slice_from(name_start).to_owned();
        self.cursor.eat_whitespace();
        if name.is_empty() || self.cursor.current() != b'>' {
            let at = self.cursor.pos().max(start + 2);
            return Err(self.error(
                start,
                at,
                ParseErrorKind::MalformedTag {
                    detail: "malformed closing tag",
                },
            ));
        }
        self.cursor.advance();
        let end = self.cursor.pos();

        let Some(&id) = self.open.last() else {
            return Err(self.error(start, end, ParseErrorKind::UnexpectedClosingTag { tag: name }));
        };
        if self.tree[id].tag != name {
            let expected = self.tree[id].tag.clone();
            return Err(self.error(
                start,
                end,
                ParseErrorKind::MismatchedClosingTag {
                    expected,
                    found: name,
                },
            ));
        }
        self.open.pop();
        if name == "pre" {
            self.pre_depth = self.pre_depth.saturating_sub(1);
        }

        let end_pos = self.position(end);
        let close_pos = self.position(start);
        let node = &mut self.tree[id];
        node.range.end = end;
        node.loc.end = end_pos;
        node.end_tag_start = close_pos;
        Ok(())
    }

    fn attach(&mut self, mut node: Node) -> NodeId {
        node.preserve_whitespace = self.pre_depth > 0;
        let parent = self.open.last().copied().unwrap_or(Tree::ROOT);
        let id = self.tree.alloc(node);
        self.tree.append_child(parent, id);
        id
    }

    fn position(&self, offset: u32) -> Position {
        self.lines.position(self.source, offset)
    }

    fn loc(&self, start: u32, end: u32) -> SourceLoc {
        SourceLoc::new(self.position(start), self.position(end))
    }

    fn error(&self, start: u32, end: u32, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            span: Span::new(start, end),
            position: self.position(start),
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Whether `rest` begins a comment, a closing tag or an opening tag.
fn is_markup_start(rest: &[u8]) -> bool {
    rest.starts_with(b"<!--")
        || rest.starts_with(b"</")
        || (rest.first() == Some(&b'<') && rest.get(1).is_some_and(u8::is_ascii_alphabetic))
}

/// PascalCase component name for component tags: tags written in
/// PascalCase, and hyphenated tags other than embedded language regions.
pub(crate) fn component_name(tag: &str) -> Option<String> {
    if is_lang_tag(tag) {
        return None;
    }
    if tag.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Some(tag.to_owned());
    }
    if !tag.contains('-') {
        return None;
    }
    let mut name = String::with_capacity(tag.len());
    for part in tag.split('-').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.push_str(chars.as_str());
        }
    }
    Some(name)
}

#[inline]
fn len_u32(s: &str) -> u32 {
    u32::try_from(s.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
