//! Tokenizer for script blocks and expressions.
//!
//! Only as much of the language is recognised as spacing needs: literal
//! bodies are opaque, and `+`/`-`/`++`/`--`/`/` are disambiguated by
//! whether an operand may start at that point. Brackets are matched while
//! scanning, so a successful tokenize also proves the text is balanced.

use quire_parse::find_end_bracket;

use super::located;
use crate::embed::SubFormatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TokenCategory {
    /// Identifier, or a keyword used as a value.
    Word,
    /// Operator-like keyword: `typeof`, `in`, `of`, `new`, ...
    Keyword,
    Number,
    /// String, template or regular expression literal.
    Str,
    Comment,
    LineComment,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    /// `.` or `?.`
    Dot,
    Spread,
    Question,
    /// `:` of a conditional expression.
    TernaryColon,
    /// `:` after an object key or a type annotation.
    KeyColon,
    Arrow,
    Binary,
    Prefix,
    Postfix,
}

impl TokenCategory {
    #[inline]
    pub(crate) fn is_open(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LBrace)
    }

    #[inline]
    pub(crate) fn is_close(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }

    /// Tokens an operand can end with.
    pub(crate) fn is_operand_end(self) -> bool {
        matches!(
            self,
            Self::Word
                | Self::Number
                | Self::Str
                | Self::RParen
                | Self::RBracket
                | Self::RBrace
                | Self::Postfix
        )
    }

    pub(crate) fn is_operand_start(self) -> bool {
        matches!(self, Self::Word | Self::Number | Self::Str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) category: TokenCategory,
    pub(crate) text: &'a str,
}

const KEYWORDS: &[&str] = &[
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "void",
    "delete",
    "await",
    "return",
    "yield",
    "throw",
    "case",
    "as",
    "satisfies",
];

/// Longest first.
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "==", "!=", "<=", ">=",
    "&&", "||", "??", "**", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "++", "--",
    "+", "-", "*", "/", "%", "<", ">", "=", "!", "~", "&", "|", "^",
];

/// An open bracket and the conditional `?`s still waiting for their `:`.
struct Frame {
    open: u8,
    offset: usize,
    pending_ternaries: u32,
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token<'a>>,
    frames: Vec<Frame>,
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token<'_>>, SubFormatError> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
        frames: vec![Frame {
            open: 0,
            offset: 0,
            pending_ternaries: 0,
        }],
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> Result<(), SubFormatError> {
        let source = self.source;
        while let Some(c) = source[self.pos..].chars().next() {
            let start = self.pos;
            if c.is_whitespace() {
                self.pos += c.len_utf8();
                continue;
            }
            let category = match c {
                c if is_word_start(c) => self.word(),
                '0'..='9' => self.number(),
                '.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => self.number(),
                '"' | '\'' => self.string(c)?,
                '`' => self.template()?,
                '/' if self.peek_byte(1) == Some(b'/') => {
                    self.pos = self.source[start..]
                        .find('\n')
                        .map_or(self.bytes.len(), |end| start + end);
                    TokenCategory::LineComment
                }
                '/' if self.peek_byte(1) == Some(b'*') => {
                    let Some(end) = self.source[start + 2..].find("*/") else {
                        return Err(self.error(start, "Unterminated comment"));
                    };
                    self.pos = start + 2 + end + 2;
                    TokenCategory::Comment
                }
                '/' if self.operand_expected() => self.regex()?,
                '(' | '[' | '{' => self.open(c)?,
                ')' | ']' | '}' => self.close(c)?,
                ',' => self.single(TokenCategory::Comma),
                ';' => self.single(TokenCategory::Semicolon),
                ':' => self.colon(),
                '?' => self.question(),
                '.' if self.source[start..].starts_with("...") => {
                    self.pos += 3;
                    TokenCategory::Spread
                }
                '.' => self.single(TokenCategory::Dot),
                '=' if self.peek_byte(1) == Some(b'>') => {
                    self.pos += 2;
                    TokenCategory::Arrow
                }
                _ => self.operator()?,
            };
            self.tokens.push(Token {
                category,
                text: &source[start..self.pos],
            });
        }

        match self.frames.last() {
            Some(frame) if self.frames.len() > 1 => Err(self.error(
                frame.offset,
                &format!("`{}` is never closed", char::from(frame.open)),
            )),
            _ => Ok(()),
        }
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn error(&self, offset: usize, message: &str) -> SubFormatError {
        located(self.source, offset, message)
    }

    /// Whether the previous token leaves room for an operand, which makes
    /// `/` a regex and `+`/`-` prefix operators.
    fn operand_expected(&self) -> bool {
        self.tokens
            .last()
            .is_none_or(|prev| !prev.category.is_operand_end())
    }

    fn single(&mut self, category: TokenCategory) -> TokenCategory {
        self.pos += 1;
        category
    }

    fn word(&mut self) -> TokenCategory {
        let start = self.pos;
        let rest = &self.source[start..];
        let len = rest
            .char_indices()
            .skip(1)
            .find(|&(_, c)| !is_word_continue(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        let after_dot = self
            .tokens
            .last()
            .is_some_and(|prev| prev.category == TokenCategory::Dot);
        if !after_dot && KEYWORDS.contains(&&rest[..len]) {
            TokenCategory::Keyword
        } else {
            TokenCategory::Word
        }
    }

    fn number(&mut self) -> TokenCategory {
        let start = self.pos;
        let hex = self.source[start..].starts_with("0x") || self.source[start..].starts_with("0X");
        self.pos += 1;
        while let Some(b) = self.peek_byte(0) {
            let exponent_sign = matches!(b, b'+' | b'-')
                && !hex
                && matches!(self.bytes[self.pos - 1], b'e' | b'E');
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        TokenCategory::Number
    }

    fn string(&mut self, quote: char) -> Result<TokenCategory, SubFormatError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek_byte(0) {
                None | Some(b'\n') => {
                    return Err(self.error(start, "Unterminated string constant"));
                }
                Some(b'\\') => self.pos += 2,
                Some(b) if char::from(b) == quote => {
                    self.pos += 1;
                    return Ok(TokenCategory::Str);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn template(&mut self) -> Result<TokenCategory, SubFormatError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek_byte(0) {
                None => return Err(self.error(start, "Unterminated template")),
                Some(b'\\') => self.pos += 2,
                Some(b'`') => {
                    self.pos += 1;
                    return Ok(TokenCategory::Str);
                }
                Some(b'$') if self.peek_byte(1) == Some(b'{') => {
                    let Some(end) = find_end_bracket(self.source, self.pos + 2) else {
                        return Err(self.error(start, "Unterminated template"));
                    };
                    self.pos = end + 1;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn regex(&mut self) -> Result<TokenCategory, SubFormatError> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek_byte(0) {
                None | Some(b'\n') => {
                    return Err(self.error(start, "Unterminated regular expression"));
                }
                Some(b'\\') => self.pos += 2,
                Some(b'[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(b']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some(b'/') if !in_class => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        while self.peek_byte(0).is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        Ok(TokenCategory::Str)
    }

    fn open(&mut self, c: char) -> Result<TokenCategory, SubFormatError> {
        let open = u8::try_from(c).map_err(|_| self.error(self.pos, "Unexpected character"))?;
        self.frames.push(Frame {
            open,
            offset: self.pos,
            pending_ternaries: 0,
        });
        self.pos += 1;
        Ok(match c {
            '(' => TokenCategory::LParen,
            '[' => TokenCategory::LBracket,
            _ => TokenCategory::LBrace,
        })
    }

    fn close(&mut self, c: char) -> Result<TokenCategory, SubFormatError> {
        let expected = match c {
            ')' => b'(',
            ']' => b'[',
            _ => b'{',
        };
        if self.frames.len() < 2 || self.frames.last().map(|f| f.open) != Some(expected) {
            return Err(self.error(self.pos, &format!("Unexpected token `{c}`")));
        }
        self.frames.pop();
        self.pos += 1;
        Ok(match c {
            ')' => TokenCategory::RParen,
            ']' => TokenCategory::RBracket,
            _ => TokenCategory::RBrace,
        })
    }

    fn question(&mut self) -> TokenCategory {
        let rest = &self.source[self.pos..];
        if rest.starts_with("??") {
            self.pos += if rest.starts_with("??=") { 3 } else { 2 };
            return TokenCategory::Binary;
        }
        if rest.starts_with("?.") && !self.peek_byte(2).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 2;
            return TokenCategory::Dot;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.pending_ternaries += 1;
        }
        self.pos += 1;
        TokenCategory::Question
    }

    fn colon(&mut self) -> TokenCategory {
        self.pos += 1;
        match self.frames.last_mut() {
            Some(frame) if frame.pending_ternaries > 0 => {
                frame.pending_ternaries -= 1;
                TokenCategory::TernaryColon
            }
            _ => TokenCategory::KeyColon,
        }
    }

    fn operator(&mut self) -> Result<TokenCategory, SubFormatError> {
        let rest = &self.source[self.pos..];
        let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
            let c = rest.chars().next().unwrap_or_default();
            return Err(self.error(self.pos, &format!("Unexpected character `{c}`")));
        };
        let operand_expected = self.operand_expected();
        self.pos += op.len();
        Ok(match *op {
            "++" | "--" if operand_expected => TokenCategory::Prefix,
            "++" | "--" => TokenCategory::Postfix,
            "!" if !operand_expected => TokenCategory::Postfix,
            "!" | "~" => TokenCategory::Prefix,
            "+" | "-" if operand_expected => TokenCategory::Prefix,
            _ => TokenCategory::Binary,
        })
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '$' | '#')
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}
