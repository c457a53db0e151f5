//! Byte cursor over the markup source.
//!
//! Reading past the end yields `0`, which none of the parser's byte
//! predicates accept, so scanning loops terminate at EOF without extra
//! bounds checks in the caller.

use memchr::memmem;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// The caller guarantees `source.len()` fits in `u32`.
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: u32) {
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        self.source.get(self.pos as usize..).unwrap_or("")
    }

    pub(crate) fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    pub(crate) fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    pub(crate) fn eat_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Absolute offset of the next `needle` at or after the cursor.
    pub(crate) fn find(&self, needle: &str) -> Option<u32> {
        memmem::find(self.rest().as_bytes(), needle.as_bytes()).map(|i| self.pos + to_u32(i))
    }

    /// Absolute offset of the next `byte` at or after the cursor.
    pub(crate) fn find_byte(&self, byte: u8) -> Option<u32> {
        memchr::memchr(byte, self.rest().as_bytes()).map(|i| self.pos + to_u32(i))
    }

    /// Absolute offset of the next `a` or `b` at or after `from`.
    pub(crate) fn find_either(&self, from: u32, a: u8, b: u8) -> Option<u32> {
        let hay = self.source.as_bytes().get(from as usize..)?;
        memchr::memchr2(a, b, hay).map(|i| from + to_u32(i))
    }
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_zero_past_end() {
        let mut cursor = Cursor::new("ab");
        cursor.advance_n(2);
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn eat_while_stops_at_eof() {
        let mut cursor = Cursor::new("   ");
        cursor.eat_whitespace();
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn find_returns_absolute_offsets() {
        let mut cursor = Cursor::new("<a>x</a>");
        cursor.advance_n(3);
        assert_eq!(cursor.find("</a"), Some(4));
        assert_eq!(cursor.find_byte(b'>'), Some(7));
        assert_eq!(cursor.find_either(0, b'x', b'/'), Some(3));
        assert_eq!(cursor.slice_from(1), "a>");
    }
}
