//! Editable line, indexed by code point rather than byte.

use alloc::string::String;
use core::ops::Range;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    buf: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn get_byte_position(&self, char_index: usize) -> usize {
        self.buf
            .char_indices()
            .nth(char_index)
            .map_or(self.buf.len(), |(pos, _)| pos)
    }

    fn byte_range(&self, chars: Range<usize>) -> Range<usize> {
        self.get_byte_position(chars.start)..self.get_byte_position(chars.end)
    }

    /// Text between two code point offsets, clamped to the buffer.
    pub fn slice(&self, chars: Range<usize>) -> &str {
        &self.buf[self.byte_range(chars)]
    }

    pub fn truncate(&mut self) {
        self.buf.clear();
    }

    pub fn insert_char(&mut self, char_index: usize, c: char) {
        let pos = self.get_byte_position(char_index);
        self.buf.insert(pos, c);
    }

    pub fn insert_str(&mut self, char_index: usize, s: &str) {
        let pos = self.get_byte_position(char_index);
        self.buf.insert_str(pos, s);
    }

    /// Remove the code point at `char_index`, if there is one.
    pub fn delete(&mut self, char_index: usize) -> Option<char> {
        let pos = self.get_byte_position(char_index);

        if pos < self.buf.len() {
            Some(self.buf.remove(pos))
        } else {
            None
        }
    }

    /// Drop everything from `char_index` to the end.
    pub fn delete_after_char(&mut self, char_index: usize) {
        let pos = self.get_byte_position(char_index);
        self.buf.truncate(pos);
    }

    /// Drop everything before `char_index`.
    pub fn delete_before_char(&mut self, char_index: usize) {
        let pos = self.get_byte_position(char_index);
        self.buf.replace_range(..pos, "");
    }

    /// Replace the code points in `chars` with `s`.
    pub fn replace_range(&mut self, chars: Range<usize>, s: &str) {
        let range = self.byte_range(chars);
        self.buf.replace_range(range, s);
    }
}

impl From<&str> for LineBuffer {
    fn from(s: &str) -> Self {
        Self { buf: s.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer() {
        let mut buf = LineBuffer::new();

        buf.insert_str(0, "Hello, World!");

        assert_eq!(buf.as_str(), "Hello, World!");

        assert_eq!(buf.delete(12), Some('!'));

        assert_eq!(buf.as_str(), "Hello, World");

        assert_eq!(buf.delete(12), None);

        assert_eq!(buf.as_str(), "Hello, World");

        buf.delete(0);
        buf.insert_char(0, 'h');

        assert_eq!(buf.as_str(), "hello, World");

        buf.delete(2);
        buf.insert_char(2, 'L');

        assert_eq!(buf.as_str(), "heLlo, World");

        buf.delete_after_char(5);
        buf.insert_str(5, " æå");

        assert_eq!(buf.as_str(), "heLlo æå");
        assert_eq!(buf.len(), 8);

        buf.insert_char(7, 'ø');

        assert_eq!(buf.as_str(), "heLlo æøå");

        buf.delete(8);

        assert_eq!(buf.as_str(), "heLlo æø");

        buf.delete_before_char(6);

        assert_eq!(buf.as_str(), "æø");

        buf.truncate();

        assert!(buf.is_empty());
    }

    #[test]
    fn replace_range_counts_code_points() {
        let mut buf = LineBuffer::from("ls ~/æø");

        assert_eq!(buf.slice(3..7), "~/æø");

        buf.replace_range(5..7, "æøå/");

        assert_eq!(buf.as_str(), "ls ~/æøå/");
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn out_of_range_offsets_clamp() {
        let mut buf = LineBuffer::from("abc");

        assert_eq!(buf.slice(1..10), "bc");

        buf.insert_char(10, 'd');
        assert_eq!(buf.as_str(), "abcd");

        buf.delete_after_char(10);
        assert_eq!(buf.as_str(), "abcd");
    }
}
