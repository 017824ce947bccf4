/// A byte cursor over document text.
///
/// Positions only advance by whole bytes; callers slice the text only at
/// ASCII delimiters, which are always char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Byte offset of the cursor in the text.
    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The unconsumed text. Only valid when the cursor sits on a char boundary.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Slices the text between two local indices.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.s.get(start..end).unwrap_or("")
    }

    /// Advances past the current char.
    pub fn bump_char(&mut self) {
        let width = self.rest().chars().next().map_or(1, char::len_utf8);
        self.i += width;
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}
