use memchr::{memchr_iter, memrchr};
use std::fmt::{self, Display};

/// A 1-based line and column in the logical input.
///
/// Columns count bytes, not characters. A line feed moves to the first
/// column of the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[inline]
    pub(crate) fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub(crate) fn advance_over(&mut self, bytes: &[u8]) {
        match memrchr(b'\n', bytes) {
            Some(last_newline) => {
                self.line += memchr_iter(b'\n', bytes).count();
                self.column = bytes.len() - last_newline;
            }
            None => self.column += bytes.len(),
        }
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}
