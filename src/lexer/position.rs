use std::fmt;

/// A 0-based line/column position in the source text.
///
/// Positions advance only when characters are *consumed* from the lookahead
/// buffer, never on lookahead alone. Tokens carry copies, not references, so
/// later movement of the live counters cannot bleed into tokens already
/// handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Advance over one consumed character. A line feed starts a new line
    /// and resets the column; a carriage return is ignored so both `\n` and
    /// `\r\n` line endings count once.
    pub const fn advance(&mut self, ch: char) {
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            '\r' => {}
            _ => self.column += 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based for humans
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}
