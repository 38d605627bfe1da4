use compact_str::CompactString;

use crate::error::LoadError;

/// How a lexical group consumes input while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Append whole matched tokens to the group text.
    Token = 0,
    /// Append one raw character at a time. This is what makes block comments
    /// robust: text inside them does not need to lex cleanly.
    Character = 1,
}

/// Whether a group's terminating symbol belongs to the group text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingMode {
    /// The end delimiter is left in the input and lexed again afterwards
    /// (line comments: the newline is its own token).
    Open = 0,
    /// The end delimiter is consumed into the group text (block comments:
    /// `*/` is part of the comment).
    Closed = 1,
}

impl AdvanceMode {
    pub(crate) const fn from_table_value(value: u16) -> Result<Self, LoadError> {
        match value {
            0 => Ok(Self::Token),
            1 => Ok(Self::Character),
            other => Err(LoadError::InvalidEnumValue {
                what: "group advance mode",
                value: other,
            }),
        }
    }
}

impl EndingMode {
    pub(crate) const fn from_table_value(value: u16) -> Result<Self, LoadError> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            other => Err(LoadError::InvalidEnumValue {
                what: "group ending mode",
                value: other,
            }),
        }
    }
}

/// A lexical sub-language such as a block comment or string literal.
///
/// While a group is open the lexer accumulates text instead of emitting
/// tokens; once the group closes, the whole region collapses into a single
/// token carrying the `container` symbol. The start, end, and container
/// symbols link back to the group by index.
#[derive(Debug, Clone)]
pub struct Group {
    name: CompactString,
    container: usize,
    start: usize,
    end: usize,
    advance: AdvanceMode,
    ending: EndingMode,
    /// Indices of groups permitted to open inside this one.
    nesting: hashbrown::HashSet<usize, ahash::RandomState>,
}

impl Group {
    pub(crate) fn new(
        name: impl Into<CompactString>,
        container: usize,
        start: usize,
        end: usize,
        advance: AdvanceMode,
        ending: EndingMode,
        nesting: hashbrown::HashSet<usize, ahash::RandomState>,
    ) -> Self {
        Self {
            name: name.into(),
            container,
            start,
            end,
            advance,
            ending,
            nesting,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbol the whole group becomes once closed.
    #[must_use]
    pub const fn container(&self) -> usize {
        self.container
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub const fn advance(&self) -> AdvanceMode {
        self.advance
    }

    #[must_use]
    pub const fn ending(&self) -> EndingMode {
        self.ending
    }

    /// Whether the group with the given table index may nest inside this one.
    #[must_use]
    pub fn allows_nesting(&self, group_index: usize) -> bool {
        self.nesting.contains(&group_index)
    }
}
