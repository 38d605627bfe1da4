use std::fmt;

use compact_str::CompactString;

use crate::error::LoadError;

/// Classification of a grammar symbol.
///
/// The discriminants are fixed by the table format. Value 6 was a deprecated
/// kind (line comments, folded into groups in format v5.0) and is rejected
/// by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum SymbolKind {
    /// Rule symbol; produced only by reductions.
    Nonterminal = 0,
    /// Terminal passed to the parser.
    Content = 1,
    /// Terminal recognized by the lexer but ignored by the parser.
    Noise = 2,
    /// End of input.
    End = 3,
    /// Opens a lexical group.
    GroupStart = 4,
    /// Closes a lexical group.
    GroupEnd = 5,
    /// Emitted by the lexer when no symbol matches.
    Error = 7,
}

impl SymbolKind {
    /// Decode the on-disk kind value.
    ///
    /// # Errors
    ///
    /// Fails for values outside the enum (including the deprecated 6).
    pub const fn from_table_value(value: u16) -> Result<Self, LoadError> {
        match value {
            0 => Ok(Self::Nonterminal),
            1 => Ok(Self::Content),
            2 => Ok(Self::Noise),
            3 => Ok(Self::End),
            4 => Ok(Self::GroupStart),
            5 => Ok(Self::GroupEnd),
            7 => Ok(Self::Error),
            other => Err(LoadError::InvalidEnumValue {
                what: "symbol kind",
                value: other,
            }),
        }
    }
}

/// A grammar terminal or nonterminal.
///
/// Symbols are immutable once loaded. Identity is the table index, not value
/// equality: two grammars may both define a `Number` symbol, but tokens only
/// ever refer to symbols of the grammar that produced them.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: CompactString,
    kind: SymbolKind,
    index: u16,
    /// Index of the lexical group this symbol delimits or contains, if any.
    /// Back-filled while group records load.
    pub(crate) group: Option<usize>,
}

impl Symbol {
    pub(crate) fn new(name: impl Into<CompactString>, kind: SymbolKind, index: u16) -> Self {
        Self {
            name: name.into(),
            kind,
            index,
            group: None,
        }
    }

    /// The symbol's name as written in the grammar.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Stable index of this symbol in the grammar's symbol table.
    #[must_use]
    pub const fn table_index(&self) -> u16 {
        self.index
    }

    /// Index of the group this symbol starts, ends, or contains.
    #[must_use]
    pub const fn group(&self) -> Option<usize> {
        self.group
    }

    /// BNF rendering of the symbol: `<Name>` for nonterminals, the quoted
    /// literal form for content terminals, `(Name)` for the special kinds.
    #[must_use]
    pub fn bnf_text(&self, always_delimit_terminals: bool) -> String {
        match self.kind {
            SymbolKind::Nonterminal => format!("<{}>", self.name),
            SymbolKind::Content => literal_format(&self.name, always_delimit_terminals),
            _ => format!("({})", self.name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bnf_text(false))
    }
}

/// Quote a terminal literal unless it reads as a bare word.
///
/// A name consisting solely of letters, `.`, `_`, and `-` needs no
/// delimiters; anything else is wrapped in single quotes. A lone `'` becomes
/// `''`.
fn literal_format(source: &str, force_delimit: bool) -> String {
    if source == "'" {
        return "''".to_string();
    }

    let needs_quotes = force_delimit
        || source
            .chars()
            .any(|ch| !(ch.is_alphabetic() || ch == '.' || ch == '_' || ch == '-'));

    if needs_quotes {
        format!("'{source}'")
    } else {
        source.to_string()
    }
}
