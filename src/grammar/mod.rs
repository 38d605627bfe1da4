//! # Grammar Model
//!
//! The immutable grammar loaded from a compiled table file.
//!
//! ## Overview
//!
//! A [`Grammar`] aggregates every table the engine consults at runtime:
//!
//! - **Symbols**: terminals and nonterminals, identified by table index
//! - **Character sets**: DFA edge labels
//! - **Productions**: grammar rules with head and handle
//! - **DFA states**: the tokenizer automaton
//! - **LALR states**: the parser automaton
//! - **Groups**: lexical sub-languages (comments, strings)
//! - **Properties**: grammar metadata (name, author, ...)
//!
//! All cross-references between tables are stored as indices, never
//! pointers: groups are never mutated or freed independently of the whole
//! grammar, so an index is the honest representation of those links.
//!
//! A grammar never changes after [`Grammar::load_from_path`] (or one of its
//! siblings) returns. Wrap it in an [`Arc`](std::sync::Arc) to run several
//! parsers against the same tables concurrently; all per-parse mutable
//! state lives in [`Parser`](crate::parser::Parser).

pub mod charset;
pub mod dfa;
pub mod group;
mod loader;
pub mod lr;
pub mod production;
pub mod properties;
pub mod symbol;

pub use charset::{CharacterRange, CharacterSet};
pub use dfa::{DfaEdge, DfaState};
pub use group::{AdvanceMode, EndingMode, Group};
pub use lr::{LrAction, LrActionKind, LrState};
pub use production::Production;
pub use properties::GrammarProperties;
pub use symbol::{Symbol, SymbolKind};

use std::fmt;
use std::io::Read;
use std::path::Path;

use compact_str::CompactString;

use crate::egt::EgtReader;
use crate::error::LoadError;

/// The static, immutable grammar model.
///
/// Constructed only by the loader; every table is fully populated and every
/// cross-table index verified, so the indexing accessors below cannot fail
/// for indices obtained from this grammar's own tokens and reductions.
pub struct Grammar {
    properties: GrammarProperties,
    symbols: Vec<Symbol>,
    charsets: Vec<CharacterSet>,
    productions: Vec<Production>,
    dfa_states: Vec<DfaState>,
    lr_states: Vec<LrState>,
    groups: Vec<Group>,
    dfa_initial: usize,
    lr_initial: usize,
    /// First symbol of kind `End`, cached for the lexer.
    end_symbol: usize,
    /// First symbol of kind `Error`, cached for the lexer.
    error_symbol: usize,
    symbols_by_name: hashbrown::HashMap<CompactString, usize, ahash::RandomState>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.properties.name())
            .field("symbols", &self.symbols.len())
            .field("productions", &self.productions.len())
            .field("dfa_states", &self.dfa_states.len())
            .field("lr_states", &self.lr_states.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

impl Grammar {
    /// Load a grammar from a table file on disk.
    ///
    /// # Errors
    ///
    /// Any I/O failure or malformation of the table aborts the load; see
    /// [`LoadError`].
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        loader::load(&mut EgtReader::from_path(path)?)
    }

    /// Load a grammar from an open byte stream.
    ///
    /// # Errors
    ///
    /// Any I/O failure or malformation of the table aborts the load.
    pub fn load_from_reader(reader: impl Read) -> Result<Self, LoadError> {
        loader::load(&mut EgtReader::from_reader(reader)?)
    }

    /// Load a grammar from a table already held in memory.
    ///
    /// # Errors
    ///
    /// Any malformation of the table aborts the load.
    pub fn load_from_bytes(data: Vec<u8>) -> Result<Self, LoadError> {
        loader::load(&mut EgtReader::from_bytes(data)?)
    }

    /// Grammar metadata from the table file's property records.
    #[must_use]
    pub const fn properties(&self) -> &GrammarProperties {
        &self.properties
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn symbol(&self, index: usize) -> &Symbol {
        &self.symbols[index]
    }

    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    #[must_use]
    pub fn charsets(&self) -> &[CharacterSet] {
        &self.charsets
    }

    #[must_use]
    pub fn dfa_states(&self) -> &[DfaState] {
        &self.dfa_states
    }

    #[must_use]
    pub fn dfa_state(&self, index: usize) -> &DfaState {
        &self.dfa_states[index]
    }

    #[must_use]
    pub fn lr_states(&self) -> &[LrState] {
        &self.lr_states
    }

    #[must_use]
    pub fn lr_state(&self, index: usize) -> &LrState {
        &self.lr_states[index]
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, index: usize) -> &Group {
        &self.groups[index]
    }

    /// Initial state of the tokenizer DFA.
    #[must_use]
    pub const fn dfa_initial(&self) -> usize {
        self.dfa_initial
    }

    /// Initial state of the LALR machine.
    #[must_use]
    pub const fn lr_initial(&self) -> usize {
        self.lr_initial
    }

    /// The end-of-input symbol's table index.
    #[must_use]
    pub const fn end_symbol(&self) -> usize {
        self.end_symbol
    }

    /// The lexical-error symbol's table index.
    #[must_use]
    pub const fn error_symbol(&self) -> usize {
        self.error_symbol
    }

    /// Look up a symbol by its grammar name.
    #[must_use]
    pub fn symbol_by_name(&self, name: &str) -> Option<usize> {
        self.symbols_by_name.get(name).copied()
    }

    /// Whether the production's handle is exactly one nonterminal, which
    /// makes it a candidate for reduction trimming.
    #[must_use]
    pub fn is_single_nonterminal(&self, production: &Production) -> bool {
        match production.handle() {
            [only] => self.symbol(*only).kind() == SymbolKind::Nonterminal,
            _ => false,
        }
    }

    /// Render a production in BNF: `<Head> ::= <A> '+' <B>`.
    #[must_use]
    pub fn production_text(&self, index: usize) -> String {
        let production = self.production(index);
        let head = self.symbol(production.head());
        let handle = self.symbol_list_text(production.handle(), " ", false);
        format!("{} ::= {handle}", head.bnf_text(false))
    }

    /// Render a list of symbols in BNF, for expected-symbol diagnostics.
    #[must_use]
    pub fn symbol_list_text(
        &self,
        indices: &[usize],
        separator: &str,
        always_delimit_terminals: bool,
    ) -> String {
        let mut out = String::new();
        for (n, &index) in indices.iter().enumerate() {
            if n > 0 {
                out.push_str(separator);
            }
            out.push_str(&self.symbol(index).bnf_text(always_delimit_terminals));
        }
        out
    }

    /// First symbol of the given kind, in table order.
    #[must_use]
    pub fn first_of_kind(&self, kind: SymbolKind) -> Option<usize> {
        self.symbols.iter().position(|s| s.kind() == kind)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        properties: GrammarProperties,
        symbols: Vec<Symbol>,
        charsets: Vec<CharacterSet>,
        productions: Vec<Production>,
        dfa_states: Vec<DfaState>,
        lr_states: Vec<LrState>,
        groups: Vec<Group>,
        dfa_initial: usize,
        lr_initial: usize,
    ) -> Result<Self, LoadError> {
        let end_symbol = symbols
            .iter()
            .position(|s| s.kind() == SymbolKind::End)
            .ok_or(LoadError::MissingSymbolKind(SymbolKind::End))?;
        let error_symbol = symbols
            .iter()
            .position(|s| s.kind() == SymbolKind::Error)
            .ok_or(LoadError::MissingSymbolKind(SymbolKind::Error))?;

        let symbols_by_name = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (CompactString::from(s.name()), i))
            .collect();

        Ok(Self {
            properties,
            symbols,
            charsets,
            productions,
            dfa_states,
            lr_states,
            groups,
            dfa_initial,
            lr_initial,
            end_symbol,
            error_symbol,
            symbols_by_name,
        })
    }
}
