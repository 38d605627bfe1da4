//! # Error Types
//!
//! Load-time error types for the table reader and grammar loader.
//!
//! Parse-time conditions (lexical errors, syntax errors, runaway groups) are
//! deliberately *not* represented here: the engine reports them as
//! [`ParseMessage`](crate::parser::ParseMessage) values from
//! [`Parser::parse`](crate::parser::Parser::parse), so the host can decide
//! whether to recover, abort, or keep stepping. Only malformed table files
//! and I/O failures are hard errors.
//!
//! When the `diagnostics` feature is enabled, errors derive
//! [`miette::Diagnostic`] for rich reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

use crate::egt::EntryKind;

/// An error produced while loading a compiled grammar table.
///
/// Any of these leaves the parser without usable tables: subsequent calls to
/// [`Parser::parse`](crate::parser::Parser::parse) return
/// [`ParseMessage::NotLoaded`](crate::parser::ParseMessage::NotLoaded) until
/// a later load succeeds.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum LoadError {
    #[error("I/O error reading grammar table: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::io)))]
    Io(#[from] std::io::Error),

    #[error("unexpected end of table file at offset {offset}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::truncated)))]
    UnexpectedEof { offset: usize },

    #[error("type mismatch at offset {offset}: expected {expected:?} entry, found {found:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::type_mismatch)))]
    TypeMismatch {
        expected: EntryKind,
        found: EntryKind,
        offset: usize,
    },

    #[error("string entry at offset {offset} is not valid UTF-16")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::bad_string)))]
    InvalidString { offset: usize },

    #[error("unknown record type {tag:#04x}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::unknown_record)))]
    UnknownRecord { tag: u8 },

    #[error("{table} index {index} is out of range (table size {len})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::bad_index)))]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{table} entry {index} referenced before it was loaded")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::forward_ref)))]
    UnresolvedReference { table: &'static str, index: usize },

    #[error("{table} entry {index} missing after load completed")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::hole)))]
    MissingEntry { table: &'static str, index: usize },

    #[error("production {index} head is not a nonterminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::bad_head)))]
    InvalidProductionHead { index: usize },

    #[error("invalid {what} value {value} in table file")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::bad_enum)))]
    InvalidEnumValue { what: &'static str, value: u16 },

    #[error("grammar defines no symbol of kind {0:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(aurum::load::missing_symbol)))]
    MissingSymbolKind(crate::grammar::SymbolKind),
}
