//! # EGT Format Reader
//!
//! Record-oriented reader for the GOLD Parser "Enhanced Grammar Table"
//! (EGT, version 5.0) binary format.
//!
//! ## Format
//!
//! An EGT file is a UTF-16LE zero-terminated header string followed by a
//! sequence of *records*. Each record starts with the marker byte `'M'`
//! (0x4D) and a little-endian `u16` entry count, followed by that many
//! *entries*. An entry is a one-byte type tag and a type-specific payload:
//!
//! | tag   | kind    | payload                                 |
//! |-------|---------|-----------------------------------------|
//! | `'E'` | Empty   | none                                    |
//! | `'I'` | UInt16  | 2 bytes, little-endian                  |
//! | `'S'` | String  | UTF-16LE code units to a zero terminator|
//! | `'B'` | Boolean | 1 byte, 0 or 1                          |
//! | `'b'` | Byte    | 1 byte                                  |
//!
//! Any other tag decodes as an [`Entry::Error`]; the typed getters then
//! fail with a type mismatch, which aborts loading.
//!
//! The first entry of every record is a [`Byte`](Entry::Byte) holding the
//! record type ([`RecordKind`]); the grammar loader dispatches on it.

pub mod reader;

pub use reader::{Entry, EntryKind, EgtReader};

/// Record types dispatched by the grammar loader.
///
/// The discriminants are the literal tag bytes stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordKind {
    /// `'p'` - grammar property (index, name, value)
    Property = b'p',
    /// `'t'` - table counts, used to pre-allocate every table
    TableCounts = b't',
    /// `'I'` - DFA and LALR initial states
    InitialStates = b'I',
    /// `'S'` - one symbol
    Symbol = b'S',
    /// `'g'` - one lexical group
    Group = b'g',
    /// `'c'` - one character set as a list of ranges
    CharRanges = b'c',
    /// `'R'` - one production ("rule")
    Production = b'R',
    /// `'D'` - one DFA state with its edges
    DfaState = b'D',
    /// `'L'` - one LALR state with its actions
    LrState = b'L',
}

impl RecordKind {
    /// Map a record tag byte to its kind, `None` for unrecognized tags.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'p' => Some(Self::Property),
            b't' => Some(Self::TableCounts),
            b'I' => Some(Self::InitialStates),
            b'S' => Some(Self::Symbol),
            b'g' => Some(Self::Group),
            b'c' => Some(Self::CharRanges),
            b'R' => Some(Self::Production),
            b'D' => Some(Self::DfaState),
            b'L' => Some(Self::LrState),
            _ => None,
        }
    }
}
