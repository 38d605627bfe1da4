//! # DFA Lexer
//!
//! Tokenization driven by the grammar's compiled DFA tables.
//!
//! ## Overview
//!
//! The scanner pulls characters from a pluggable [`CharSource`] into a
//! lookahead buffer and walks the DFA with maximal-munch matching: the
//! longest accepted prefix always wins, so lexing `<=` against rules for
//! `<` and `<=` yields one `<=` token. Characters are consumed - and the
//! line/column [`Position`] advanced - only once a token is finalized.
//!
//! Lexical *groups* (block comments, strings, line comments) are handled
//! with a stack of open groups: while a group is open the scanner
//! accumulates text instead of emitting tokens, honoring each group's
//! advance mode (whole tokens vs. single characters), ending mode (is the
//! closing delimiter part of the text?), and nesting rules. A closed group
//! collapses into a single token carrying the group's container symbol.
//!
//! The scanner itself is internal; hosts interact with it through
//! [`Parser`](crate::parser::Parser), which reports each scanned token
//! before the LALR machine consumes it.

pub mod position;
pub mod scanner;
pub mod source;

pub use position::Position;
pub use scanner::RawToken;
pub use source::{CharSource, IterSource, StringSource};

pub(crate) use scanner::Scanner;
