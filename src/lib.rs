//! # Aurum
//!
//! A runtime engine for compiled grammar tables in the GOLD Parser EGT (v5.0)
//! binary format.
//!
//! ## Overview
//!
//! Aurum does not generate parsers. It loads a *precompiled* grammar table —
//! a binary file describing a DFA tokenizer and an LALR(1) state machine —
//! and uses it to tokenize and parse arbitrary input text, producing a parse
//! tree of [`Reduction`]s. Parsing is cooperative: each call to
//! [`Parser::parse`] performs exactly one unit of work (a token read, a
//! reduction, acceptance, or an error) and returns control to the caller,
//! which can inspect state between steps and annotate reductions with its
//! own payload type.
//!
//! - **Table loading**: [`Grammar`] is loaded once from a file or byte
//!   stream and is immutable afterwards; it can be shared between parser
//!   instances via `Arc`.
//! - **Tokenization**: a table-driven DFA with maximal-munch matching and
//!   nested lexical groups (block comments, strings).
//! - **Parsing**: a table-driven LALR(1) shift-reduce driver with an
//!   explicit operand stack, push-back input queue, optional unit-production
//!   trimming, and expected-symbol reporting on syntax errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aurum::{ParseMessage, Parser};
//!
//! # fn main() -> Result<(), aurum::LoadError> {
//! let mut parser: Parser = Parser::new();
//! parser.load_tables("grammar.egt")?;
//! parser.open_str("a = b + c");
//!
//! loop {
//!     match parser.parse() {
//!         ParseMessage::TokenRead => {
//!             // parser.current_token() is the token just scanned
//!         }
//!         ParseMessage::Reduction => {
//!             // parser.current_reduction() is the rule that fired
//!         }
//!         ParseMessage::Accept => break,
//!         message => panic!("parse failed: {message:?}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`egt`] - Record-oriented reader for the EGT binary format
//! - [`grammar`] - The immutable grammar model and its loader
//! - [`lexer`] - DFA tokenizer, character sources, position tracking
//! - [`parser`] - LALR(1) driver and the step-wise parser facade
//! - [`error`] - Load-time error types

pub mod egt;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use error::LoadError;
pub use grammar::{
    Grammar, GrammarProperties, Production, Symbol, SymbolKind,
};
pub use lexer::{CharSource, Position, StringSource};
pub use parser::{ParseMessage, Parser, Reduction, Token, TokenData};
