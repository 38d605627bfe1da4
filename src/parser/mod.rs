//! # LALR(1) Parser
//!
//! The table-driven LALR(1) driver and the step-wise engine facade.
//!
//! ## Overview
//!
//! [`Parser::parse`] performs exactly one unit of work per call and reports
//! it as a [`ParseMessage`]: a token scanned, a production reduced, the
//! input accepted, or one of four error conditions. Between calls the host
//! can read the current token, inspect or tag the current reduction, query
//! the source position, or - after a syntax error - ask which symbols would
//! have been accepted.
//!
//! The driver keeps an explicit operand stack of tokens, each tagged with
//! the LALR state it was pushed under, and an input queue that supports
//! push-back (a scanned token is reported to the host before the state
//! machine consumes it). Reductions roll the right-hand side of a
//! production into a [`Reduction`], which nests inside its parent's tokens
//! until the root surfaces at accept.
//!
//! ## Reduction trimming
//!
//! With [`Parser::set_trim_reductions`] enabled, productions whose handle
//! is a single nonterminal are elided: the operand is re-tagged in place
//! and no reduction event fires. The resulting tree differs only by those
//! chain nodes; leaf tokens and all other reductions are identical.

pub(crate) mod driver;
pub mod engine;
pub mod token;

pub use engine::{ParseMessage, Parser};
pub use token::{Reduction, Token, TokenData};
