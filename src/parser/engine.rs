use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::LoadError;
use crate::grammar::{Grammar, GrammarProperties, Symbol, SymbolKind};
use crate::lexer::{CharSource, Position, Scanner, StringSource};

use super::driver::{self, ParseState, StepResult};
use super::token::{Reduction, Token, TokenData};

/// What one call to [`Parser::parse`] accomplished.
///
/// Exactly one of these is returned per call; the parser never loops to
/// completion internally, so the host can inspect state between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMessage {
    /// A token was scanned from the source. [`Parser::current_token`] holds
    /// it; it has not been consumed by the grammar yet.
    TokenRead,
    /// A production was reduced. [`Parser::current_reduction`] is valid
    /// until the next call.
    Reduction,
    /// The input conforms to the grammar; the root reduction is complete.
    Accept,
    /// Tables are not loaded; load them before parsing.
    NotLoaded,
    /// The tokenizer could not recognize a symbol.
    /// [`Parser::current_token`] holds the offending text; it stays queued
    /// until the host discards it.
    LexicalError,
    /// The queued token is not expected in the current state.
    /// [`Parser::expected_symbols`] lists what would have been accepted.
    SyntaxError,
    /// Input ended while a lexical group was still open.
    GroupError,
    /// The goto table is inconsistent: the grammar file is corrupt or
    /// mismatched with the engine. Always fatal.
    InternalError,
}

/// The parsing engine facade: loads tables, scans, and steps the LALR
/// machine one event at a time.
///
/// A parser is single-threaded and non-reentrant: one source, one parse at
/// a time, [`Parser::restart`] between independent runs. The type parameter
/// `P` is the host's payload attached to reductions via
/// [`Reduction::set_tag`]; it defaults to `()` for hosts that only want the
/// tree.
///
/// The grammar tables are immutable and shared: [`Parser::with_grammar`]
/// builds any number of parsers over one loaded [`Grammar`], each with its
/// own mutable state.
pub struct Parser<P = ()> {
    grammar: Option<Arc<Grammar>>,
    scanner: Scanner,
    state: ParseState<P>,
    trim_reductions: bool,
}

impl<P> Default for Parser<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Parser<P> {
    /// Create a parser with no tables loaded. Until a load succeeds,
    /// [`Parser::parse`] returns [`ParseMessage::NotLoaded`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: None,
            scanner: Scanner::new(),
            state: ParseState::new(),
            trim_reductions: false,
        }
    }

    /// Create a parser over an already-loaded grammar.
    #[must_use]
    pub fn with_grammar(grammar: Arc<Grammar>) -> Self {
        let mut parser = Self::new();
        parser.grammar = Some(grammar);
        parser.restart();
        parser
    }

    /// Load compiled tables from a file.
    ///
    /// # Errors
    ///
    /// On failure the parser keeps no partial tables: it reverts to the
    /// not-loaded state and the error describes the malformation.
    pub fn load_tables(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.install_tables(Grammar::load_from_path(path))
    }

    /// Load compiled tables from an open byte stream.
    ///
    /// # Errors
    ///
    /// As [`Parser::load_tables`].
    pub fn load_tables_from(&mut self, reader: impl Read) -> Result<(), LoadError> {
        self.install_tables(Grammar::load_from_reader(reader))
    }

    fn install_tables(&mut self, loaded: Result<Grammar, LoadError>) -> Result<(), LoadError> {
        match loaded {
            Ok(grammar) => {
                self.grammar = Some(Arc::new(grammar));
                self.restart();
                Ok(())
            }
            Err(err) => {
                self.grammar = None;
                self.restart();
                Err(err)
            }
        }
    }

    /// Whether tables are loaded and parsing can run.
    #[must_use]
    pub const fn tables_loaded(&self) -> bool {
        self.grammar.is_some()
    }

    /// The loaded grammar, if any.
    #[must_use]
    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_deref()
    }

    /// A shareable handle to the loaded grammar, for building sibling
    /// parsers over the same tables.
    #[must_use]
    pub fn grammar_handle(&self) -> Option<Arc<Grammar>> {
        self.grammar.clone()
    }

    /// Metadata of the loaded grammar.
    #[must_use]
    pub fn grammar_properties(&self) -> Option<&GrammarProperties> {
        self.grammar().map(Grammar::properties)
    }

    /// Drop the loaded tables and all parse state.
    pub fn clear(&mut self) {
        self.grammar = None;
        self.scanner.close();
        self.restart();
    }

    /// Reset all per-parse state, keeping the loaded tables. Call between
    /// independent parses; attach the next input with one of the `open`
    /// methods.
    pub fn restart(&mut self) {
        let initial = self.grammar.as_ref().map_or(0, |g| g.lr_initial());
        self.state.reset(initial);
        self.scanner.reset();
    }

    /// Attach a string as the parse source.
    pub fn open_str(&mut self, text: &str) {
        self.open_source(StringSource::new(text));
    }

    /// Attach an owned string as the parse source.
    pub fn open_string(&mut self, text: String) {
        self.open_source(StringSource::new(text));
    }

    /// Read a whole stream and attach it as the parse source.
    ///
    /// # Errors
    ///
    /// Fails if reading fails or the stream is not UTF-8; the parser state
    /// is untouched in that case.
    pub fn open_reader(&mut self, reader: impl Read) -> io::Result<()> {
        let source = StringSource::from_reader(reader)?;
        self.open_source(source);
        Ok(())
    }

    /// Attach any character source as the parse input.
    ///
    /// Resets per-parse state and seeds the operand stack with the start
    /// entry carrying the LALR initial state.
    pub fn open_source(&mut self, source: impl CharSource + 'static) {
        self.restart();
        self.scanner.attach(Box::new(source));

        // Stack bottom: only its state matters, but an inert token keeps the
        // stack homogeneous.
        if let Some(grammar) = &self.grammar {
            let mut start: Token<P> = Token::new(grammar.end_symbol(), "");
            start.state = grammar.lr_initial();
            self.state.stack.push(start);
        }
    }

    /// Detach and drop the current source.
    pub fn close(&mut self) {
        self.scanner.close();
    }

    /// Whether reductions over single-nonterminal productions are elided.
    #[must_use]
    pub const fn trim_reductions(&self) -> bool {
        self.trim_reductions
    }

    /// Enable or disable reduction trimming. Configure before parsing
    /// begins; flipping it mid-parse changes which chains are elided from
    /// that point on.
    pub fn set_trim_reductions(&mut self, trim: bool) {
        self.trim_reductions = trim;
    }

    /// Perform one parse action and report it.
    ///
    /// Call in a loop until [`ParseMessage::Accept`] or an error message.
    /// Noise tokens are discarded internally (they were already reported as
    /// [`ParseMessage::TokenRead`]); shifts and trimmed reductions also loop
    /// internally, so every return value is a meaningful event.
    pub fn parse(&mut self) -> ParseMessage {
        let Some(grammar) = self.grammar.clone() else {
            return ParseMessage::NotLoaded;
        };

        loop {
            if self.state.input.is_empty() {
                // Scan the next token and report it before analyzing it.
                let raw = self.scanner.read_token(&grammar);
                self.state.input.push_front(Token::from_raw(raw));
                return ParseMessage::TokenRead;
            }

            let (front_symbol, front_position) = match self.state.input.front() {
                Some(front) => (front.symbol(), front.position()),
                None => continue,
            };
            self.state.current_position = front_position;

            // A pending token with a still-open group means the source ran
            // out inside that group.
            if self.scanner.open_groups() != 0 {
                return ParseMessage::GroupError;
            }

            match grammar.symbol(front_symbol).kind() {
                SymbolKind::Noise => {
                    // Already reported; the grammar never sees it.
                    self.state.input.pop_front();
                }
                SymbolKind::Error => return ParseMessage::LexicalError,
                _ => match driver::step(&grammar, &mut self.state, self.trim_reductions) {
                    StepResult::Accept => return ParseMessage::Accept,
                    StepResult::ReduceNormal => return ParseMessage::Reduction,
                    StepResult::SyntaxError => return ParseMessage::SyntaxError,
                    StepResult::InternalError => return ParseMessage::InternalError,
                    // Consumed or elided; keep going until something is
                    // worth reporting.
                    StepResult::Shift | StepResult::ReduceEliminated => {}
                },
            }
        }
    }

    /// The token at the front of the input queue: the one just scanned
    /// after [`ParseMessage::TokenRead`], or the offender after a lexical or
    /// syntax error.
    #[must_use]
    pub fn current_token(&self) -> Option<&Token<P>> {
        self.state.input.front()
    }

    /// Remove and return the front of the input queue. The recovery hook
    /// for hosts that want to skip an unrecognized or unexpected token.
    pub fn discard_current_token(&mut self) -> Option<Token<P>> {
        self.state.input.pop_front()
    }

    /// Append a token to the end of the input queue.
    pub fn enqueue_input(&mut self, token: Token<P>) {
        self.state.input.push_back(token);
    }

    /// Push a token onto the front of the input queue; it is analyzed next.
    pub fn push_input(&mut self, token: Token<P>) {
        self.state.input.push_front(token);
    }

    /// The reduction made by the last [`ParseMessage::Reduction`] - or, at
    /// [`ParseMessage::Accept`], the root of the whole parse.
    #[must_use]
    pub fn current_reduction(&self) -> Option<&Reduction<P>> {
        if !self.state.have_reduction {
            return None;
        }
        self.state.stack.last().and_then(Token::reduction)
    }

    /// Mutable access to the current reduction, for setting its tag.
    pub fn current_reduction_mut(&mut self) -> Option<&mut Reduction<P>> {
        if !self.state.have_reduction {
            return None;
        }
        self.state.stack.last_mut().and_then(Token::reduction_mut)
    }

    /// Take the finished parse tree after [`ParseMessage::Accept`].
    pub fn take_result(&mut self) -> Option<Reduction<P>> {
        if !self.state.have_reduction || self.state.stack.last()?.reduction().is_none() {
            return None;
        }
        self.state.have_reduction = false;
        match self.state.stack.pop()?.into_data() {
            TokenData::Reduction(reduction) => Some(*reduction),
            TokenData::Text(_) => None,
        }
    }

    /// Position of the token most recently handed to the state machine,
    /// 0-based.
    #[must_use]
    pub const fn current_position(&self) -> Position {
        self.state.current_position
    }

    /// After [`ParseMessage::SyntaxError`]: the symbols the grammar could
    /// have accepted in the failing state.
    #[must_use]
    pub fn expected_symbols(&self) -> Vec<&Symbol> {
        match &self.grammar {
            Some(grammar) => self
                .state
                .expected
                .iter()
                .map(|&index| grammar.symbol(index))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Table indices of the expected symbols, for hosts that prefer raw
    /// indices.
    #[must_use]
    pub fn expected_symbol_indices(&self) -> &[usize] {
        &self.state.expected
    }
}
