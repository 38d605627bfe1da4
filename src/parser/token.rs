use compact_str::CompactString;

use crate::lexer::{Position, RawToken};

/// What a token carries: its raw lexeme while it comes from the lexer, or a
/// nested [`Reduction`] once the parser has rolled a rule up into it.
///
/// The payload parameter `P` is the host's annotation type; the engine never
/// inspects it, it only moves it around inside reductions.
#[derive(Debug, Clone)]
pub enum TokenData<P> {
    /// Raw lexeme text.
    Text(CompactString),
    /// A reduced production; its tag slot holds the host's payload.
    Reduction(Box<Reduction<P>>),
}

/// An individual piece of input: a symbol occurrence.
///
/// Where a [`Symbol`](crate::grammar::Symbol) is a *class* of terminals or
/// nonterminals, a token is one concrete instance, carrying the matched text
/// (or, after a reduction, a subtree), the LALR state it was pushed under,
/// and the position where it started. Positions are snapshots; mutating the
/// parser later never changes a token already handed out.
#[derive(Debug, Clone)]
pub struct Token<P> {
    symbol: usize,
    data: TokenData<P>,
    /// LALR state attached when this token is pushed on the operand stack.
    pub(crate) state: usize,
    position: Position,
}

impl<P> Token<P> {
    /// Create a lexeme token, e.g. to inject input into the parser's queue.
    #[must_use]
    pub fn new(symbol: usize, text: impl Into<CompactString>) -> Self {
        Self {
            symbol,
            data: TokenData::Text(text.into()),
            state: 0,
            position: Position::default(),
        }
    }

    /// Same, with an explicit source position.
    #[must_use]
    pub fn with_position(symbol: usize, text: impl Into<CompactString>, position: Position) -> Self {
        Self {
            symbol,
            data: TokenData::Text(text.into()),
            state: 0,
            position,
        }
    }

    pub(crate) fn from_raw(raw: RawToken) -> Self {
        Self {
            symbol: raw.symbol,
            data: TokenData::Text(raw.text),
            state: 0,
            position: raw.position,
        }
    }

    pub(crate) fn reduced(symbol: usize, reduction: Reduction<P>) -> Self {
        Self {
            symbol,
            data: TokenData::Reduction(Box::new(reduction)),
            state: 0,
            position: Position::default(),
        }
    }

    /// Table index of the symbol this token is an instance of.
    #[must_use]
    pub const fn symbol(&self) -> usize {
        self.symbol
    }

    pub(crate) const fn retag(&mut self, symbol: usize) {
        self.symbol = symbol;
    }

    #[must_use]
    pub const fn data(&self) -> &TokenData<P> {
        &self.data
    }

    #[must_use]
    pub fn data_mut(&mut self) -> &mut TokenData<P> {
        &mut self.data
    }

    /// Consume the token for its payload, e.g. when building a tree.
    #[must_use]
    pub fn into_data(self) -> TokenData<P> {
        self.data
    }

    /// The lexeme, if this token still is one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            TokenData::Text(text) => Some(text),
            TokenData::Reduction(_) => None,
        }
    }

    /// The nested reduction, once this token holds one.
    #[must_use]
    pub fn reduction(&self) -> Option<&Reduction<P>> {
        match &self.data {
            TokenData::Text(_) => None,
            TokenData::Reduction(r) => Some(r),
        }
    }

    #[must_use]
    pub fn reduction_mut(&mut self) -> Option<&mut Reduction<P>> {
        match &mut self.data {
            TokenData::Text(_) => None,
            TokenData::Reduction(r) => Some(r),
        }
    }

    /// LALR state this token was pushed under, 0 before any push.
    #[must_use]
    pub const fn state(&self) -> usize {
        self.state
    }

    /// Line/column where the token started, 0-based.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// The result of recognizing one production: its right-hand side rolled up
/// into a fixed-size list of tokens, one per handle slot.
///
/// A reduction is exposed to the host exactly once, right after the driver
/// builds it; afterwards it lives on as a nested [`TokenData::Reduction`]
/// inside its parent, until the root reduction surfaces at accept. The `tag`
/// is the host's slot: set it while handling the reduction and read it back
/// from the nested tokens of the parent reduction - payloads propagate
/// bottom-up to the root.
#[derive(Debug, Clone)]
pub struct Reduction<P> {
    production: usize,
    tokens: Vec<Token<P>>,
    tag: Option<P>,
}

impl<P> Reduction<P> {
    pub(crate) const fn new(production: usize, tokens: Vec<Token<P>>) -> Self {
        Self {
            production,
            tokens,
            tag: None,
        }
    }

    /// Table index of the production that fired. Hosts dispatch their
    /// reduction handling on this.
    #[must_use]
    pub const fn production(&self) -> usize {
        self.production
    }

    /// The tokens of the right-hand side, in handle order.
    #[must_use]
    pub fn tokens(&self) -> &[Token<P>] {
        &self.tokens
    }

    #[must_use]
    pub fn tokens_mut(&mut self) -> &mut [Token<P>] {
        &mut self.tokens
    }

    /// Consume the reduction for its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token<P>> {
        self.tokens
    }

    /// The host's annotation, if one was set.
    #[must_use]
    pub const fn tag(&self) -> Option<&P> {
        self.tag.as_ref()
    }

    /// Attach the host's annotation.
    pub fn set_tag(&mut self, tag: P) {
        self.tag = Some(tag);
    }

    /// Remove and return the annotation.
    pub fn take_tag(&mut self) -> Option<P> {
        self.tag.take()
    }
}
