//! The LALR(1) step: one shift/reduce/goto/accept decision per call.

use std::collections::VecDeque;

use crate::grammar::{Grammar, LrActionKind, SymbolKind};
use crate::lexer::Position;

use super::token::{Reduction, Token};

/// Per-parse mutable parser state, reset by `Parser::restart`.
pub(crate) struct ParseState<P> {
    /// Current LALR state index.
    pub current_state: usize,
    /// Operand stack of partially-reduced tokens.
    pub stack: Vec<Token<P>>,
    /// Pending input tokens. Front is analyzed next; push-front allows
    /// reprocessing after control returns to the caller.
    pub input: VecDeque<Token<P>>,
    /// True while the top of the stack holds a reduction the host may
    /// inspect (after a reduce or accept).
    pub have_reduction: bool,
    /// Symbols with a defined action in the state that produced the last
    /// syntax error.
    pub expected: Vec<usize>,
    /// Position of the last token handed to the state machine.
    pub current_position: Position,
}

impl<P> ParseState<P> {
    pub(crate) const fn new() -> Self {
        Self {
            current_state: 0,
            stack: Vec::new(),
            input: VecDeque::new(),
            have_reduction: false,
            expected: Vec::new(),
            current_position: Position::new(0, 0),
        }
    }

    pub(crate) fn reset(&mut self, initial_state: usize) {
        self.current_state = initial_state;
        self.stack.clear();
        self.input.clear();
        self.have_reduction = false;
        self.expected.clear();
        self.current_position = Position::default();
    }
}

/// Outcome of one driver step. `Shift` and `ReduceEliminated` are internal
/// continuations; the facade loops on them without reporting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepResult {
    Accept,
    Shift,
    ReduceNormal,
    ReduceEliminated,
    SyntaxError,
    InternalError,
}

/// Analyze the token at the front of the input queue and perform a single
/// shift, reduce, or accept.
///
/// On `Shift` the token is consumed from the queue; on `SyntaxError` it is
/// left in place and `state.expected` is filled with the user-facing symbols
/// the current state could have handled. A missing goto after a reduce - or
/// an operand stack shorter than the handle being reduced - is
/// `InternalError`: the tables are corrupt or mismatched, never an input
/// problem.
pub(crate) fn step<P>(grammar: &Grammar, state: &mut ParseState<P>, trim: bool) -> StepResult {
    let Some(front) = state.input.front() else {
        return StepResult::InternalError;
    };
    let front_symbol = front.symbol();

    let Some(action) = grammar
        .lr_state(state.current_state)
        .action_for(front_symbol)
        .copied()
    else {
        // No action: syntax error. Collect the symbols a user could actually
        // write; internal nonterminal actions are not expectations.
        state.expected.clear();
        for action in grammar.lr_state(state.current_state).actions() {
            match grammar.symbol(action.symbol).kind() {
                SymbolKind::Content
                | SymbolKind::End
                | SymbolKind::GroupStart
                | SymbolKind::GroupEnd => state.expected.push(action.symbol),
                _ => {}
            }
        }
        return StepResult::SyntaxError;
    };

    state.have_reduction = false;

    match action.kind {
        LrActionKind::Accept => {
            state.have_reduction = true;
            StepResult::Accept
        }
        LrActionKind::Shift => {
            state.current_state = usize::from(action.target);
            let Some(mut token) = state.input.pop_front() else {
                return StepResult::InternalError;
            };
            token.state = state.current_state;
            state.stack.push(token);
            StepResult::Shift
        }
        LrActionKind::Reduce => {
            let production = grammar.production(usize::from(action.target));

            let (mut head, result) = if trim && grammar.is_single_nonterminal(production) {
                // Unit production: re-tag the single operand as the head
                // instead of wrapping it in a one-slot reduction. Invisible
                // to the host.
                let Some(mut head) = state.stack.pop() else {
                    return StepResult::InternalError;
                };
                head.retag(production.head());
                (head, StepResult::ReduceEliminated)
            } else {
                let count = production.handle().len();
                if state.stack.len() < count {
                    return StepResult::InternalError;
                }
                // split_off keeps the popped tokens in handle order.
                let tokens = state.stack.split_off(state.stack.len() - count);
                let reduction = Reduction::new(usize::from(production.table_index()), tokens);
                state.have_reduction = true;
                (
                    Token::reduced(production.head(), reduction),
                    StepResult::ReduceNormal,
                )
            };

            // Goto on the newly exposed state. Absence here means the tables
            // are inconsistent with themselves.
            let Some(goto) = state
                .stack
                .last()
                .and_then(|top| grammar.lr_state(top.state).action_for(production.head()))
            else {
                return StepResult::InternalError;
            };

            state.current_state = usize::from(goto.target);
            head.state = state.current_state;
            state.stack.push(head);
            result
        }
        // A goto or explicit error action keyed by an input token never
        // occurs in well-formed tables.
        LrActionKind::Goto | LrActionKind::Error => StepResult::InternalError,
    }
}
