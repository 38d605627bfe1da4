use compact_str::CompactString;

use crate::grammar::{AdvanceMode, EndingMode, Grammar, Group, SymbolKind};

use super::position::Position;
use super::source::CharSource;

/// A token as produced by the scanner, before the parser wraps it: the
/// matched symbol, its lexeme, and a snapshot of the position where it
/// started.
#[derive(Debug, Clone)]
pub struct RawToken {
    pub symbol: usize,
    pub text: CompactString,
    pub position: Position,
}

/// The tokenizer: a DFA walk over a lookahead buffer plus the lexical-group
/// stack.
///
/// All state here is per-parse and reset by [`Scanner::reset`]; the grammar
/// tables are passed in by reference on every call, so one grammar can back
/// any number of scanners.
pub(crate) struct Scanner {
    source: Option<Box<dyn CharSource>>,
    /// Characters read from the source but not yet consumed.
    buffer: Vec<char>,
    /// Advanced only as characters are consumed.
    position: Position,
    /// Open lexical groups, innermost last.
    group_stack: Vec<RawToken>,
}

impl Scanner {
    pub(crate) fn new() -> Self {
        Self {
            source: None,
            buffer: Vec::new(),
            position: Position::default(),
            group_stack: Vec::new(),
        }
    }

    pub(crate) fn attach(&mut self, source: Box<dyn CharSource>) {
        self.reset();
        self.source = Some(source);
    }

    /// Drop the current source, releasing whatever it holds.
    pub(crate) fn close(&mut self) {
        self.source = None;
    }

    /// Clear per-parse state. The source, if any, stays attached; restarting
    /// and re-attaching are separate concerns.
    pub(crate) fn reset(&mut self) {
        self.buffer.clear();
        self.position = Position::default();
        self.group_stack.clear();
    }

    /// Number of lexical groups currently open.
    pub(crate) fn open_groups(&self) -> usize {
        self.group_stack.len()
    }

    /// Character at the 1-based index into the lookahead buffer, reading
    /// more from the source on demand. `None` past the end of input.
    fn lookahead(&mut self, index: usize) -> Option<char> {
        while self.buffer.len() < index {
            let ch = self.source.as_mut().and_then(|s| s.next_char())?;
            self.buffer.push(ch);
        }
        self.buffer.get(index - 1).copied()
    }

    /// First `count` buffered characters, without consuming them.
    fn lookahead_text(&self, count: usize) -> CompactString {
        self.buffer[..count.min(self.buffer.len())].iter().collect()
    }

    /// Remove `count` characters from the front of the buffer, advancing the
    /// line/column counters over each one.
    fn consume(&mut self, count: usize) {
        let count = count.min(self.buffer.len());
        for ch in self.buffer.drain(..count) {
            self.position.advance(ch);
        }
    }

    /// Match one raw token at the front of the buffer: the DFA walk.
    ///
    /// Maximal munch: every time an accepting state is entered the accepted
    /// length is recorded, and scanning continues until no edge matches, so
    /// the longest accepted prefix wins. Nothing is consumed here; group
    /// handling in [`Scanner::read_token`] decides what to consume.
    fn next_raw_token(&mut self, grammar: &Grammar) -> RawToken {
        let position = self.position;

        if self.lookahead(1).is_none() {
            // End of input.
            return RawToken {
                symbol: grammar.end_symbol(),
                text: CompactString::default(),
                position,
            };
        }

        let mut state = grammar.dfa_initial();
        let mut index = 1;
        let mut last_accept: Option<(usize, usize)> = None; // (symbol, length)

        while let Some(ch) = self.lookahead(index) {
            let Some(target) = grammar.dfa_state(state).find_target(ch, grammar.charsets())
            else {
                break;
            };
            if let Some(accept) = grammar.dfa_state(target).accept() {
                last_accept = Some((accept, index));
            }
            state = target;
            index += 1;
        }

        match last_accept {
            Some((symbol, length)) => RawToken {
                symbol,
                text: self.lookahead_text(length),
                position,
            },
            // Nothing ever accepted: emit the single offending character
            // under the error symbol.
            None => RawToken {
                symbol: grammar.error_symbol(),
                text: self.lookahead_text(1),
                position,
            },
        }
    }

    /// Produce the next complete token, folding lexical groups.
    ///
    /// Loops over raw DFA tokens until something structurally significant
    /// appears: a plain token outside any group, a closed group collapsed
    /// into its container symbol, or end of input (returned as-is even
    /// inside a group - the parser recognizes that as a runaway group).
    pub(crate) fn read_token(&mut self, grammar: &Grammar) -> RawToken {
        loop {
            let read = self.next_raw_token(grammar);
            let read_kind = grammar.symbol(read.symbol).kind();
            let read_len = char_len(&read.text);

            let nest_group = read_kind == SymbolKind::GroupStart
                && match self.top_group(grammar) {
                    None => true,
                    Some(top) => grammar
                        .symbol(read.symbol)
                        .group()
                        .is_some_and(|g| top.allows_nesting(g)),
                };

            if nest_group {
                // Begin accumulating a (possibly nested) group.
                self.consume(read_len);
                self.group_stack.push(read);
            } else if self.group_stack.is_empty() {
                // Ordinary token, ready for the parser.
                self.consume(read_len);
                return read;
            } else if self.innermost_end_symbol(grammar) == Some(read.symbol) {
                // The innermost group just closed. The stack cannot be empty
                // here, or there would have been no end symbol to match.
                let Some(mut popped) = self.group_stack.pop() else {
                    return read;
                };
                let group = grammar
                    .symbol(popped.symbol)
                    .group()
                    .map(|g| grammar.group(g));

                if group.is_some_and(|g| g.ending() == EndingMode::Closed) {
                    // The delimiter belongs to the group text.
                    popped.text.push_str(&read.text);
                    self.consume(read_len);
                }

                if self.group_stack.is_empty() {
                    // Out of all groups: the accumulated text becomes one
                    // token carrying the container symbol.
                    if let Some(group) = group {
                        popped.symbol = group.container();
                    }
                    return popped;
                }
                // Still nested: fold the text outward.
                if let Some(outer) = self.group_stack.last_mut() {
                    outer.text.push_str(&popped.text);
                }
            } else if read_kind == SymbolKind::End {
                // EOF stops the loop unconditionally; the parser flags the
                // still-open group as a runaway.
                return read;
            } else {
                // Ordinary content inside an open group.
                let advance = self
                    .top_group(grammar)
                    .map_or(AdvanceMode::Character, Group::advance);
                if let Some(top) = self.group_stack.last_mut() {
                    match advance {
                        AdvanceMode::Token => {
                            top.text.push_str(&read.text);
                            self.consume(read_len);
                        }
                        AdvanceMode::Character => {
                            if let Some(ch) = read.text.chars().next() {
                                top.text.push(ch);
                            }
                            self.consume(1);
                        }
                    }
                }
            }
        }
    }

    /// The group owning the top of the group stack, if any.
    fn top_group<'g>(&self, grammar: &'g Grammar) -> Option<&'g Group> {
        let top = self.group_stack.last()?;
        let group = grammar.symbol(top.symbol).group()?;
        Some(grammar.group(group))
    }

    /// End symbol of the innermost open group.
    fn innermost_end_symbol(&self, grammar: &Grammar) -> Option<usize> {
        self.top_group(grammar).map(Group::end)
    }
}

fn char_len(text: &CompactString) -> usize {
    text.chars().count()
}
