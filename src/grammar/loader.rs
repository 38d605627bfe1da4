//! Materializes a [`Grammar`] from the EGT record stream.
//!
//! Tables are pre-allocated from the `TableCounts` record and filled by
//! index as records arrive, in whatever order the file stores them. The
//! format allows records to leave holes; here a hole remaining at the end
//! of the stream, a reference to a not-yet-loaded symbol, or any
//! out-of-range index is a [`LoadError`] instead of a latent crash.

use crate::egt::{EgtReader, RecordKind};
use crate::error::LoadError;

use super::charset::{CharacterRange, CharacterSet};
use super::dfa::{DfaEdge, DfaState};
use super::group::{AdvanceMode, EndingMode, Group};
use super::lr::{LrAction, LrActionKind, LrState};
use super::production::Production;
use super::properties::GrammarProperties;
use super::symbol::{Symbol, SymbolKind};
use super::Grammar;

/// Read every record of the table stream and assemble the grammar.
pub(crate) fn load(egt: &mut EgtReader) -> Result<Grammar, LoadError> {
    let mut builder = GrammarBuilder::default();

    while !egt.end_of_file() {
        if !egt.next_record()? {
            break;
        }

        let tag = egt.read_byte()?;
        match RecordKind::from_tag(tag) {
            Some(RecordKind::Property) => builder.read_property(egt)?,
            Some(RecordKind::TableCounts) => builder.read_table_counts(egt)?,
            Some(RecordKind::InitialStates) => builder.read_initial_states(egt)?,
            Some(RecordKind::Symbol) => builder.read_symbol(egt)?,
            Some(RecordKind::Group) => builder.read_group(egt)?,
            Some(RecordKind::CharRanges) => builder.read_char_ranges(egt)?,
            Some(RecordKind::Production) => builder.read_production(egt)?,
            Some(RecordKind::DfaState) => builder.read_dfa_state(egt)?,
            Some(RecordKind::LrState) => builder.read_lr_state(egt)?,
            None => return Err(LoadError::UnknownRecord { tag }),
        }
    }

    builder.finish()
}

/// Accumulates partially-filled tables while records stream in.
#[derive(Default)]
struct GrammarBuilder {
    properties: GrammarProperties,
    symbols: Vec<Option<Symbol>>,
    charsets: Vec<Option<CharacterSet>>,
    productions: Vec<Option<Production>>,
    dfa_states: Vec<Option<DfaState>>,
    lr_states: Vec<Option<LrState>>,
    groups: Vec<Option<Group>>,
    dfa_initial: usize,
    lr_initial: usize,
}

impl GrammarBuilder {
    /// `p`: index, name (discarded), value.
    fn read_property(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let _name = egt.read_string()?;
        let value = egt.read_string()?;
        self.properties.set_value(usize::from(index), value);
        Ok(())
    }

    /// `t`: the six table sizes, in fixed order.
    fn read_table_counts(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        self.symbols = empty_table(egt.read_u16()?);
        self.charsets = empty_table(egt.read_u16()?);
        self.productions = empty_table(egt.read_u16()?);
        self.dfa_states = empty_table(egt.read_u16()?);
        self.lr_states = empty_table(egt.read_u16()?);
        self.groups = empty_table(egt.read_u16()?);
        Ok(())
    }

    /// `I`: DFA initial state, LALR initial state.
    fn read_initial_states(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        self.dfa_initial = usize::from(egt.read_u16()?);
        self.lr_initial = usize::from(egt.read_u16()?);
        Ok(())
    }

    /// `S`: index, name, kind.
    fn read_symbol(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let name = egt.read_string()?;
        let kind = SymbolKind::from_table_value(egt.read_u16()?)?;

        let slot = checked_slot(&mut self.symbols, index, "symbol")?;
        *slot = Some(Symbol::new(name, kind, index));
        Ok(())
    }

    /// `g`: index, name, container#, start#, end#, advance, ending,
    /// reserved, nested count, nested group indices.
    fn read_group(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let name = egt.read_string()?;
        let container = self.symbol_ref(egt.read_u16()?)?;
        let start = self.symbol_ref(egt.read_u16()?)?;
        let end = self.symbol_ref(egt.read_u16()?)?;
        let advance = AdvanceMode::from_table_value(egt.read_u16()?)?;
        let ending = EndingMode::from_table_value(egt.read_u16()?)?;
        egt.read_entry()?; // reserved

        let count = egt.read_u16()?;
        let mut nesting =
            hashbrown::HashSet::with_capacity_and_hasher(usize::from(count), Default::default());
        for _ in 0..count {
            let nested = usize::from(egt.read_u16()?);
            if nested >= self.groups.len() {
                return Err(LoadError::IndexOutOfRange {
                    table: "group",
                    index: nested,
                    len: self.groups.len(),
                });
            }
            nesting.insert(nested);
        }

        let group_index = usize::from(index);
        let slot = checked_slot(&mut self.groups, index, "group")?;
        *slot = Some(Group::new(
            name, container, start, end, advance, ending, nesting,
        ));

        // Link the delimiter and container symbols back to the group.
        for symbol in [container, start, end] {
            if let Some(sym) = &mut self.symbols[symbol] {
                sym.group = Some(group_index);
            }
        }
        Ok(())
    }

    /// `c`: index, codepage (discarded), total (discarded), reserved, then
    /// (start, end) pairs to the end of the record.
    fn read_char_ranges(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let _codepage = egt.read_u16()?;
        let _total = egt.read_u16()?;
        egt.read_entry()?; // reserved

        let mut set = CharacterSet::new();
        while !egt.record_complete() {
            let start = egt.read_u16()?;
            let end = egt.read_u16()?;
            set.add(CharacterRange::new(start, end));
        }

        let slot = checked_slot(&mut self.charsets, index, "character set")?;
        *slot = Some(set);
        Ok(())
    }

    /// `R`: index, head#, reserved, then handle symbol indices to the end of
    /// the record.
    fn read_production(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let head = self.symbol_ref(egt.read_u16()?)?;
        egt.read_entry()?; // reserved

        if self.symbols[head]
            .as_ref()
            .is_some_and(|s| s.kind() != SymbolKind::Nonterminal)
        {
            return Err(LoadError::InvalidProductionHead {
                index: usize::from(index),
            });
        }

        let mut handle = Vec::new();
        while !egt.record_complete() {
            handle.push(self.symbol_ref(egt.read_u16()?)?);
        }

        let slot = checked_slot(&mut self.productions, index, "production")?;
        *slot = Some(Production::new(head, handle, index));
        Ok(())
    }

    /// `D`: index, accept?, accept#, reserved, then (charset#, target#,
    /// reserved) triples to the end of the record.
    fn read_dfa_state(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        let is_accept = egt.read_bool()?;
        let accept_index = egt.read_u16()?;
        egt.read_entry()?; // reserved

        let accept = if is_accept {
            Some(self.symbol_ref(accept_index)?)
        } else {
            None
        };
        let mut state = DfaState::new(accept);

        while !egt.record_complete() {
            let charset = usize::from(egt.read_u16()?);
            let target = usize::from(egt.read_u16()?);
            egt.read_entry()?; // reserved

            if charset >= self.charsets.len() {
                return Err(LoadError::IndexOutOfRange {
                    table: "character set",
                    index: charset,
                    len: self.charsets.len(),
                });
            }
            if target >= self.dfa_states.len() {
                return Err(LoadError::IndexOutOfRange {
                    table: "DFA state",
                    index: target,
                    len: self.dfa_states.len(),
                });
            }
            state.add_edge(DfaEdge { charset, target });
        }

        let slot = checked_slot(&mut self.dfa_states, index, "DFA state")?;
        *slot = Some(state);
        Ok(())
    }

    /// `L`: index, reserved, then (symbol#, action, target, reserved) quads
    /// to the end of the record.
    fn read_lr_state(&mut self, egt: &mut EgtReader) -> Result<(), LoadError> {
        let index = egt.read_u16()?;
        egt.read_entry()?; // reserved

        let mut state = LrState::new();
        while !egt.record_complete() {
            let symbol = self.symbol_ref(egt.read_u16()?)?;
            let kind = LrActionKind::from_table_value(egt.read_u16()?)?;
            let target = egt.read_u16()?;
            egt.read_entry()?; // reserved

            let (table, len) = match kind {
                LrActionKind::Shift | LrActionKind::Goto => {
                    ("LALR state", self.lr_states.len())
                }
                LrActionKind::Reduce => ("production", self.productions.len()),
                LrActionKind::Accept | LrActionKind::Error => ("", usize::MAX),
            };
            if usize::from(target) >= len {
                return Err(LoadError::IndexOutOfRange {
                    table,
                    index: usize::from(target),
                    len,
                });
            }

            state.add(LrAction {
                symbol,
                kind,
                target,
            });
        }

        let slot = checked_slot(&mut self.lr_states, index, "LALR state")?;
        *slot = Some(state);
        Ok(())
    }

    /// Resolve a symbol reference, requiring the symbol record to have
    /// already been loaded.
    fn symbol_ref(&self, index: u16) -> Result<usize, LoadError> {
        let index = usize::from(index);
        match self.symbols.get(index) {
            Some(Some(_)) => Ok(index),
            Some(None) => Err(LoadError::UnresolvedReference {
                table: "symbol",
                index,
            }),
            None => Err(LoadError::IndexOutOfRange {
                table: "symbol",
                index,
                len: self.symbols.len(),
            }),
        }
    }

    fn finish(self) -> Result<Grammar, LoadError> {
        let symbols = seal_table(self.symbols, "symbol")?;
        let charsets = seal_table(self.charsets, "character set")?;
        let productions = seal_table(self.productions, "production")?;
        let dfa_states = seal_table(self.dfa_states, "DFA state")?;
        let lr_states = seal_table(self.lr_states, "LALR state")?;
        let groups = seal_table(self.groups, "group")?;

        if self.dfa_initial >= dfa_states.len() {
            return Err(LoadError::IndexOutOfRange {
                table: "DFA state",
                index: self.dfa_initial,
                len: dfa_states.len(),
            });
        }
        if self.lr_initial >= lr_states.len() {
            return Err(LoadError::IndexOutOfRange {
                table: "LALR state",
                index: self.lr_initial,
                len: lr_states.len(),
            });
        }

        Grammar::from_parts(
            self.properties,
            symbols,
            charsets,
            productions,
            dfa_states,
            lr_states,
            groups,
            self.dfa_initial,
            self.lr_initial,
        )
    }
}

fn empty_table<T>(count: u16) -> Vec<Option<T>> {
    let mut table = Vec::with_capacity(usize::from(count));
    table.resize_with(usize::from(count), || None);
    table
}

fn checked_slot<'t, T>(
    table: &'t mut [Option<T>],
    index: u16,
    name: &'static str,
) -> Result<&'t mut Option<T>, LoadError> {
    let len = table.len();
    table
        .get_mut(usize::from(index))
        .ok_or(LoadError::IndexOutOfRange {
            table: name,
            index: usize::from(index),
            len,
        })
}

fn seal_table<T>(table: Vec<Option<T>>, name: &'static str) -> Result<Vec<T>, LoadError> {
    table
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(LoadError::MissingEntry { table: name, index }))
        .collect()
}
