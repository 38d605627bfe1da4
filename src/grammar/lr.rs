use crate::error::LoadError;

/// What an LALR action does when its symbol is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LrActionKind {
    /// Consume the symbol and move to the target state.
    Shift = 1,
    /// Reduce by the target production.
    Reduce = 2,
    /// Transition taken on a nonterminal after a reduce.
    Goto = 3,
    /// Input parsed successfully.
    Accept = 4,
    /// Present in the format but unused: errors are the *absence* of an
    /// action.
    Error = 5,
}

impl LrActionKind {
    pub(crate) const fn from_table_value(value: u16) -> Result<Self, LoadError> {
        match value {
            1 => Ok(Self::Shift),
            2 => Ok(Self::Reduce),
            3 => Ok(Self::Goto),
            4 => Ok(Self::Accept),
            5 => Ok(Self::Error),
            other => Err(LoadError::InvalidEnumValue {
                what: "LR action",
                value: other,
            }),
        }
    }
}

/// One action of an LALR state, keyed by symbol.
#[derive(Debug, Clone, Copy)]
pub struct LrAction {
    /// Symbol-table index this action responds to.
    pub symbol: usize,
    pub kind: LrActionKind,
    /// Shift/goto target state or reduce production, depending on `kind`.
    pub target: u16,
}

/// A state of the LALR(1) machine: an ordered list of actions.
///
/// Lookup is a linear scan by symbol index. States hold a handful of actions
/// each; the table file dictates the order.
#[derive(Debug, Clone, Default)]
pub struct LrState {
    actions: Vec<LrAction>,
}

impl LrState {
    pub(crate) const fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, action: LrAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[LrAction] {
        &self.actions
    }

    /// The action keyed by `symbol`, or `None` - which the driver reports as
    /// a syntax error (for terminals) or an internal error (for a missing
    /// goto).
    #[must_use]
    pub fn action_for(&self, symbol: usize) -> Option<&LrAction> {
        self.actions.iter().find(|a| a.symbol == symbol)
    }
}
