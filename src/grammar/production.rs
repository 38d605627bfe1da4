/// A grammar rule: a nonterminal head and the ordered right-hand side
/// ("handle") it produces.
///
/// Symbols are referenced by index into the owning grammar's symbol table;
/// the loader guarantees every index resolves and that the head is a
/// nonterminal.
#[derive(Debug, Clone)]
pub struct Production {
    head: usize,
    handle: Vec<usize>,
    index: u16,
}

impl Production {
    pub(crate) const fn new(head: usize, handle: Vec<usize>, index: u16) -> Self {
        Self {
            head,
            handle,
            index,
        }
    }

    /// Symbol-table index of the head nonterminal.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Symbol-table indices of the right-hand side, in rule order. May be
    /// empty for epsilon productions.
    #[must_use]
    pub fn handle(&self) -> &[usize] {
        &self.handle
    }

    /// Stable index of this production in the grammar's production table.
    ///
    /// Hosts dispatch their reduction handlers on this value.
    #[must_use]
    pub const fn table_index(&self) -> u16 {
        self.index
    }
}
