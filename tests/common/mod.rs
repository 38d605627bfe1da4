//! Shared test support: a writer for the EGT binary format and two small
//! grammars assembled with it.
//!
//! The builder is the mirror image of the crate's reader. Driving every
//! integration test through real table bytes keeps the loader honest and
//! exercises the same path a grammar file from disk would take.

#![allow(dead_code)]

/// Byte-level writer for EGT tables.
///
/// Records are opened with [`EgtBuilder::record`]; the entry count is
/// patched in when the next record opens or the builder finishes.
pub struct EgtBuilder {
    data: Vec<u8>,
    /// Offset of the open record's count field and its entry tally.
    open: Option<(usize, u16)>,
}

impl EgtBuilder {
    pub fn new(header: &str) -> Self {
        let mut data = utf16_z(header);
        data.reserve(256);
        Self { data, open: None }
    }

    /// Open a new record.
    pub fn record(&mut self) -> &mut Self {
        self.close_record();
        self.data.push(b'M');
        self.open = Some((self.data.len(), 0));
        self.data.extend_from_slice(&[0, 0]); // count, patched later
        self
    }

    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.bump();
        self.data.push(b'b');
        self.data.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bump();
        self.data.push(b'I');
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.bump();
        self.data.push(b'S');
        self.data.extend_from_slice(&utf16_z(value));
        self
    }

    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.bump();
        self.data.push(b'B');
        self.data.push(u8::from(value));
        self
    }

    pub fn empty(&mut self) -> &mut Self {
        self.bump();
        self.data.push(b'E');
        self
    }

    /// Append a raw byte without counting an entry, for corruption tests.
    pub fn raw(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.close_record();
        self.data
    }

    fn bump(&mut self) {
        if let Some((_, count)) = &mut self.open {
            *count += 1;
        }
    }

    fn close_record(&mut self) {
        if let Some((at, count)) = self.open.take() {
            self.data[at..at + 2].copy_from_slice(&count.to_le_bytes());
        }
    }
}

fn utf16_z(s: &str) -> Vec<u8> {
    let mut out: Vec<u8> = s.encode_utf16().flat_map(u16::to_le_bytes).collect();
    out.extend_from_slice(&[0, 0]);
    out
}

/// Symbol / production / table indices of the arithmetic fixture.
///
/// Grammar: `E ::= E '+' T | T`, `T ::= Number`, with whitespace noise.
pub mod arith {
    pub const EOF: usize = 0;
    pub const ERROR: usize = 1;
    pub const WHITESPACE: usize = 2;
    pub const PLUS: usize = 3;
    pub const NUMBER: usize = 4;
    pub const E: usize = 5;
    pub const T: usize = 6;

    pub const PROD_ADD: usize = 0; // E ::= E + T
    pub const PROD_CHAIN: usize = 1; // E ::= T
    pub const PROD_NUMBER: usize = 2; // T ::= Number
}

/// Table bytes for the arithmetic fixture.
pub fn arithmetic_egt() -> Vec<u8> {
    use arith::*;

    let mut b = EgtBuilder::new("GOLD Parser Tables/v5.0");

    // Table counts: symbols, charsets, productions, DFA, LALR, groups
    b.record().byte(b't');
    b.u16(7).u16(3).u16(3).u16(4).u16(6).u16(0);

    // Properties
    b.record().byte(b'p').u16(0).string("Name").string("Arithmetic");
    b.record().byte(b'p').u16(1).string("Version").string("1.0");
    b.record().byte(b'p').u16(2).string("Author").string("tests");

    // Initial states: DFA, LALR
    b.record().byte(b'I').u16(0).u16(0);

    // Character sets
    b.record().byte(b'c').u16(0).u16(0).u16(1).empty();
    b.u16(u16::from(b'0')).u16(u16::from(b'9'));
    b.record().byte(b'c').u16(1).u16(0).u16(1).empty();
    b.u16(u16::from(b'+')).u16(u16::from(b'+'));
    b.record().byte(b'c').u16(2).u16(0).u16(3).empty();
    b.u16(9).u16(10).u16(13).u16(13).u16(32).u16(32);

    // Symbols: index, name, kind
    for (index, name, kind) in [
        (EOF, "EOF", 3u16),
        (ERROR, "Error", 7),
        (WHITESPACE, "Whitespace", 2),
        (PLUS, "+", 1),
        (NUMBER, "Number", 1),
        (E, "E", 0),
        (T, "T", 0),
    ] {
        b.record().byte(b'S').u16(index as u16).string(name).u16(kind);
    }

    // Productions: index, head, reserved, handle...
    b.record().byte(b'R').u16(0).u16(E as u16).empty();
    b.u16(E as u16).u16(PLUS as u16).u16(T as u16);
    b.record().byte(b'R').u16(1).u16(E as u16).empty();
    b.u16(T as u16);
    b.record().byte(b'R').u16(2).u16(T as u16).empty();
    b.u16(NUMBER as u16);

    // DFA states: index, accept?, accept#, reserved, edges...
    b.record().byte(b'D').u16(0).boolean(false).u16(0).empty();
    b.u16(0).u16(1).empty(); // digits -> 1
    b.u16(1).u16(2).empty(); // '+'    -> 2
    b.u16(2).u16(3).empty(); // ws     -> 3
    b.record().byte(b'D').u16(1).boolean(true).u16(NUMBER as u16).empty();
    b.u16(0).u16(1).empty();
    b.record().byte(b'D').u16(2).boolean(true).u16(PLUS as u16).empty();
    b.record().byte(b'D').u16(3).boolean(true).u16(WHITESPACE as u16).empty();
    b.u16(2).u16(3).empty();

    // LALR states: index, reserved, actions (symbol, action, target, reserved)...
    const SHIFT: u16 = 1;
    const REDUCE: u16 = 2;
    const GOTO: u16 = 3;
    const ACCEPT: u16 = 4;

    b.record().byte(b'L').u16(0).empty();
    b.u16(NUMBER as u16).u16(SHIFT).u16(3).empty();
    b.u16(E as u16).u16(GOTO).u16(1).empty();
    b.u16(T as u16).u16(GOTO).u16(2).empty();

    b.record().byte(b'L').u16(1).empty();
    b.u16(PLUS as u16).u16(SHIFT).u16(4).empty();
    b.u16(EOF as u16).u16(ACCEPT).u16(0).empty();

    b.record().byte(b'L').u16(2).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_CHAIN as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_CHAIN as u16).empty();

    b.record().byte(b'L').u16(3).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_NUMBER as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_NUMBER as u16).empty();

    b.record().byte(b'L').u16(4).empty();
    b.u16(NUMBER as u16).u16(SHIFT).u16(3).empty();
    b.u16(T as u16).u16(GOTO).u16(5).empty();

    b.record().byte(b'L').u16(5).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_ADD as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_ADD as u16).empty();

    b.finish()
}

/// Symbol / production / group indices of the commented fixture.
///
/// Same expression grammar as [`arith`], plus a self-nesting `/* */` block
/// comment group (character advance, closed ending) and a `//` line comment
/// group (token advance, open ending, terminated by `NewLine`).
pub mod commented {
    pub const EOF: usize = 0;
    pub const ERROR: usize = 1;
    pub const WHITESPACE: usize = 2;
    pub const NEWLINE: usize = 3;
    pub const PLUS: usize = 4;
    pub const NUMBER: usize = 5;
    pub const COMMENT: usize = 6;
    pub const COMMENT_START: usize = 7;
    pub const COMMENT_END: usize = 8;
    pub const LINE_COMMENT: usize = 9;
    pub const LINE_COMMENT_START: usize = 10;
    pub const E: usize = 11;
    pub const T: usize = 12;

    pub const PROD_ADD: usize = 0;
    pub const PROD_CHAIN: usize = 1;
    pub const PROD_NUMBER: usize = 2;

    pub const GROUP_BLOCK: usize = 0;
    pub const GROUP_LINE: usize = 1;
}

/// Table bytes for the commented fixture.
pub fn groups_egt() -> Vec<u8> {
    use commented::*;

    let mut b = EgtBuilder::new("GOLD Parser Tables/v5.0");

    b.record().byte(b't');
    b.u16(13).u16(6).u16(3).u16(10).u16(6).u16(2);

    b.record().byte(b'I').u16(0).u16(0);

    // Character sets
    b.record().byte(b'c').u16(0).u16(0).u16(1).empty();
    b.u16(u16::from(b'0')).u16(u16::from(b'9'));
    b.record().byte(b'c').u16(1).u16(0).u16(1).empty();
    b.u16(u16::from(b'+')).u16(u16::from(b'+'));
    b.record().byte(b'c').u16(2).u16(0).u16(2).empty();
    b.u16(9).u16(9).u16(32).u16(32);
    b.record().byte(b'c').u16(3).u16(0).u16(2).empty();
    b.u16(10).u16(10).u16(13).u16(13);
    b.record().byte(b'c').u16(4).u16(0).u16(1).empty();
    b.u16(u16::from(b'/')).u16(u16::from(b'/'));
    b.record().byte(b'c').u16(5).u16(0).u16(1).empty();
    b.u16(u16::from(b'*')).u16(u16::from(b'*'));

    // Symbols
    for (index, name, kind) in [
        (EOF, "EOF", 3u16),
        (ERROR, "Error", 7),
        (WHITESPACE, "Whitespace", 2),
        (NEWLINE, "NewLine", 2),
        (PLUS, "+", 1),
        (NUMBER, "Number", 1),
        (COMMENT, "Comment", 2),
        (COMMENT_START, "/*", 4),
        (COMMENT_END, "*/", 5),
        (LINE_COMMENT, "LineComment", 2),
        (LINE_COMMENT_START, "//", 4),
        (E, "E", 0),
        (T, "T", 0),
    ] {
        b.record().byte(b'S').u16(index as u16).string(name).u16(kind);
    }

    // Groups: index, name, container, start, end, advance, ending,
    // reserved, nested count, nested...
    const ADVANCE_TOKEN: u16 = 0;
    const ADVANCE_CHAR: u16 = 1;
    const ENDING_OPEN: u16 = 0;
    const ENDING_CLOSED: u16 = 1;

    b.record().byte(b'g').u16(GROUP_BLOCK as u16).string("Comment Block");
    b.u16(COMMENT as u16)
        .u16(COMMENT_START as u16)
        .u16(COMMENT_END as u16);
    b.u16(ADVANCE_CHAR).u16(ENDING_CLOSED).empty();
    b.u16(1).u16(GROUP_BLOCK as u16); // may nest inside itself

    b.record().byte(b'g').u16(GROUP_LINE as u16).string("Comment Line");
    b.u16(LINE_COMMENT as u16)
        .u16(LINE_COMMENT_START as u16)
        .u16(NEWLINE as u16);
    b.u16(ADVANCE_TOKEN).u16(ENDING_OPEN).empty();
    b.u16(0);

    // Productions
    b.record().byte(b'R').u16(0).u16(E as u16).empty();
    b.u16(E as u16).u16(PLUS as u16).u16(T as u16);
    b.record().byte(b'R').u16(1).u16(E as u16).empty();
    b.u16(T as u16);
    b.record().byte(b'R').u16(2).u16(T as u16).empty();
    b.u16(NUMBER as u16);

    // DFA
    b.record().byte(b'D').u16(0).boolean(false).u16(0).empty();
    b.u16(0).u16(1).empty(); // digits  -> 1
    b.u16(1).u16(2).empty(); // '+'     -> 2
    b.u16(2).u16(3).empty(); // ws      -> 3
    b.u16(3).u16(4).empty(); // newline -> 4
    b.u16(4).u16(5).empty(); // '/'     -> 5
    b.u16(5).u16(7).empty(); // '*'     -> 7
    b.record().byte(b'D').u16(1).boolean(true).u16(NUMBER as u16).empty();
    b.u16(0).u16(1).empty();
    b.record().byte(b'D').u16(2).boolean(true).u16(PLUS as u16).empty();
    b.record().byte(b'D').u16(3).boolean(true).u16(WHITESPACE as u16).empty();
    b.u16(2).u16(3).empty();
    b.record().byte(b'D').u16(4).boolean(true).u16(NEWLINE as u16).empty();
    // state 5: '/' seen; not accepting, so a lone '/' is a lexical error
    b.record().byte(b'D').u16(5).boolean(false).u16(0).empty();
    b.u16(5).u16(6).empty(); // '*' -> "/*"
    b.u16(4).u16(8).empty(); // '/' -> "//"
    b.record().byte(b'D').u16(6).boolean(true).u16(COMMENT_START as u16).empty();
    // state 7: '*' seen; not accepting
    b.record().byte(b'D').u16(7).boolean(false).u16(0).empty();
    b.u16(4).u16(9).empty(); // '/' -> "*/"
    b.record().byte(b'D').u16(8).boolean(true).u16(LINE_COMMENT_START as u16).empty();
    b.record().byte(b'D').u16(9).boolean(true).u16(COMMENT_END as u16).empty();

    // LALR
    const SHIFT: u16 = 1;
    const REDUCE: u16 = 2;
    const GOTO: u16 = 3;
    const ACCEPT: u16 = 4;

    b.record().byte(b'L').u16(0).empty();
    b.u16(NUMBER as u16).u16(SHIFT).u16(3).empty();
    b.u16(E as u16).u16(GOTO).u16(1).empty();
    b.u16(T as u16).u16(GOTO).u16(2).empty();

    b.record().byte(b'L').u16(1).empty();
    b.u16(PLUS as u16).u16(SHIFT).u16(4).empty();
    b.u16(EOF as u16).u16(ACCEPT).u16(0).empty();

    b.record().byte(b'L').u16(2).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_CHAIN as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_CHAIN as u16).empty();

    b.record().byte(b'L').u16(3).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_NUMBER as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_NUMBER as u16).empty();

    b.record().byte(b'L').u16(4).empty();
    b.u16(NUMBER as u16).u16(SHIFT).u16(3).empty();
    b.u16(T as u16).u16(GOTO).u16(5).empty();

    b.record().byte(b'L').u16(5).empty();
    b.u16(PLUS as u16).u16(REDUCE).u16(PROD_ADD as u16).empty();
    b.u16(EOF as u16).u16(REDUCE).u16(PROD_ADD as u16).empty();

    b.finish()
}
