//! Symbol tables: bijective label ↔ small-integer mappings.
//!
//! Backed by an `IndexSet`, so the insertion index *is* the id: lookups and
//! inserts are O(1) amortized and ids never move once assigned.
//! Id 0 is always the epsilon symbol.

use std::fmt::{self, Write};

use indexmap::IndexSet;

use crate::{Error, Result};

/// Id of a symbol in one table.
///
/// Labels are only meaningful relative to the table that produced them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Label(u32);

impl Label {
    pub const EPSILON: Label = Label(0);

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a Label from a raw id. Use only when reading ids back from text.
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn is_epsilon(self) -> bool {
        self == Self::EPSILON
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symbol table with epsilon at id 0 and new symbols appended at the next free id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexSet<String>,
}

impl SymbolTable {
    /// Create a table holding only the epsilon symbol.
    pub fn new(epsilon: &str) -> Self {
        let mut symbols = IndexSet::new();
        symbols.insert(epsilon.to_owned());
        Self { symbols }
    }

    /// The epsilon symbol (id 0).
    pub fn epsilon(&self) -> &str {
        self.resolve(Label::EPSILON)
    }

    /// Intern a symbol, returning its existing label if already present.
    pub fn intern(&mut self, symbol: &str) -> Label {
        if let Some(index) = self.symbols.get_index_of(symbol) {
            return Label(index as u32);
        }
        let (index, _) = self.symbols.insert_full(symbol.to_owned());
        Label(index as u32)
    }

    /// Intern an owned symbol, avoiding a clone when it is new.
    pub fn intern_owned(&mut self, symbol: String) -> Label {
        let (index, _) = self.symbols.insert_full(symbol);
        Label(index as u32)
    }

    pub fn find(&self, symbol: &str) -> Option<Label> {
        self.symbols.get_index_of(symbol).map(|i| Label(i as u32))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Resolve a label back to its symbol.
    ///
    /// # Panics
    /// Panics if the label was not produced by this table.
    #[inline]
    pub fn resolve(&self, label: Label) -> &str {
        self.try_resolve(label).unwrap_or_else(|| {
            panic!(
                "SymbolTable: label {label} out of range ({} symbols)",
                self.symbols.len()
            )
        })
    }

    #[inline]
    pub fn try_resolve(&self, label: Label) -> Option<&str> {
        self.symbols.get_index(label.0 as usize).map(String::as_str)
    }

    /// Number of symbols, epsilon included.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: epsilon is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate symbols in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (Label(i as u32), s.as_str()))
    }

    /// Serialize as `symbol\tid` lines in id order.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (label, symbol) in self.iter() {
            writeln!(out, "{symbol}\t{label}").expect("String write never fails");
        }
        out
    }

    /// Read a table back from `symbol id` lines.
    ///
    /// Ids must be dense and listed in order; the first line is epsilon.
    pub fn parse(text: &str) -> Result<Self> {
        let mut symbols = IndexSet::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let mut fields = line.split_whitespace();
            let (Some(symbol), Some(id)) = (fields.next(), fields.next()) else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(table_error(line_no, "expected `symbol id`"));
            };
            if fields.next().is_some() {
                return Err(table_error(line_no, "trailing fields after id"));
            }

            let id: usize = id
                .parse()
                .map_err(|_| table_error(line_no, format!("invalid id `{id}`")))?;
            if id != symbols.len() {
                return Err(table_error(
                    line_no,
                    format!("id {id} out of order, expected {}", symbols.len()),
                ));
            }
            if !symbols.insert(symbol.to_owned()) {
                return Err(table_error(line_no, format!("duplicate symbol `{symbol}`")));
            }
        }

        if symbols.is_empty() {
            return Err(table_error(0, "table has no epsilon entry"));
        }

        Ok(Self { symbols })
    }
}

fn table_error(line: usize, message: impl Into<String>) -> Error {
    Error::SymbolTable {
        line,
        message: message.into(),
    }
}
