//! Positional row identifiers

use std::fmt;

/// Position of a row inside a sectioned list.
///
/// Addresses are positional: they are valid only until the next structural
/// edit and must never be stored across one. Ordering is by section first,
/// then row, so sorting a batch of addresses groups it by section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RowAddress {
    /// 0-based section index.
    pub section: usize,
    /// 0-based row index within the section.
    pub row: usize,
}

impl RowAddress {
    /// Create a new address.
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Address of the row directly after this one in the same section.
    pub fn next_row(&self) -> Self {
        Self::new(self.section, self.row + 1)
    }
}

impl From<(usize, usize)> for RowAddress {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for RowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}
