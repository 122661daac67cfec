//! HeightCache - jagged cache of measured row, header and footer heights
//!
//! The cache mirrors the list's index space: one row sequence per section,
//! plus one header slot and one footer slot per section. Keys are positional,
//! so every structural edit on the list must be replayed here as a splice
//! before the next query is served.
//!
//! # Invariants
//!
//! - `rows.len() == headers.len() == footers.len()` (one entry per section)
//! - indices are dense and 0-based
//!
//! # Out-of-range input
//!
//! Reads return `None` and writes are skipped. Nothing panics and nothing is
//! logged; the list protocol routinely asks about positions the cache has not
//! been sized for yet.
//!
//! # Batch ordering
//!
//! Multi-index removals run in descending order and insertions in ascending
//! order, so every index keeps referring to the caller's numbering: removals
//! use pre-edit indices, insertions post-edit indices.

use crate::model::{Height, RowAddress};
use std::fmt;

/// Cached heights for every section, row, header and footer of one list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightCache {
    rows: Vec<Vec<Height>>,
    headers: Vec<Height>,
    footers: Vec<Height>,
}

impl HeightCache {
    /// Create an empty cache with no sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache shaped by `row_counts`, every slot unmeasured.
    pub fn with_shape(row_counts: &[usize]) -> Self {
        let mut cache = Self::new();
        cache.resize_sections(row_counts.len());
        for (section, &count) in row_counts.iter().enumerate() {
            cache.resize_rows(section, count);
        }
        cache
    }

    // === Shape ===

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of row slots in `section`, or `None` if out of range.
    pub fn row_count(&self, section: usize) -> Option<usize> {
        self.rows.get(section).map(Vec::len)
    }

    /// Row slots, outer index = section.
    pub fn rows(&self) -> &[Vec<Height>] {
        &self.rows
    }

    /// Header slots by section.
    pub fn headers(&self) -> &[Height] {
        &self.headers
    }

    /// Footer slots by section.
    pub fn footers(&self) -> &[Height] {
        &self.footers
    }

    // === Reset ===

    /// Drop every section, row, header and footer entry.
    pub fn reset_all(&mut self) {
        self.rows.clear();
        self.headers.clear();
        self.footers.clear();
    }

    /// Reset and regrow to `count` sections, each with no rows and unmeasured
    /// header/footer slots.
    pub fn resize_sections(&mut self, count: usize) {
        self.reset_all();
        self.rows.resize_with(count, Vec::new);
        self.headers.resize(count, Height::Unmeasured);
        self.footers.resize(count, Height::Unmeasured);
    }

    /// Replace the rows of `section` with `count` unmeasured slots.
    pub fn resize_rows(&mut self, section: usize, count: usize) {
        if let Some(rows) = self.rows.get_mut(section) {
            rows.clear();
            rows.resize(count, Height::Unmeasured);
        }
    }

    /// Empty the rows of `section` and mark its header and footer unmeasured.
    pub fn reset_section(&mut self, section: usize) {
        if let Some(rows) = self.rows.get_mut(section) {
            rows.clear();
        }
        if let Some(header) = self.headers.get_mut(section) {
            *header = Height::Unmeasured;
        }
        if let Some(footer) = self.footers.get_mut(section) {
            *footer = Height::Unmeasured;
        }
    }

    /// [`reset_section`](Self::reset_section) for each of `sections`.
    pub fn reset_sections(&mut self, sections: &[usize]) {
        for &section in sections {
            self.reset_section(section);
        }
    }

    /// Mark one row unmeasured without removing its slot.
    pub fn invalidate_row(&mut self, address: RowAddress) {
        if let Some(slot) = self.row_slot_mut(address) {
            *slot = Height::Unmeasured;
        }
    }

    /// [`invalidate_row`](Self::invalidate_row) for each of `addresses`.
    pub fn invalidate_rows(&mut self, addresses: &[RowAddress]) {
        for &address in addresses {
            self.invalidate_row(address);
        }
    }

    // === Sections ===

    /// Remove `section` from all three sequences. Returns whether it existed.
    pub fn remove_section(&mut self, section: usize) -> bool {
        if section >= self.rows.len() {
            return false;
        }
        self.rows.remove(section);
        self.headers.remove(section);
        self.footers.remove(section);
        true
    }

    /// Remove several sections given in pre-edit numbering.
    pub fn remove_sections(&mut self, sections: &[usize]) {
        for section in descending(sections) {
            self.remove_section(section);
        }
    }

    /// Insert an empty section at `section`. Returns whether it was inserted.
    ///
    /// `section` may equal the current section count to append.
    pub fn insert_section(&mut self, section: usize) -> bool {
        if section > self.rows.len() {
            return false;
        }
        self.rows.insert(section, Vec::new());
        self.headers.insert(section, Height::Unmeasured);
        self.footers.insert(section, Height::Unmeasured);
        true
    }

    /// Insert several empty sections given in post-edit numbering.
    pub fn insert_sections(&mut self, sections: &[usize]) {
        for section in ascending(sections) {
            self.insert_section(section);
        }
    }

    /// Move a section, with its rows, header and footer, to `to`.
    ///
    /// `to` is interpreted after removal, like [`move_row`](Self::move_row).
    /// Out-of-range input leaves the cache unchanged.
    pub fn move_section(&mut self, from: usize, to: usize) {
        let len = self.rows.len();
        if from >= len || to >= len {
            return;
        }
        let rows = self.rows.remove(from);
        let header = self.headers.remove(from);
        let footer = self.footers.remove(from);
        self.rows.insert(to, rows);
        self.headers.insert(to, header);
        self.footers.insert(to, footer);
    }

    // === Rows ===

    /// Remove one row slot, returning its height.
    pub fn remove_row(&mut self, address: RowAddress) -> Option<Height> {
        let rows = self.rows.get_mut(address.section)?;
        if address.row >= rows.len() {
            return None;
        }
        Some(rows.remove(address.row))
    }

    /// Remove several rows given in pre-edit numbering.
    pub fn remove_rows(&mut self, addresses: &[RowAddress]) {
        for address in descending(addresses) {
            self.remove_row(address);
        }
    }

    /// Insert a row slot holding `height`.
    ///
    /// Skipped when the section does not exist or `address.row` is past the
    /// end of the section.
    pub fn insert_row(&mut self, address: RowAddress, height: Height) {
        let Some(rows) = self.rows.get_mut(address.section) else {
            return;
        };
        if address.row <= rows.len() {
            rows.insert(address.row, height);
        }
    }

    /// Insert several unmeasured rows given in post-edit numbering.
    pub fn insert_rows(&mut self, addresses: &[RowAddress]) {
        for address in ascending(addresses) {
            self.insert_row(address, Height::Unmeasured);
        }
    }

    /// Move a row slot, keeping its cached height.
    ///
    /// If `from` does not exist nothing is inserted at `to`.
    pub fn move_row(&mut self, from: RowAddress, to: RowAddress) {
        if let Some(height) = self.remove_row(from) {
            self.insert_row(to, height);
        }
    }

    // === Values ===

    /// Cached height of a row.
    pub fn row_height(&self, address: RowAddress) -> Option<Height> {
        self.rows.get(address.section)?.get(address.row).copied()
    }

    /// Store a measured row height. Returns whether the slot existed.
    pub fn set_row_height(&mut self, address: RowAddress, value: f64) -> bool {
        match self.row_slot_mut(address) {
            Some(slot) => {
                *slot = Height::measured(value);
                true
            }
            None => false,
        }
    }

    /// Cached height of a section header.
    pub fn header_height(&self, section: usize) -> Option<Height> {
        self.headers.get(section).copied()
    }

    /// Store a measured header height. Returns whether the slot existed.
    pub fn set_header_height(&mut self, section: usize, value: f64) -> bool {
        store(&mut self.headers, section, value)
    }

    /// Cached height of a section footer.
    pub fn footer_height(&self, section: usize) -> Option<Height> {
        self.footers.get(section).copied()
    }

    /// Store a measured footer height. Returns whether the slot existed.
    pub fn set_footer_height(&mut self, section: usize, value: f64) -> bool {
        store(&mut self.footers, section, value)
    }

    fn row_slot_mut(&mut self, address: RowAddress) -> Option<&mut Height> {
        self.rows.get_mut(address.section)?.get_mut(address.row)
    }
}

fn store(slots: &mut [Height], index: usize, value: f64) -> bool {
    match slots.get_mut(index) {
        Some(slot) => {
            *slot = Height::measured(value);
            true
        }
        None => false,
    }
}

fn ascending<T: Copy + Ord>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

fn descending<T: Copy + Ord>(items: &[T]) -> Vec<T> {
    let mut sorted = ascending(items);
    sorted.reverse();
    sorted
}

/// One line per section: `s<i> h=<header> f=<footer> [<rows>]`.
impl fmt::Display for HeightCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, rows) in self.rows.iter().enumerate() {
            if section > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "s{section} h={} f={} [",
                self.headers[section], self.footers[section]
            )?;
            for (row, height) in rows.iter().enumerate() {
                if row > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{height}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "height_cache_tests.rs"]
mod tests;
