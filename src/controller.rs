//! Edit coordinator: replays structural edits on the height cache, then on the list.
//!
//! Every edit follows the same shape:
//!
//! 1. open an update batch on the list (for multi-step edits)
//! 2. splice the height cache, using the ordering rules of
//!    [`HeightCache`](crate::cache::HeightCache)
//! 3. tell the list about the matching visual edit
//! 4. close the batch
//!
//! The presenter must already reflect the edit when a method is called, since
//! the list re-queries it while applying the batch.

use crate::binding::{ListBinding, ScrollObserver};
use crate::list::{ListView, RowAnimation, ScrollPosition};
use crate::model::{report, RowAddress};
use crate::presenter::ListPresenter;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// A group of row and section edits applied as one update batch.
///
/// Reloads and deletions use pre-edit indices, insertions post-edit indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    reload_rows: Vec<RowAddress>,
    delete_rows: Vec<RowAddress>,
    insert_rows: Vec<RowAddress>,
    reload_sections: Vec<usize>,
    delete_sections: Vec<usize>,
    insert_sections: Vec<usize>,
}

impl EditBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rows to reload.
    pub fn reload_rows(mut self, addresses: &[RowAddress]) -> Self {
        self.reload_rows.extend_from_slice(addresses);
        self
    }

    /// Add rows to delete.
    pub fn delete_rows(mut self, addresses: &[RowAddress]) -> Self {
        self.delete_rows.extend_from_slice(addresses);
        self
    }

    /// Add rows to insert.
    pub fn insert_rows(mut self, addresses: &[RowAddress]) -> Self {
        self.insert_rows.extend_from_slice(addresses);
        self
    }

    /// Add sections to reload.
    pub fn reload_sections(mut self, sections: &[usize]) -> Self {
        self.reload_sections.extend_from_slice(sections);
        self
    }

    /// Add sections to delete.
    pub fn delete_sections(mut self, sections: &[usize]) -> Self {
        self.delete_sections.extend_from_slice(sections);
        self
    }

    /// Add sections to insert.
    pub fn insert_sections(mut self, sections: &[usize]) -> Self {
        self.insert_sections.extend_from_slice(sections);
        self
    }

    /// Check if the batch contains no edits.
    pub fn is_empty(&self) -> bool {
        self.reload_rows.is_empty()
            && self.delete_rows.is_empty()
            && self.insert_rows.is_empty()
            && self.reload_sections.is_empty()
            && self.delete_sections.is_empty()
            && self.insert_sections.is_empty()
    }
}

/// Owns a list and the binding feeding it, and keeps their index spaces in step.
pub struct ListController<P, L> {
    binding: ListBinding<P>,
    list: L,
}

impl<P: ListPresenter, L: ListView> ListController<P, L> {
    /// Bind `presenter` to `list` with the default error policy.
    pub fn new(presenter: P, list: L) -> Self {
        Self::with_binding(ListBinding::new(presenter), list)
    }

    /// Drive `list` from an existing binding.
    pub fn with_binding(binding: ListBinding<P>, list: L) -> Self {
        Self { binding, list }
    }

    /// Run one-time list setup, such as registering view types.
    pub fn configure(&mut self, setup: impl FnOnce(&mut L)) {
        setup(&mut self.list);
        debug!("List configured");
    }

    /// The binding.
    pub fn binding(&self) -> &ListBinding<P> {
        &self.binding
    }

    /// The binding, mutably.
    pub fn binding_mut(&mut self) -> &mut ListBinding<P> {
        &mut self.binding
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        self.binding.presenter()
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        self.binding.presenter_mut()
    }

    /// The list.
    pub fn list(&self) -> &L {
        &self.list
    }

    /// The list, mutably. Structural edits made directly on it bypass the cache.
    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    /// Borrow list and binding together, e.g. to let the list lay itself out.
    pub fn parts_mut(&mut self) -> (&mut L, &mut ListBinding<P>) {
        (&mut self.list, &mut self.binding)
    }

    /// Forward the list's scroll notifications to `observer`.
    pub fn forward_scroll_events<O: ScrollObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        self.binding.forward_scroll_events(observer);
    }

    // === Whole list ===

    /// Drop every cached height and reload the list.
    pub fn reload_all(&mut self) {
        debug!("Reloading all rows");
        self.binding.cache_mut().reset_all();
        self.list.reload_data();
    }

    // === Rows ===

    /// Re-measure and re-render rows.
    pub fn reload_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        debug!(count = addresses.len(), "Reloading rows");
        self.list.begin_updates();
        self.binding.cache_mut().invalidate_rows(addresses);
        self.list.reload_rows(addresses, animation);
        self.list.end_updates();
    }

    /// Remove rows, addressed by pre-edit indices.
    pub fn delete_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        debug!(count = addresses.len(), "Deleting rows");
        self.list.begin_updates();
        self.binding.cache_mut().remove_rows(addresses);
        self.list.delete_rows(addresses, animation);
        self.list.end_updates();
    }

    /// Insert rows, addressed by post-edit indices.
    pub fn insert_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        debug!(count = addresses.len(), "Inserting rows");
        self.list.begin_updates();
        self.binding.cache_mut().insert_rows(addresses);
        self.list.insert_rows(addresses, animation);
        self.list.end_updates();
    }

    /// Move a row, carrying its cached height.
    pub fn move_row(&mut self, from: RowAddress, to: RowAddress) {
        debug!(%from, %to, "Moving row");
        self.list.begin_updates();
        self.binding.cache_mut().move_row(from, to);
        self.list.move_row(from, to);
        self.list.end_updates();
    }

    /// Re-run model configuration on the row's visible cell.
    ///
    /// Heights are left alone; use [`reload_rows`](Self::reload_rows) when the
    /// new content may change the row's height. Off-screen rows are skipped.
    pub fn reconfigure_row(&mut self, address: RowAddress) {
        let Some(cell) = self.list.cell_mut(address) else {
            return;
        };
        if let Err(error) = self.binding.configure_cell(cell, address) {
            report(self.binding.error_policy(), &error);
        }
    }

    // === Sections ===

    /// Reload one section.
    pub fn reload_section(&mut self, section: usize, animation: RowAnimation) {
        self.reload_sections(&[section], animation);
    }

    /// Reset the cached heights of whole sections and have the list re-query them.
    pub fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        debug!(?sections, "Reloading sections");
        self.list.begin_updates();
        self.binding.cache_mut().reset_sections(sections);
        self.list.reload_sections(sections, animation);
        self.list.end_updates();
    }

    /// Remove sections, by pre-edit index.
    pub fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        debug!(?sections, "Deleting sections");
        self.list.begin_updates();
        self.binding.cache_mut().remove_sections(sections);
        self.list.delete_sections(sections, animation);
        self.list.end_updates();
    }

    /// Insert sections, by post-edit index.
    pub fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        debug!(?sections, "Inserting sections");
        self.list.begin_updates();
        self.binding.cache_mut().insert_sections(sections);
        self.list.insert_sections(sections, animation);
        self.list.end_updates();
    }

    /// Move a section, carrying its cached heights.
    pub fn move_section(&mut self, from: usize, to: usize) {
        debug!(from, to, "Moving section");
        self.list.begin_updates();
        self.binding.cache_mut().move_section(from, to);
        self.list.move_section(from, to);
        self.list.end_updates();
    }

    // === Batches ===

    /// Apply a mixed batch of edits inside one update batch.
    ///
    /// The cache is spliced in this order: reloads, row deletions, section
    /// deletions, section insertions, row insertions. The list receives the
    /// same edits in the same order.
    pub fn perform_batch(&mut self, batch: EditBatch, animation: RowAnimation) {
        if batch.is_empty() {
            return;
        }
        debug!(?batch, "Performing edit batch");
        self.list.begin_updates();

        let cache = self.binding.cache_mut();
        cache.invalidate_rows(&batch.reload_rows);
        cache.reset_sections(&batch.reload_sections);
        cache.remove_rows(&batch.delete_rows);
        cache.remove_sections(&batch.delete_sections);
        cache.insert_sections(&batch.insert_sections);
        cache.insert_rows(&batch.insert_rows);

        if !batch.reload_rows.is_empty() {
            self.list.reload_rows(&batch.reload_rows, animation);
        }
        if !batch.reload_sections.is_empty() {
            self.list.reload_sections(&batch.reload_sections, animation);
        }
        if !batch.delete_rows.is_empty() {
            self.list.delete_rows(&batch.delete_rows, animation);
        }
        if !batch.delete_sections.is_empty() {
            self.list.delete_sections(&batch.delete_sections, animation);
        }
        if !batch.insert_sections.is_empty() {
            self.list.insert_sections(&batch.insert_sections, animation);
        }
        if !batch.insert_rows.is_empty() {
            self.list.insert_rows(&batch.insert_rows, animation);
        }

        self.list.end_updates();
    }

    // === Queries ===

    /// Address of the row containing `node`, found by hit-testing the node's
    /// origin in list coordinates.
    pub fn address_for(&self, node: &L::Node) -> Option<RowAddress> {
        let point = self.list.convert_to_list(node)?;
        self.list.address_at(point)
    }

    /// Select a row on the list.
    pub fn select_row(&mut self, address: RowAddress, animated: bool, position: ScrollPosition) {
        self.list.select_row(address, animated, position);
    }
}

impl<P, L> std::fmt::Debug for ListController<P, L>
where
    P: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
