//! Shared fixtures for whitebox tests
//!
//! - [`Fixture`]: a presenter whose content is plain data tests can mutate
//! - [`Tile`]: a configurable view whose natural height is its `f64` model,
//!   counting how often it is measured
//! - [`Plain`]: a view without the configuration capability
//! - [`RecordingList`]: a [`ListView`] that records every call it receives

#![allow(dead_code)]

use crate::list::{ListView, Point, RowAnimation, ScrollPosition};
use crate::model::{Model, RowAddress, RowHeight, SwipeAction, SwipeActions, ViewHeight};
use crate::presenter::ListPresenter;
use crate::view::{ConfigurableView, ListItemView, ModelView, ViewPool};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Identifier [`Tile`] views are registered under.
pub const TILE: &str = "tile";
/// Identifier [`Plain`] views are registered under.
pub const PLAIN: &str = "plain";
/// Natural height of rows built by [`Fixture::shaped`].
pub const DEFAULT_TILE_HEIGHT: f64 = 10.0;

// ===== Views =====

/// Counts `fitting_height` calls across every [`Tile`] a pool creates.
#[derive(Debug, Clone, Default)]
pub struct Probe(Rc<Cell<usize>>);

impl Probe {
    pub fn measurements(&self) -> usize {
        self.0.get()
    }

    fn hit(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Configurable view: the model is its natural height.
#[derive(Debug, Default)]
pub struct Tile {
    pub height: f64,
    probe: Probe,
}

impl ModelView for Tile {
    type Model = f64;

    fn configure(&mut self, model: &f64) {
        self.height = *model;
    }
}

impl ListItemView for Tile {
    fn fitting_height(&mut self, _width: f64) -> f64 {
        self.probe.hit();
        self.height
    }

    fn as_configurable(&mut self) -> Option<&mut dyn ConfigurableView> {
        Some(self)
    }

    fn prepare_for_reuse(&mut self) {
        self.height = 0.0;
    }
}

/// View without model configuration.
#[derive(Debug, Default)]
pub struct Plain;

impl ListItemView for Plain {
    fn fitting_height(&mut self, _width: f64) -> f64 {
        3.0
    }
}

/// Register [`Tile`] and [`Plain`] factories; tiles report to `probe`.
pub fn register_fixture_views(pool: &mut dyn ViewPool, probe: &Probe) {
    let probe = probe.clone();
    pool.register(
        TILE,
        Box::new(move || {
            Box::new(Tile {
                height: 0.0,
                probe: probe.clone(),
            }) as Box<dyn ListItemView>
        }),
    );
    pool.register(PLAIN, Box::new(|| Box::new(Plain) as Box<dyn ListItemView>));
}

// ===== Presenter =====

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRow {
    pub identifier: String,
    pub height: RowHeight,
    pub model: Option<f64>,
    pub leading: Option<SwipeActions>,
    pub trailing: Option<SwipeActions>,
}

impl FixtureRow {
    /// Flexible tile with the given natural height.
    pub fn tile(height: f64) -> Self {
        Self {
            identifier: TILE.to_string(),
            height: RowHeight::Flexible,
            model: Some(height),
            leading: None,
            trailing: None,
        }
    }

    pub fn fixed(height: f64) -> Self {
        Self {
            height: RowHeight::Fixed(height),
            ..Self::tile(height)
        }
    }

    pub fn deletable(mut self) -> Self {
        self.trailing = Some(SwipeActions::new(vec![SwipeAction::destructive("Delete")]));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSupplementary {
    pub identifier: Option<String>,
    pub height: ViewHeight,
    pub model: Option<f64>,
}

impl FixtureSupplementary {
    /// Flexible tile header or footer with the given natural height.
    pub fn tile(height: f64) -> Self {
        Self {
            identifier: Some(TILE.to_string()),
            height: ViewHeight::Flexible,
            model: Some(height),
        }
    }

    pub fn hidden() -> Self {
        Self {
            identifier: None,
            height: ViewHeight::None,
            model: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixtureSection {
    pub rows: Vec<FixtureRow>,
    pub header: Option<FixtureSupplementary>,
    pub footer: Option<FixtureSupplementary>,
}

/// Presenter backed by plain data.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub sections: Vec<FixtureSection>,
    pub selected: Vec<RowAddress>,
    pub deselected: Vec<RowAddress>,
    pub index_titles: Option<Vec<String>>,
}

impl Fixture {
    /// Sections with the given row counts, every row a flexible tile of
    /// [`DEFAULT_TILE_HEIGHT`].
    pub fn shaped(row_counts: &[usize]) -> Self {
        let sections = row_counts
            .iter()
            .map(|&count| FixtureSection {
                rows: vec![FixtureRow::tile(DEFAULT_TILE_HEIGHT); count],
                ..FixtureSection::default()
            })
            .collect();
        Self {
            sections,
            ..Self::default()
        }
    }

    pub fn row(&self, address: RowAddress) -> Option<&FixtureRow> {
        self.sections.get(address.section)?.rows.get(address.row)
    }

    /// # Panics
    ///
    /// Panics if `address` does not exist.
    pub fn row_mut(&mut self, address: RowAddress) -> &mut FixtureRow {
        &mut self.sections[address.section].rows[address.row]
    }

    pub fn row_counts(&self) -> Vec<usize> {
        self.sections.iter().map(|s| s.rows.len()).collect()
    }
}

impl ListPresenter for Fixture {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.rows.len())
    }

    fn row_identifier(&self, address: RowAddress) -> String {
        self.row(address)
            .map_or_else(|| TILE.to_string(), |row| row.identifier.clone())
    }

    fn row_height(&self, address: RowAddress) -> RowHeight {
        self.row(address).map_or(RowHeight::Flexible, |row| row.height)
    }

    fn row_model(&self, address: RowAddress) -> Option<Model> {
        let model = self.row(address)?.model?;
        Some(Box::new(model))
    }

    fn row_did_select(&mut self, address: RowAddress) {
        self.selected.push(address);
    }

    fn row_did_deselect(&mut self, address: RowAddress) {
        self.deselected.push(address);
    }

    fn leading_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions> {
        self.row(address)?.leading.clone()
    }

    fn trailing_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions> {
        self.row(address)?.trailing.clone()
    }

    fn header_identifier(&self, section: usize) -> Option<String> {
        self.sections.get(section)?.header.as_ref()?.identifier.clone()
    }

    fn header_height(&self, section: usize) -> ViewHeight {
        self.sections
            .get(section)
            .and_then(|s| s.header.as_ref())
            .map_or(ViewHeight::Flexible, |h| h.height)
    }

    fn header_model(&self, section: usize) -> Option<Model> {
        let model = self.sections.get(section)?.header.as_ref()?.model?;
        Some(Box::new(model))
    }

    fn footer_identifier(&self, section: usize) -> Option<String> {
        self.sections.get(section)?.footer.as_ref()?.identifier.clone()
    }

    fn footer_height(&self, section: usize) -> ViewHeight {
        self.sections
            .get(section)
            .and_then(|s| s.footer.as_ref())
            .map_or(ViewHeight::Flexible, |f| f.height)
    }

    fn footer_model(&self, section: usize) -> Option<Model> {
        let model = self.sections.get(section)?.footer.as_ref()?.model?;
        Some(Box::new(model))
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        self.index_titles.clone()
    }
}

// ===== List =====

/// One call received by [`RecordingList`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListCall {
    ReloadData,
    BeginUpdates,
    EndUpdates,
    ReloadRows(Vec<RowAddress>),
    DeleteRows(Vec<RowAddress>),
    InsertRows(Vec<RowAddress>),
    MoveRow(RowAddress, RowAddress),
    ReloadSections(Vec<usize>),
    DeleteSections(Vec<usize>),
    InsertSections(Vec<usize>),
    MoveSection(usize, usize),
    SelectRow(RowAddress, bool, ScrollPosition),
}

/// A descendant view of [`RecordingList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeNode {
    pub origin: Point,
    pub attached: bool,
}

/// [`ListView`] that records calls and answers hit tests from a row grid.
///
/// Rows are `row_height` tall, stacked section after section with no headers.
#[derive(Default)]
pub struct RecordingList {
    pub calls: Vec<ListCall>,
    pub animations: Vec<RowAnimation>,
    pub row_counts: Vec<usize>,
    pub row_height: f64,
    pub cells: BTreeMap<RowAddress, Box<dyn ListItemView>>,
}

impl RecordingList {
    pub fn with_grid(row_counts: &[usize], row_height: f64) -> Self {
        Self {
            row_counts: row_counts.to_vec(),
            row_height,
            ..Self::default()
        }
    }

    /// Calls recorded since the last drain.
    pub fn drain(&mut self) -> Vec<ListCall> {
        std::mem::take(&mut self.calls)
    }
}

impl ListView for RecordingList {
    type Node = FakeNode;

    fn reload_data(&mut self) {
        self.calls.push(ListCall::ReloadData);
    }

    fn begin_updates(&mut self) {
        self.calls.push(ListCall::BeginUpdates);
    }

    fn end_updates(&mut self) {
        self.calls.push(ListCall::EndUpdates);
    }

    fn reload_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::ReloadRows(addresses.to_vec()));
    }

    fn delete_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::DeleteRows(addresses.to_vec()));
    }

    fn insert_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::InsertRows(addresses.to_vec()));
    }

    fn move_row(&mut self, from: RowAddress, to: RowAddress) {
        self.calls.push(ListCall::MoveRow(from, to));
    }

    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::ReloadSections(sections.to_vec()));
    }

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::DeleteSections(sections.to_vec()));
    }

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.animations.push(animation);
        self.calls.push(ListCall::InsertSections(sections.to_vec()));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.calls.push(ListCall::MoveSection(from, to));
    }

    fn address_at(&self, point: Point) -> Option<RowAddress> {
        if point.y < 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let mut index = (point.y / self.row_height).floor() as usize;
        for (section, &count) in self.row_counts.iter().enumerate() {
            if index < count {
                return Some(RowAddress::new(section, index));
            }
            index -= count;
        }
        None
    }

    fn convert_to_list(&self, node: &FakeNode) -> Option<Point> {
        node.attached.then_some(node.origin)
    }

    fn select_row(&mut self, address: RowAddress, animated: bool, position: ScrollPosition) {
        self.calls.push(ListCall::SelectRow(address, animated, position));
    }

    fn cell_mut(&mut self, address: RowAddress) -> Option<&mut dyn ListItemView> {
        match self.cells.get_mut(&address) {
            Some(cell) => Some(&mut **cell),
            None => None,
        }
    }
}
