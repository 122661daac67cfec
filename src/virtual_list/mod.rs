//! VirtualList - toolkit-free reference implementation of [`ListView`]
//!
//! Keeps a structural snapshot (row count per section), pulls heights from a
//! [`ListSource`] on [`layout`](VirtualList::layout), stacks items top to
//! bottom (header, rows, footer per section) and realizes views only for items
//! that intersect the viewport. Realized views are recycled into the list's
//! own [`ViewRegistry`] on the next layout.
//!
//! # Count queries
//!
//! Section and row counts are queried only after [`ListView::reload_data`]
//! (all sections) or for sections that were inserted or reloaded since the
//! last layout. Row edits are spliced into the snapshot locally, so every
//! other layout pass reads heights straight from the source's cache.
//!
//! # Coordinates
//!
//! Item geometry lives in content coordinates; realized frames and
//! [`Node`](ListView::Node) points are viewport coordinates, offset by the
//! current scroll position.

use crate::binding::{ListContext, ListSource, ScrollEvent};
use crate::list::{ListView, Point, Rect, RowAnimation, ScrollPosition, Size};
use crate::model::{RowAddress, SwipeActions};
use crate::view::{ListItemView, ReusableView, ViewPool, ViewRegistry};
use std::fmt;
use tracing::{debug, trace};

/// Distance, in milliseconds of travel at release velocity, that a drag
/// projects its deceleration target.
const DECELERATION_PROJECTION_MS: f64 = 200.0;

/// What a laid-out item displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Section header.
    Header(usize),
    /// Row cell.
    Row(RowAddress),
    /// Section footer.
    Footer(usize),
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(section) => write!(f, "header {section}"),
            Self::Row(address) => write!(f, "row {address}"),
            Self::Footer(section) => write!(f, "footer {section}"),
        }
    }
}

/// Which edge a swipe starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEdge {
    /// Leading edge.
    Leading,
    /// Trailing edge.
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LaidOutItem {
    kind: ItemKind,
    top: f64,
    height: f64,
}

impl LaidOutItem {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug)]
struct VisibleItem {
    kind: ItemKind,
    frame: Rect,
    view: ReusableView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SectionSlot {
    rows: usize,
    /// Row count must be re-queried on the next layout.
    stale: bool,
}

impl SectionSlot {
    fn stale() -> Self {
        Self {
            rows: 0,
            stale: true,
        }
    }
}

/// A virtualized list over any [`ListSource`].
pub struct VirtualList {
    pool: ViewRegistry,
    viewport: Size,
    offset: f64,
    sections: Vec<SectionSlot>,
    needs_reload: bool,
    needs_layout: bool,
    update_depth: usize,
    items: Vec<LaidOutItem>,
    content_height: f64,
    visible: Vec<VisibleItem>,
    selected: Option<RowAddress>,
    pending_scroll: Option<(RowAddress, ScrollPosition)>,
}

impl VirtualList {
    /// Create an empty list showing `viewport`. The first layout loads all data.
    pub fn new(viewport: Size) -> Self {
        Self {
            pool: ViewRegistry::new(),
            viewport,
            offset: 0.0,
            sections: Vec::new(),
            needs_reload: true,
            needs_layout: true,
            update_depth: 0,
            items: Vec::new(),
            content_height: 0.0,
            visible: Vec::new(),
            selected: None,
            pending_scroll: None,
        }
    }

    // === Accessors ===

    /// The list's view pool.
    pub fn pool(&self) -> &ViewRegistry {
        &self.pool
    }

    /// The list's view pool, for registering view types.
    pub fn pool_mut(&mut self) -> &mut ViewRegistry {
        &mut self.pool
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport.
    ///
    /// Cached heights were measured at the old width; call
    /// `ListController::reload_all` after a width change.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.needs_layout = true;
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Total height of all laid-out items.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Check if an edit or reload is waiting for the next layout.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout || self.needs_reload
    }

    /// Row count per section as of the last layout and local edits.
    pub fn row_counts(&self) -> Vec<usize> {
        self.sections.iter().map(|slot| slot.rows).collect()
    }

    /// Currently selected row.
    pub fn selected(&self) -> Option<RowAddress> {
        self.selected
    }

    /// Rows with a realized cell, top to bottom.
    pub fn visible_rows(&self) -> Vec<RowAddress> {
        self.visible
            .iter()
            .filter_map(|item| match item.kind {
                ItemKind::Row(address) => Some(address),
                _ => None,
            })
            .collect()
    }

    /// Viewport frame of a realized row.
    pub fn frame_of(&self, address: RowAddress) -> Option<Rect> {
        self.visible
            .iter()
            .find(|item| item.kind == ItemKind::Row(address))
            .map(|item| item.frame)
    }

    fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport.height).max(0.0)
    }

    fn contains(&self, address: RowAddress) -> bool {
        self.sections
            .get(address.section)
            .is_some_and(|slot| address.row < slot.rows)
    }

    // === Layout ===

    /// Re-query whatever is stale, restack all items and realize the visible ones.
    pub fn layout(&mut self, source: &mut dyn ListSource) {
        self.sync_counts(source);
        self.recycle_visible();

        let mut cx = ListContext::new(&mut self.pool, self.viewport.width);
        self.items.clear();
        let mut top = 0.0;
        for (section, slot) in self.sections.iter().enumerate() {
            let height = source.height_for_header(&mut cx, section);
            if height > 0.0 {
                self.items.push(LaidOutItem {
                    kind: ItemKind::Header(section),
                    top,
                    height,
                });
                top += height;
            }
            for row in 0..slot.rows {
                let address = RowAddress::new(section, row);
                let height = source.height_for_row(&mut cx, address);
                self.items.push(LaidOutItem {
                    kind: ItemKind::Row(address),
                    top,
                    height,
                });
                top += height;
            }
            let height = source.height_for_footer(&mut cx, section);
            if height > 0.0 {
                self.items.push(LaidOutItem {
                    kind: ItemKind::Footer(section),
                    top,
                    height,
                });
                top += height;
            }
        }
        self.content_height = top;
        self.needs_layout = false;

        let target = self
            .pending_scroll
            .take()
            .and_then(|(address, position)| self.offset_for(address, position))
            .unwrap_or(self.offset);
        self.move_offset(target, source);
        self.realize(source);
        trace!(
            items = self.items.len(),
            visible = self.visible.len(),
            content_height = self.content_height,
            "Laid out list"
        );
    }

    fn sync_counts(&mut self, source: &mut dyn ListSource) {
        if self.needs_reload {
            let count = source.number_of_sections();
            self.sections = (0..count)
                .map(|section| SectionSlot {
                    rows: source.number_of_rows(section),
                    stale: false,
                })
                .collect();
            self.needs_reload = false;
            debug!(sections = count, "Reloaded list data");
            return;
        }
        for (section, slot) in self.sections.iter_mut().enumerate() {
            if slot.stale {
                slot.rows = source.number_of_rows(section);
                slot.stale = false;
            }
        }
    }

    fn recycle_visible(&mut self) {
        for item in self.visible.drain(..) {
            self.pool.recycle(item.view);
        }
    }

    /// Realize views for items intersecting the viewport.
    fn realize(&mut self, source: &mut dyn ListSource) {
        self.recycle_visible();
        let top = self.offset;
        let bottom = top + self.viewport.height;
        let start = self.items.partition_point(|item| item.bottom() <= top);
        let end = self.items.partition_point(|item| item.top < bottom);

        let mut cx = ListContext::new(&mut self.pool, self.viewport.width);
        for item in self.items.get(start..end).unwrap_or_default() {
            if item.height <= 0.0 {
                continue;
            }
            let view = match item.kind {
                ItemKind::Header(section) => source.view_for_header(&mut cx, section),
                ItemKind::Row(address) => source.cell_for_row(&mut cx, address),
                ItemKind::Footer(section) => source.view_for_footer(&mut cx, section),
            };
            if let Some(view) = view {
                self.visible.push(VisibleItem {
                    kind: item.kind,
                    frame: Rect::new(0.0, item.top - top, self.viewport.width, item.height),
                    view,
                });
            }
        }
    }

    /// Scroll offset that puts `address` at `position`, if it is laid out.
    fn offset_for(&self, address: RowAddress, position: ScrollPosition) -> Option<f64> {
        let item = self
            .items
            .iter()
            .find(|item| item.kind == ItemKind::Row(address))?;
        let offset = match position {
            ScrollPosition::None => return None,
            ScrollPosition::Top => item.top,
            ScrollPosition::Middle => item.top - (self.viewport.height - item.height) / 2.0,
            ScrollPosition::Bottom => item.bottom() - self.viewport.height,
        };
        Some(offset.clamp(0.0, self.max_offset()))
    }

    /// Laid-out item containing content coordinate `y`.
    fn item_at(&self, y: f64) -> Option<&LaidOutItem> {
        if y < 0.0 {
            return None;
        }
        let index = self.items.partition_point(|item| item.bottom() <= y);
        self.items.get(index).filter(|item| item.top <= y)
    }

    // === Interaction ===

    /// Tap at a viewport point: select the row under it.
    ///
    /// A different previously selected row is deselected first. Returns the
    /// selected row.
    pub fn tap(&mut self, point: Point, source: &mut dyn ListSource) -> Option<RowAddress> {
        let address = self.address_at(Point::new(point.x, point.y + self.offset))?;
        if let Some(previous) = self.selected.filter(|&previous| previous != address) {
            source.did_deselect_row(previous);
        }
        self.selected = Some(address);
        source.did_select_row(address);
        Some(address)
    }

    /// Deselect the current row, if any, notifying the source.
    pub fn clear_selection(&mut self, source: &mut dyn ListSource) {
        if let Some(previous) = self.selected.take() {
            source.did_deselect_row(previous);
        }
    }

    /// Scroll to `offset`, clamped to the content, and report it.
    pub fn scroll_to(&mut self, offset: f64, source: &mut dyn ListSource) {
        if self.move_offset(offset, source) {
            self.realize(source);
        }
    }

    /// Clamp and apply `offset`, announcing it when it changed.
    fn move_offset(&mut self, offset: f64, source: &mut dyn ListSource) -> bool {
        let offset = offset.clamp(0.0, self.max_offset());
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        source.scroll_event(&mut ScrollEvent::DidScroll {
            offset: Point::new(0.0, offset),
        });
        true
    }

    /// Drag the content by `translation` and release it at `velocity`.
    ///
    /// The observer may move the deceleration target while handling
    /// [`ScrollEvent::WillEndDragging`].
    pub fn drag(&mut self, translation: f64, velocity: f64, source: &mut dyn ListSource) {
        source.scroll_event(&mut ScrollEvent::WillBeginDragging);
        self.scroll_to(self.offset - translation, source);

        let projected = self.offset - velocity * DECELERATION_PROJECTION_MS;
        let mut event = ScrollEvent::WillEndDragging {
            velocity: Point::new(0.0, velocity),
            target_offset: Point::new(0.0, projected),
        };
        source.scroll_event(&mut event);
        let target = match event {
            ScrollEvent::WillEndDragging { target_offset, .. } => target_offset.y,
            _ => projected,
        }
        .clamp(0.0, self.max_offset());

        let will_decelerate = target != self.offset;
        source.scroll_event(&mut ScrollEvent::DidEndDragging { will_decelerate });
        if will_decelerate {
            source.scroll_event(&mut ScrollEvent::WillBeginDecelerating);
            self.scroll_to(target, source);
            source.scroll_event(&mut ScrollEvent::DidEndDecelerating);
        }
    }

    /// Scroll-to-top gesture. Returns whether the source allowed it.
    pub fn scroll_to_top(&mut self, source: &mut dyn ListSource) -> bool {
        if !source.should_scroll_to_top() {
            return false;
        }
        self.scroll_to(0.0, source);
        source.scroll_event(&mut ScrollEvent::DidScrollToTop);
        true
    }

    /// Swipe actions for a row, offered only for rows the source marks editable.
    pub fn swipe_actions(
        &self,
        address: RowAddress,
        edge: SwipeEdge,
        source: &dyn ListSource,
    ) -> Option<SwipeActions> {
        if !self.contains(address) || !source.can_edit_row(address) {
            return None;
        }
        match edge {
            SwipeEdge::Leading => source.leading_swipe_actions(address),
            SwipeEdge::Trailing => source.trailing_swipe_actions(address),
        }
    }

    // === Snapshot edits ===

    fn remove_row_slot(&mut self, address: RowAddress) -> bool {
        let Some(slot) = self.sections.get_mut(address.section) else {
            return false;
        };
        if address.row >= slot.rows {
            return false;
        }
        slot.rows -= 1;
        self.selected = match self.selected {
            Some(selected) if selected == address => None,
            Some(selected) if selected.section == address.section && selected.row > address.row => {
                Some(RowAddress::new(selected.section, selected.row - 1))
            }
            other => other,
        };
        true
    }

    fn insert_row_slot(&mut self, address: RowAddress) {
        let Some(slot) = self.sections.get_mut(address.section) else {
            return;
        };
        if address.row > slot.rows {
            return;
        }
        slot.rows += 1;
        if let Some(selected) = self.selected.as_mut() {
            if selected.section == address.section && selected.row >= address.row {
                selected.row += 1;
            }
        }
    }

    fn touched(&mut self) {
        self.needs_layout = true;
    }
}

impl ListView for VirtualList {
    type Node = Point;

    fn reload_data(&mut self) {
        self.needs_reload = true;
        self.needs_layout = true;
        self.selected = None;
        self.pending_scroll = None;
    }

    fn begin_updates(&mut self) {
        self.update_depth += 1;
    }

    fn end_updates(&mut self) {
        self.update_depth = self.update_depth.saturating_sub(1);
        if self.update_depth == 0 {
            self.touched();
        }
    }

    fn reload_rows(&mut self, _addresses: &[RowAddress], _animation: RowAnimation) {
        self.touched();
    }

    fn delete_rows(&mut self, addresses: &[RowAddress], _animation: RowAnimation) {
        let mut sorted = addresses.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for address in sorted {
            self.remove_row_slot(address);
        }
        self.touched();
    }

    fn insert_rows(&mut self, addresses: &[RowAddress], _animation: RowAnimation) {
        let mut sorted = addresses.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for address in sorted {
            self.insert_row_slot(address);
        }
        self.touched();
    }

    fn move_row(&mut self, from: RowAddress, to: RowAddress) {
        let was_selected = self.selected == Some(from);
        if self.remove_row_slot(from) {
            self.insert_row_slot(to);
            if was_selected && self.contains(to) {
                self.selected = Some(to);
            }
        }
        self.touched();
    }

    fn reload_sections(&mut self, sections: &[usize], _animation: RowAnimation) {
        for &section in sections {
            if let Some(slot) = self.sections.get_mut(section) {
                slot.stale = true;
            }
            if self.selected.is_some_and(|selected| selected.section == section) {
                self.selected = None;
            }
        }
        self.touched();
    }

    fn delete_sections(&mut self, sections: &[usize], _animation: RowAnimation) {
        let mut sorted = sections.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for section in sorted {
            if section >= self.sections.len() {
                continue;
            }
            self.sections.remove(section);
            self.selected = match self.selected {
                Some(selected) if selected.section == section => None,
                Some(selected) if selected.section > section => {
                    Some(RowAddress::new(selected.section - 1, selected.row))
                }
                other => other,
            };
        }
        self.touched();
    }

    fn insert_sections(&mut self, sections: &[usize], _animation: RowAnimation) {
        let mut sorted = sections.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for section in sorted {
            if section > self.sections.len() {
                continue;
            }
            self.sections.insert(section, SectionSlot::stale());
            if let Some(selected) = self.selected.as_mut() {
                if selected.section >= section {
                    selected.section += 1;
                }
            }
        }
        self.touched();
    }

    fn move_section(&mut self, from: usize, to: usize) {
        let len = self.sections.len();
        if from < len && to < len {
            let slot = self.sections.remove(from);
            self.sections.insert(to, slot);
            if let Some(selected) = self.selected.as_mut() {
                let section = selected.section;
                if section == from {
                    selected.section = to;
                } else if from < to && section > from && section <= to {
                    selected.section -= 1;
                } else if to < from && section >= to && section < from {
                    selected.section += 1;
                }
            }
        }
        self.touched();
    }

    fn address_at(&self, point: Point) -> Option<RowAddress> {
        if point.x < 0.0 || point.x >= self.viewport.width {
            return None;
        }
        match self.item_at(point.y)?.kind {
            ItemKind::Row(address) => Some(address),
            _ => None,
        }
    }

    fn convert_to_list(&self, node: &Point) -> Option<Point> {
        let frame = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        frame
            .contains(*node)
            .then(|| Point::new(node.x, node.y + self.offset))
    }

    fn select_row(&mut self, address: RowAddress, _animated: bool, position: ScrollPosition) {
        if !self.contains(address) {
            return;
        }
        self.selected = Some(address);
        if position == ScrollPosition::None {
            return;
        }
        // Applied and announced by the next layout.
        self.pending_scroll = Some((address, position));
        self.needs_layout = true;
    }

    fn cell_mut(&mut self, address: RowAddress) -> Option<&mut dyn ListItemView> {
        let item = self
            .visible
            .iter_mut()
            .find(|item| item.kind == ItemKind::Row(address))?;
        Some(item.view.view_mut())
    }
}

impl fmt::Display for VirtualList {
    /// One line per realized item: kind, viewport frame and view type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.visible {
            let name = item.view.view().view_name();
            let name = name.rsplit("::").next().unwrap_or(name);
            writeln!(
                f,
                "{} y={} h={} {}",
                item.kind, item.frame.origin.y, item.frame.size.height, name
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for VirtualList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("viewport", &self.viewport)
            .field("offset", &self.offset)
            .field("row_counts", &self.row_counts())
            .field("content_height", &self.content_height)
            .field("visible", &self.visible_rows())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "virtual_list_tests.rs"]
mod tests;
