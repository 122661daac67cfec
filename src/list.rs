//! Physical list contract driven by the edit coordinator.
//!
//! A [`ListView`] is the stateful, virtualized widget that owns the visual
//! index space. The coordinator replays every structural edit on the height
//! cache first and then on the list, bracketing multi-step edits with
//! [`ListView::begin_updates`] and [`ListView::end_updates`].

use crate::model::RowAddress;
use crate::view::ListItemView;

/// A point in list content or viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Check if `point` lies inside. The bottom and right edges are exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y < self.max_y()
    }
}

/// Animation hint for structural edits. Timing is up to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnimation {
    /// Cross-fade.
    Fade,
    /// Slide toward the right edge.
    Right,
    /// Slide toward the left edge.
    Left,
    /// Slide toward the top.
    Top,
    /// Slide toward the bottom.
    Bottom,
    /// No animation.
    None,
    /// Collapse toward the middle.
    Middle,
    /// Let the list pick.
    #[default]
    Automatic,
}

/// Where a selected row ends up after scrolling it into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    /// Do not scroll.
    #[default]
    None,
    /// Align the row with the top of the viewport.
    Top,
    /// Center the row in the viewport.
    Middle,
    /// Align the row with the bottom of the viewport.
    Bottom,
}

/// The physical list the coordinator keeps in step with the height cache.
pub trait ListView {
    /// Descendant view type that [`convert_to_list`](Self::convert_to_list) accepts.
    type Node: ?Sized;

    /// Discard all layout and re-query every count, height and cell.
    fn reload_data(&mut self);

    /// Open an update batch. Batches nest; edits apply when the outermost closes.
    fn begin_updates(&mut self);

    /// Close an update batch.
    fn end_updates(&mut self);

    /// Re-measure and re-render rows without changing counts.
    fn reload_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation);

    /// Remove rows, addressed by pre-edit indices.
    fn delete_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation);

    /// Insert rows, addressed by post-edit indices.
    fn insert_rows(&mut self, addresses: &[RowAddress], animation: RowAnimation);

    /// Move one row.
    fn move_row(&mut self, from: RowAddress, to: RowAddress);

    /// Re-query counts and heights for whole sections.
    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Remove sections, by pre-edit index.
    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Insert sections, by post-edit index.
    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Move one section.
    fn move_section(&mut self, from: usize, to: usize);

    /// Row under `point`, in list content coordinates.
    fn address_at(&self, point: Point) -> Option<RowAddress>;

    /// Convert the origin of a descendant `node` into list content coordinates.
    ///
    /// `None` if the node is not inside the list.
    fn convert_to_list(&self, node: &Self::Node) -> Option<Point>;

    /// Select a row, optionally scrolling it to `position`.
    fn select_row(&mut self, address: RowAddress, animated: bool, position: ScrollPosition);

    /// The realized cell displaying `address`, if it is on screen.
    fn cell_mut(&mut self, address: RowAddress) -> Option<&mut dyn ListItemView>;
}
