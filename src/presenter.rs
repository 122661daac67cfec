//! Presenter contract consumed by the binding layer.
//!
//! A presenter owns list content and policy independently of any rendering
//! toolkit. Only counts, identifiers and models are required; everything else
//! has a default so a minimal presenter stays small:
//!
//! - one section
//! - rows measured as [`RowHeight::Flexible`]
//! - no headers, no footers, no swipe actions, no section index
//! - selection callbacks ignored

use crate::model::{Model, RowAddress, RowHeight, SwipeActions, ViewHeight};

/// Content and policy provider for a sectioned list.
pub trait ListPresenter {
    /// Number of sections.
    fn section_count(&self) -> usize {
        1
    }

    /// Number of rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Reuse identifier of the view that displays the row.
    fn row_identifier(&self, address: RowAddress) -> String;

    /// Height policy for the row.
    fn row_height(&self, _address: RowAddress) -> RowHeight {
        RowHeight::Flexible
    }

    /// Model the row's view is configured with. `None` leaves the view as dequeued.
    fn row_model(&self, address: RowAddress) -> Option<Model>;

    /// Called after the user selects a row.
    fn row_did_select(&mut self, _address: RowAddress) {}

    /// Called after the user deselects a row.
    fn row_did_deselect(&mut self, _address: RowAddress) {}

    /// Actions revealed by swiping from the leading edge.
    fn leading_swipe_actions(&self, _address: RowAddress) -> Option<SwipeActions> {
        None
    }

    /// Actions revealed by swiping from the trailing edge.
    fn trailing_swipe_actions(&self, _address: RowAddress) -> Option<SwipeActions> {
        None
    }

    /// Reuse identifier of the section header view, `None` for no header.
    fn header_identifier(&self, _section: usize) -> Option<String> {
        None
    }

    /// Height policy for the section header.
    fn header_height(&self, _section: usize) -> ViewHeight {
        ViewHeight::Flexible
    }

    /// Model for the section header view.
    fn header_model(&self, _section: usize) -> Option<Model> {
        None
    }

    /// Reuse identifier of the section footer view, `None` for no footer.
    fn footer_identifier(&self, _section: usize) -> Option<String> {
        None
    }

    /// Height policy for the section footer.
    fn footer_height(&self, _section: usize) -> ViewHeight {
        ViewHeight::Flexible
    }

    /// Model for the section footer view.
    fn footer_model(&self, _section: usize) -> Option<Model> {
        None
    }

    /// Titles for the list's section index.
    fn section_index_titles(&self) -> Option<Vec<String>> {
        None
    }
}
