//! Bridge between a [`ListPresenter`] and a list's pull-based callbacks.
//!
//! [`ListSource`] is the callback surface a list drives while laying out:
//! counts, cells, heights, headers, footers, selection and scroll
//! notifications. [`ListBinding`] implements it by combining presenter content
//! with a [`HeightCache`] it owns exclusively.
//!
//! # Count queries resize the cache
//!
//! [`ListSource::number_of_sections`] rebuilds the cache to the presenter's
//! shape and [`ListSource::number_of_rows`] rebuilds one section. Lists must
//! therefore only ask for counts when they (re)load data, never per frame,
//! or every cached height is thrown away.
//!
//! # Measurement
//!
//! Flexible heights are measured by dequeuing and configuring the view exactly
//! as for display, asking it for its fitting height at the list width, and
//! recycling it. A result is cached until the next structural edit touching
//! that slot; hidden headers and footers are never cached.

mod measure;
pub mod scroll;

pub use scroll::{ScrollEvent, ScrollObserver};

use crate::cache::HeightCache;
use crate::config::BindingConfig;
use crate::model::{report, BindingError, ErrorPolicy, RowAddress, SwipeActions, ViewKind};
use crate::presenter::ListPresenter;
use crate::view::{ListItemView, ReusableView, ViewPool};
use scroll::ScrollForwarder;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// What a list lends its source while it asks about content.
pub struct ListContext<'a> {
    /// Pool views are dequeued from and recycled into.
    pub pool: &'a mut dyn ViewPool,
    /// Current list width, the target width for measurement.
    pub width: f64,
}

impl<'a> ListContext<'a> {
    /// Create a context.
    pub fn new(pool: &'a mut dyn ViewPool, width: f64) -> Self {
        Self { pool, width }
    }
}

/// Data source and delegate callbacks a list issues while laying out.
pub trait ListSource {
    /// Number of sections. Resets any cached layout state to the new shape.
    fn number_of_sections(&mut self) -> usize;

    /// Number of rows in `section`. Resets cached state for that section.
    fn number_of_rows(&mut self, section: usize) -> usize;

    /// Dequeue and configure the cell for `address`.
    ///
    /// `None` if the row's identifier was never registered with the pool.
    fn cell_for_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress)
        -> Option<ReusableView>;

    /// Whether the row offers any swipe actions.
    fn can_edit_row(&self, address: RowAddress) -> bool;

    /// Actions revealed by swiping the row from its leading edge.
    fn leading_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions>;

    /// Actions revealed by swiping the row from its trailing edge.
    fn trailing_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions>;

    /// Titles for the section index.
    fn section_index_titles(&self) -> Option<Vec<String>>;

    /// Height estimate for the row, cached after the first computation.
    fn estimated_height_for_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress) -> f64;

    /// Committed height for the row.
    fn height_for_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress) -> f64;

    /// Height estimate for the header of `section`.
    fn estimated_height_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64;

    /// Committed height for the header of `section`.
    fn height_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64;

    /// Dequeue and configure the header of `section`, if it has one.
    fn view_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> Option<ReusableView>;

    /// Height estimate for the footer of `section`.
    fn estimated_height_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64;

    /// Committed height for the footer of `section`.
    fn height_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64;

    /// Dequeue and configure the footer of `section`, if it has one.
    fn view_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> Option<ReusableView>;

    /// The user selected a row.
    fn did_select_row(&mut self, address: RowAddress);

    /// The user deselected a row.
    fn did_deselect_row(&mut self, address: RowAddress);

    /// A scroll notification. Observers may modify the event in place.
    fn scroll_event(&self, event: &mut ScrollEvent);

    /// Whether a scroll-to-top gesture should proceed.
    fn should_scroll_to_top(&self) -> bool;
}

/// Presenter-backed [`ListSource`] with a height cache.
#[derive(Debug)]
pub struct ListBinding<P> {
    presenter: P,
    cache: HeightCache,
    scroll: ScrollForwarder,
    error_policy: ErrorPolicy,
}

impl<P: ListPresenter> ListBinding<P> {
    /// Bind `presenter` with the build's default [`ErrorPolicy`].
    pub fn new(presenter: P) -> Self {
        Self::with_error_policy(presenter, ErrorPolicy::default())
    }

    /// Bind `presenter`, surfacing programmer errors according to `error_policy`.
    pub fn with_error_policy(presenter: P, error_policy: ErrorPolicy) -> Self {
        Self {
            presenter,
            cache: HeightCache::new(),
            scroll: ScrollForwarder::default(),
            error_policy,
        }
    }

    /// Bind `presenter` with the error policy resolved from configuration.
    pub fn from_config(presenter: P, config: &BindingConfig) -> Self {
        Self::with_error_policy(presenter, config.error_policy)
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably. Structural changes must go through the edit
    /// coordinator so the cache follows.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The height cache.
    pub fn cache(&self) -> &HeightCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut HeightCache {
        &mut self.cache
    }

    /// Active error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Forward scroll notifications to `observer`, replacing any previous one.
    ///
    /// The observer is held weakly; once it is dropped, notifications are
    /// dropped again.
    pub fn forward_scroll_events<O: ScrollObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        self.scroll.set(observer);
    }

    /// Stop forwarding scroll notifications.
    pub fn stop_scroll_events(&mut self) {
        self.scroll.clear();
    }

    /// Configure `view` with the row's model. No model leaves the view untouched.
    ///
    /// # Errors
    ///
    /// [`BindingError::NotConfigurable`] or [`BindingError::ModelMismatch`].
    pub fn configure_cell(
        &self,
        view: &mut dyn ListItemView,
        address: RowAddress,
    ) -> Result<(), BindingError> {
        match self.presenter.row_model(address) {
            Some(model) => configure(view, ViewKind::Cell, &*model),
            None => Ok(()),
        }
    }

    /// Configure `view` with the header model of `section`.
    ///
    /// # Errors
    ///
    /// [`BindingError::NotConfigurable`] or [`BindingError::ModelMismatch`].
    pub fn configure_header(
        &self,
        view: &mut dyn ListItemView,
        section: usize,
    ) -> Result<(), BindingError> {
        match self.presenter.header_model(section) {
            Some(model) => configure(view, ViewKind::Header, &*model),
            None => Ok(()),
        }
    }

    /// Configure `view` with the footer model of `section`.
    ///
    /// # Errors
    ///
    /// [`BindingError::NotConfigurable`] or [`BindingError::ModelMismatch`].
    pub fn configure_footer(
        &self,
        view: &mut dyn ListItemView,
        section: usize,
    ) -> Result<(), BindingError> {
        match self.presenter.footer_model(section) {
            Some(model) => configure(view, ViewKind::Footer, &*model),
            None => Ok(()),
        }
    }

    /// Dequeue a header or footer view and configure it, reporting failures.
    fn supplementary_view(
        &self,
        cx: &mut ListContext<'_>,
        kind: ViewKind,
        section: usize,
    ) -> Option<ReusableView> {
        let identifier = match kind {
            ViewKind::Footer => self.presenter.footer_identifier(section)?,
            _ => self.presenter.header_identifier(section)?,
        };
        let Some(mut view) = cx.pool.dequeue_supplementary(&identifier) else {
            report(self.error_policy, &BindingError::Unregistered { kind, identifier });
            return None;
        };
        let configured = match kind {
            ViewKind::Footer => self.configure_footer(view.view_mut(), section),
            _ => self.configure_header(view.view_mut(), section),
        };
        if let Err(error) = configured {
            report(self.error_policy, &error);
        }
        Some(view)
    }
}

/// Hand an untyped model to a view's configuration capability.
fn configure(view: &mut dyn ListItemView, kind: ViewKind, model: &dyn Any) -> Result<(), BindingError> {
    let name = view.view_name();
    match view.as_configurable() {
        Some(configurable) => configurable.configure_any(model),
        None => Err(BindingError::NotConfigurable { kind, view: name }),
    }
}

impl<P: ListPresenter> ListSource for ListBinding<P> {
    fn number_of_sections(&mut self) -> usize {
        let count = self.presenter.section_count();
        self.cache.resize_sections(count);
        for section in 0..count {
            let rows = self.presenter.row_count(section);
            self.cache.resize_rows(section, rows);
        }
        debug!(sections = count, "Height cache resized to presenter shape");
        count
    }

    fn number_of_rows(&mut self, section: usize) -> usize {
        let count = self.presenter.row_count(section);
        self.cache.resize_rows(section, count);
        count
    }

    fn cell_for_row(
        &mut self,
        cx: &mut ListContext<'_>,
        address: RowAddress,
    ) -> Option<ReusableView> {
        let identifier = self.presenter.row_identifier(address);
        let Some(mut cell) = cx.pool.dequeue_cell(&identifier, address) else {
            report(
                self.error_policy,
                &BindingError::Unregistered {
                    kind: ViewKind::Cell,
                    identifier,
                },
            );
            return None;
        };
        if let Err(error) = self.configure_cell(cell.view_mut(), address) {
            report(self.error_policy, &error);
        }
        Some(cell)
    }

    fn can_edit_row(&self, address: RowAddress) -> bool {
        let offers = |actions: Option<SwipeActions>| actions.is_some_and(|a| !a.is_empty());
        offers(self.presenter.leading_swipe_actions(address))
            || offers(self.presenter.trailing_swipe_actions(address))
    }

    fn leading_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions> {
        self.presenter.leading_swipe_actions(address)
    }

    fn trailing_swipe_actions(&self, address: RowAddress) -> Option<SwipeActions> {
        self.presenter.trailing_swipe_actions(address)
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        self.presenter.section_index_titles()
    }

    fn estimated_height_for_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress) -> f64 {
        self.estimate_row(cx, address)
    }

    fn height_for_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress) -> f64 {
        self.estimate_row(cx, address)
    }

    fn estimated_height_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64 {
        self.estimate_supplementary(cx, ViewKind::Header, section)
    }

    fn height_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64 {
        self.estimate_supplementary(cx, ViewKind::Header, section)
    }

    fn view_for_header(&mut self, cx: &mut ListContext<'_>, section: usize) -> Option<ReusableView> {
        self.supplementary_view(cx, ViewKind::Header, section)
    }

    fn estimated_height_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64 {
        self.estimate_supplementary(cx, ViewKind::Footer, section)
    }

    fn height_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> f64 {
        self.estimate_supplementary(cx, ViewKind::Footer, section)
    }

    fn view_for_footer(&mut self, cx: &mut ListContext<'_>, section: usize) -> Option<ReusableView> {
        self.supplementary_view(cx, ViewKind::Footer, section)
    }

    fn did_select_row(&mut self, address: RowAddress) {
        self.presenter.row_did_select(address);
    }

    fn did_deselect_row(&mut self, address: RowAddress) {
        self.presenter.row_did_deselect(address);
    }

    fn scroll_event(&self, event: &mut ScrollEvent) {
        self.scroll.forward(event);
    }

    fn should_scroll_to_top(&self) -> bool {
        self.scroll.should_scroll_to_top()
    }
}

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
