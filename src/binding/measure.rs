//! Height estimation paths for rows, headers and footers
//!
//! Each path first returns a cached measurement. Otherwise it applies the
//! presenter's policy:
//!
//! | Policy     | Result                         | Cached |
//! |------------|--------------------------------|--------|
//! | `Fixed(v)` | `v` (negative clamps to 0)     | yes    |
//! | `Flexible` | the view's fitting height      | yes    |
//! | `None`     | 0                              | no     |
//!
//! A flexible item whose view cannot be produced (no header identifier, or an
//! unregistered identifier) measures as 0 and is not cached, so it is retried
//! after the registration problem is fixed.

use super::{ListBinding, ListContext, ListSource};
use crate::model::{Height, RowAddress, RowHeight, ViewHeight, ViewKind};
use crate::presenter::ListPresenter;
use crate::view::ReusableView;
use tracing::trace;

impl<P: ListPresenter> ListBinding<P> {
    pub(super) fn estimate_row(&mut self, cx: &mut ListContext<'_>, address: RowAddress) -> f64 {
        if let Some(Height::Measured(height)) = self.cache.row_height(address) {
            return height;
        }

        let height = match self.presenter.row_height(address) {
            RowHeight::Fixed(height) => height.max(0.0),
            RowHeight::Flexible => {
                let Some(cell) = self.cell_for_row(cx, address) else {
                    return 0.0;
                };
                let height = fit(cx, cell);
                trace!(section = address.section, row = address.row, height, "Measured row");
                height
            }
        };
        self.cache.set_row_height(address, height);
        height
    }

    pub(super) fn estimate_supplementary(
        &mut self,
        cx: &mut ListContext<'_>,
        kind: ViewKind,
        section: usize,
    ) -> f64 {
        let cached = match kind {
            ViewKind::Footer => self.cache.footer_height(section),
            _ => self.cache.header_height(section),
        };
        if let Some(Height::Measured(height)) = cached {
            return height;
        }

        let policy = match kind {
            ViewKind::Footer => self.presenter.footer_height(section),
            _ => self.presenter.header_height(section),
        };
        let height = match policy {
            ViewHeight::None => return 0.0,
            ViewHeight::Fixed(height) => height.max(0.0),
            ViewHeight::Flexible => {
                let Some(view) = self.supplementary_view(cx, kind, section) else {
                    return 0.0;
                };
                let height = fit(cx, view);
                trace!(%kind, section, height, "Measured supplementary view");
                height
            }
        };
        match kind {
            ViewKind::Footer => self.cache.set_footer_height(section, height),
            _ => self.cache.set_header_height(section, height),
        };
        height
    }
}

/// Resolve the view's natural height at the list width and hand it back to the pool.
fn fit(cx: &mut ListContext<'_>, mut view: ReusableView) -> f64 {
    let height = view.view_mut().fitting_height(cx.width).max(0.0);
    cx.pool.recycle(view);
    height
}
