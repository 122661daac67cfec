//! listbind
//!
//! Data-binding layer between an application's list content and a
//! virtualized list view.
//!
//! - A [`ListPresenter`] describes sections, rows, headers and footers.
//! - A [`ListBinding`] answers the list's data-source and delegate queries,
//!   measuring self-sizing items once and caching their heights in a
//!   [`HeightCache`].
//! - A [`ListController`] applies structural edits to the cache and the list
//!   together so the two index spaces never drift apart.
//! - [`VirtualList`] is a toolkit-free [`ListView`] that lays items out,
//!   realizes only the visible ones and forwards scroll events.
//!
//! Everything is single-threaded and synchronous.

pub mod binding;
pub mod cache;
pub mod config;
pub mod controller;
pub mod list;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod view;
pub mod virtual_list;

pub use binding::{ListBinding, ListContext, ListSource, ScrollEvent, ScrollObserver};
pub use cache::HeightCache;
pub use config::BindingConfig;
pub use controller::{EditBatch, ListController};
pub use list::{ListView, Point, Rect, RowAnimation, ScrollPosition, Size};
pub use model::{
    BindingError, ErrorPolicy, Height, Model, RowAddress, RowHeight, SwipeAction, SwipeActions,
    ViewHeight,
};
pub use presenter::ListPresenter;
pub use view::{
    ConfigurableView, IdentifiableView, ListItemView, ModelView, ReusableView, TextView,
    ViewPool, ViewPoolExt, ViewRegistry,
};
pub use virtual_list::{ItemKind, SwipeEdge, VirtualList};

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
