//! Domain model shared by the cache, the bridge and the edit coordinator.

pub mod actions;
pub mod address;
pub mod error;
pub mod height;

pub use actions::{ActionStyle, SwipeAction, SwipeActions};
pub use address::RowAddress;
pub use error::{report, BindingError, ErrorPolicy, ViewKind};
pub use height::{Height, RowHeight, ViewHeight};

/// Untyped model handed from a presenter to a configurable view.
pub type Model = Box<dyn std::any::Any>;
