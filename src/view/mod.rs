//! View capabilities the binding layer relies on.
//!
//! Views are toolkit objects; the binding layer only needs three things from
//! them:
//!
//! - measuring: [`ListItemView::fitting_height`]
//! - receiving a model: [`ConfigurableView`], normally obtained for free by
//!   implementing the typed [`ModelView`]
//! - a reuse identifier: [`IdentifiableView`]

pub mod pool;
pub mod text;

pub use pool::{ReusableView, ViewFactory, ViewPool, ViewPoolExt, ViewRegistry};
pub use text::TextView;

use crate::model::BindingError;
use std::any::{type_name, Any};

/// A recyclable view displayed for a row, header or footer.
pub trait ListItemView {
    /// Resolve the view's natural height for `width` with unconstrained height.
    fn fitting_height(&mut self, width: f64) -> f64;

    /// Model configuration capability, if the view has one.
    ///
    /// Views implementing [`ModelView`] return `Some(self)`.
    fn as_configurable(&mut self) -> Option<&mut dyn ConfigurableView> {
        None
    }

    /// Reset transient state before the view is handed out again.
    fn prepare_for_reuse(&mut self) {}

    /// Type name used in diagnostics.
    fn view_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Untyped model configuration at the presenter boundary.
pub trait ConfigurableView {
    /// Check if `model` has the type this view expects.
    fn accepts(&self, model: &dyn Any) -> bool;

    /// Configure the view with an untyped model.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::ModelMismatch`] if the model has the wrong type;
    /// the view is left unchanged.
    fn configure_any(&mut self, model: &dyn Any) -> Result<(), BindingError>;
}

/// Typed model configuration.
///
/// Implementing this trait provides [`ConfigurableView`] automatically.
pub trait ModelView {
    /// Model type the view displays.
    type Model: 'static;

    /// Configure the view with its model.
    fn configure(&mut self, model: &Self::Model);
}

impl<V: ModelView> ConfigurableView for V {
    fn accepts(&self, model: &dyn Any) -> bool {
        model.is::<V::Model>()
    }

    fn configure_any(&mut self, model: &dyn Any) -> Result<(), BindingError> {
        let Some(model) = model.downcast_ref::<V::Model>() else {
            return Err(BindingError::ModelMismatch {
                view: type_name::<V>(),
                expected: type_name::<V::Model>(),
            });
        };
        self.configure(model);
        Ok(())
    }
}

/// A view type with a reuse identifier.
pub trait IdentifiableView {
    /// Identifier the view is registered and dequeued under. Defaults to the type name.
    fn view_identifier() -> &'static str
    where
        Self: Sized,
    {
        type_name::<Self>()
    }
}
