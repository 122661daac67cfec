//! View pool - register-by-identifier, dequeue-by-identifier, recycle

use super::{IdentifiableView, ListItemView};
use crate::model::RowAddress;
use std::collections::HashMap;
use std::fmt;

/// Creates a fresh view for an identifier with an empty reuse queue.
pub type ViewFactory = Box<dyn Fn() -> Box<dyn ListItemView>>;

/// A view on loan from a pool, tagged with the identifier it was dequeued under.
pub struct ReusableView {
    identifier: String,
    view: Box<dyn ListItemView>,
}

impl ReusableView {
    /// Wrap a view dequeued under `identifier`.
    pub fn new(identifier: impl Into<String>, view: Box<dyn ListItemView>) -> Self {
        Self {
            identifier: identifier.into(),
            view,
        }
    }

    /// Identifier the view was dequeued under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The view.
    pub fn view(&self) -> &dyn ListItemView {
        &*self.view
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut dyn ListItemView {
        &mut *self.view
    }
}

impl fmt::Debug for ReusableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusableView")
            .field("identifier", &self.identifier)
            .field("view", &self.view.view_name())
            .finish()
    }
}

/// Source of recyclable views keyed by reuse identifier.
pub trait ViewPool {
    /// Register a factory for `identifier`, replacing any previous one.
    fn register(&mut self, identifier: &str, factory: ViewFactory);

    /// Dequeue a row cell. `None` if `identifier` was never registered.
    fn dequeue_cell(&mut self, identifier: &str, address: RowAddress) -> Option<ReusableView>;

    /// Dequeue a header or footer view. `None` if `identifier` was never registered.
    fn dequeue_supplementary(&mut self, identifier: &str) -> Option<ReusableView>;

    /// Return a view so a later dequeue can reuse it.
    fn recycle(&mut self, view: ReusableView);
}

/// Typed registration helpers for any [`ViewPool`].
pub trait ViewPoolExt: ViewPool {
    /// Register `V` under its [`IdentifiableView::view_identifier`].
    fn register_view<V>(&mut self)
    where
        V: IdentifiableView + ListItemView + Default + 'static,
    {
        self.register(
            V::view_identifier(),
            Box::new(|| Box::new(V::default()) as Box<dyn ListItemView>),
        );
    }
}

impl<P: ViewPool + ?Sized> ViewPoolExt for P {}

/// Stock [`ViewPool`] with one reuse queue per identifier.
#[derive(Default)]
pub struct ViewRegistry {
    factories: HashMap<String, ViewFactory>,
    reuse: HashMap<String, Vec<Box<dyn ListItemView>>>,
    created: usize,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `identifier` has a factory.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Number of views built by factories so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of idle views waiting in the reuse queue for `identifier`.
    pub fn idle(&self, identifier: &str) -> usize {
        self.reuse.get(identifier).map_or(0, Vec::len)
    }

    fn dequeue(&mut self, identifier: &str) -> Option<ReusableView> {
        let factory = self.factories.get(identifier)?;
        let view = match self.reuse.get_mut(identifier).and_then(Vec::pop) {
            Some(mut view) => {
                view.prepare_for_reuse();
                view
            }
            None => {
                self.created += 1;
                factory()
            }
        };
        Some(ReusableView::new(identifier, view))
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers: Vec<&String> = self.factories.keys().collect();
        identifiers.sort();
        f.debug_struct("ViewRegistry")
            .field("identifiers", &identifiers)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl ViewPool for ViewRegistry {
    fn register(&mut self, identifier: &str, factory: ViewFactory) {
        self.factories.insert(identifier.to_string(), factory);
    }

    fn dequeue_cell(&mut self, identifier: &str, _address: RowAddress) -> Option<ReusableView> {
        self.dequeue(identifier)
    }

    fn dequeue_supplementary(&mut self, identifier: &str) -> Option<ReusableView> {
        self.dequeue(identifier)
    }

    fn recycle(&mut self, view: ReusableView) {
        if !self.is_registered(&view.identifier) {
            return;
        }
        self.reuse.entry(view.identifier).or_default().push(view.view);
    }
}
