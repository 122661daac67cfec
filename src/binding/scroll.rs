//! Scroll notifications and the single observer slot they are forwarded to

use crate::list::Point;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A scroll-related notification from the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Content offset changed.
    DidScroll {
        /// New content offset.
        offset: Point,
    },
    /// Zoom scale changed.
    DidZoom {
        /// New zoom scale.
        scale: f64,
    },
    /// The user started dragging.
    WillBeginDragging,
    /// The user lifted their finger.
    ///
    /// Observers may rewrite `target_offset` to change where scrolling stops.
    WillEndDragging {
        /// Release velocity in points per millisecond.
        velocity: Point,
        /// Offset deceleration will settle at.
        target_offset: Point,
    },
    /// Dragging finished.
    DidEndDragging {
        /// Whether deceleration follows.
        will_decelerate: bool,
    },
    /// Deceleration started.
    WillBeginDecelerating,
    /// Deceleration finished.
    DidEndDecelerating,
    /// A programmatic animated scroll finished.
    DidEndScrollingAnimation,
    /// Zooming started.
    WillBeginZooming,
    /// Zooming finished.
    DidEndZooming {
        /// Final zoom scale.
        scale: f64,
    },
    /// A scroll-to-top gesture finished.
    DidScrollToTop,
}

/// Receiver of forwarded scroll notifications.
pub trait ScrollObserver {
    /// Handle one notification. The event may be modified in place.
    fn scroll_event(&mut self, event: &mut ScrollEvent);

    /// Whether a scroll-to-top gesture should proceed.
    fn should_scroll_to_top(&self) -> bool {
        true
    }
}

/// At most one weakly held observer.
///
/// Events are dropped when no observer is set, when it has been dropped, or
/// when it is already borrowed (an observer scrolling the list from inside its
/// own callback).
#[derive(Default)]
pub(crate) struct ScrollForwarder {
    observer: Option<Weak<RefCell<dyn ScrollObserver>>>,
}

impl ScrollForwarder {
    pub(crate) fn set<O: ScrollObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        let observer: Rc<RefCell<dyn ScrollObserver>> = observer.clone();
        self.observer = Some(Rc::downgrade(&observer));
    }

    pub(crate) fn clear(&mut self) {
        self.observer = None;
    }

    fn upgrade(&self) -> Option<Rc<RefCell<dyn ScrollObserver>>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn forward(&self, event: &mut ScrollEvent) {
        let Some(observer) = self.upgrade() else {
            return;
        };
        let Ok(mut guard) = observer.try_borrow_mut() else {
            return;
        };
        guard.scroll_event(event);
    }

    pub(crate) fn should_scroll_to_top(&self) -> bool {
        let Some(observer) = self.upgrade() else {
            return true;
        };
        // Bound so the `Ref` temporary is dropped before `observer`.
        let allowed = observer
            .try_borrow()
            .map_or(true, |observer| observer.should_scroll_to_top());
        allowed
    }
}

impl std::fmt::Debug for ScrollForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollForwarder")
            .field("attached", &self.upgrade().is_some())
            .finish()
    }
}
