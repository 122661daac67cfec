//! Swipe action configuration returned by presenters

/// Visual treatment of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStyle {
    /// Regular action.
    #[default]
    Normal,
    /// Action that removes or destroys content.
    Destructive,
}

/// A single swipe action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeAction {
    /// Button title.
    pub title: String,
    /// Button style.
    pub style: ActionStyle,
}

impl SwipeAction {
    /// Create a normal action.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: ActionStyle::Normal,
        }
    }

    /// Create a destructive action.
    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: ActionStyle::Destructive,
        }
    }
}

/// Set of actions revealed by swiping a row from one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeActions {
    /// Actions in display order, starting at the swiped edge.
    pub actions: Vec<SwipeAction>,
    /// Whether a full swipe triggers the first action.
    pub performs_first_action_with_full_swipe: bool,
}

impl SwipeActions {
    /// Create an action set that triggers the first action on full swipe.
    pub fn new(actions: Vec<SwipeAction>) -> Self {
        Self {
            actions,
            performs_first_action_with_full_swipe: true,
        }
    }

    /// Check if the set contains no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
