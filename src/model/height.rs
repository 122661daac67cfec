//! Height values and presenter-declared height policies

use std::fmt;

/// A cached height slot.
///
/// `Unmeasured` means the slot exists but nothing has been measured for it in
/// the current epoch. Measured values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Height {
    /// Slot exists, no value cached yet.
    #[default]
    Unmeasured,
    /// Cached height.
    Measured(f64),
}

impl Height {
    /// Build a measured height, clamping negatives and NaN to zero.
    pub fn measured(value: f64) -> Self {
        // f64::max returns the non-NaN operand, so NaN collapses to 0.
        Self::Measured(value.max(0.0))
    }

    /// The cached value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Unmeasured => None,
            Self::Measured(value) => Some(value),
        }
    }

    /// Check if a value is cached.
    pub fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmeasured => f.write_str("U"),
            Self::Measured(value) => write!(f, "{value}"),
        }
    }
}

/// Height policy the presenter declares for a row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowHeight {
    /// Measure the configured view against the list width, then cache.
    #[default]
    Flexible,
    /// Use this height directly.
    Fixed(f64),
}

/// Height policy the presenter declares for a section header or footer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewHeight {
    /// Hidden: always zero height, never measured and never cached.
    None,
    /// Measure the configured view against the list width, then cache.
    #[default]
    Flexible,
    /// Use this height directly.
    Fixed(f64),
}
