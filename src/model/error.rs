//! Error types for listbind.
//!
//! # Error Taxonomy
//!
//! - **Out-of-range indices** are not errors at all. Cache reads return `None`
//!   and cache writes are skipped; nothing is logged.
//! - [`BindingError`] covers programmer errors: a dequeued view without the
//!   configuration capability, a model of the wrong type, or a dequeue for an
//!   identifier that was never registered. These are surfaced through
//!   [`report`] and never propagated into the list's render loop.
//! - Configuration and logging setup have their own `Result` errors
//!   (`config::ConfigError`, `logging::LoggingError`).
//!
//! # Reporting Policy
//!
//! [`ErrorPolicy::Panic`] makes programmer errors fatal, which is the default
//! in debug builds. [`ErrorPolicy::Log`] records them with `tracing::error!`
//! and lets the caller continue with the view left unconfigured (or with no
//! view at all for a missing registration), which is the release default.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which kind of list item a view was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Row cell.
    Cell,
    /// Section header.
    Header,
    /// Section footer.
    Footer,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cell => "cell",
            Self::Header => "header",
            Self::Footer => "footer",
        })
    }
}

/// Programmer errors detected while binding presenter content to views.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A model exists for the item but its view cannot be configured.
    ///
    /// The view type must return `Some(self)` from
    /// `ListItemView::as_configurable` to receive models.
    #[error("{kind} view `{view}` does not implement model configuration")]
    NotConfigurable {
        /// Item kind the view was dequeued for.
        kind: ViewKind,
        /// Type name of the offending view.
        view: &'static str,
    },

    /// The presenter's model is not the type the view expects.
    #[error("invalid model for view `{view}`: expected `{expected}`")]
    ModelMismatch {
        /// Type name of the view.
        view: &'static str,
        /// Type name of the model the view accepts.
        expected: &'static str,
    },

    /// A view was dequeued for an identifier that was never registered.
    #[error("cannot dequeue {kind} view with identifier `{identifier}`; was it registered?")]
    Unregistered {
        /// Item kind the view was requested for.
        kind: ViewKind,
        /// The identifier the presenter returned.
        identifier: String,
    },
}

/// How programmer errors are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the error and panic.
    Panic,
    /// Log the error and continue.
    Log,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Log
        }
    }
}

/// Error returned when parsing an [`ErrorPolicy`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error policy `{0}` (expected `panic` or `log`)")]
pub struct InvalidErrorPolicy(pub String);

impl FromStr for ErrorPolicy {
    type Err = InvalidErrorPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "log" => Ok(Self::Log),
            _ => Err(InvalidErrorPolicy(s.to_string())),
        }
    }
}

/// Surface a programmer error according to `policy`.
///
/// # Panics
///
/// Panics when `policy` is [`ErrorPolicy::Panic`].
pub fn report(policy: ErrorPolicy, error: &BindingError) {
    tracing::error!(%error, "list binding programmer error");
    if policy == ErrorPolicy::Panic {
        panic!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_message_names_identifier_and_kind() {
        let error = BindingError::Unregistered {
            kind: ViewKind::Header,
            identifier: "Banner".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "cannot dequeue header view with identifier `Banner`; was it registered?"
        );
    }

    #[test]
    fn model_mismatch_message_names_expected_type() {
        let error = BindingError::ModelMismatch {
            view: "TextView",
            expected: "alloc::string::String",
        };
        assert!(error.to_string().contains("alloc::string::String"));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Panic".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Panic));
        assert_eq!(" log ".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Log));
        assert_eq!(
            "ignore".parse::<ErrorPolicy>(),
            Err(InvalidErrorPolicy("ignore".to_string()))
        );
    }

    #[test]
    fn report_with_log_policy_returns() {
        let error = BindingError::NotConfigurable {
            kind: ViewKind::Cell,
            view: "PlainView",
        };
        report(ErrorPolicy::Log, &error);
    }

    #[test]
    #[should_panic(expected = "does not implement model configuration")]
    fn report_with_panic_policy_panics() {
        let error = BindingError::NotConfigurable {
            kind: ViewKind::Cell,
            view: "PlainView",
        };
        report(ErrorPolicy::Panic, &error);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn default_policy_is_fatal_in_debug_builds() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Panic);
    }
}
