//! Errors returned by the confirmation flow.
//!
//! The guard has no failable I/O of its own. The only errors are prompt
//! outcomes that arrive when there is nothing to decide:
//!
//! - [`GuardError::NoPendingNavigation`] — Discard / Keep Editing while idle.
//! - [`GuardError::Disposed`] — an outcome delivered after unmount.
//!
//! Late form-state updates and double releases are *not* errors; they are
//! absorbed silently.
//!
//! # Examples
//!
//! ```
//! use form_guard::GuardError;
//!
//! let err = GuardError::NoPendingNavigation;
//! assert_eq!(err.to_string(), "No navigation is awaiting confirmation");
//! ```

use std::fmt;

/// Error for a prompt outcome that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// The prompt is idle; there is no held navigation to resume or drop.
    NoPendingNavigation,

    /// The controller has been unmounted.
    Disposed,
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::NoPendingNavigation => {
                write!(f, "No navigation is awaiting confirmation")
            }
            GuardError::Disposed => write!(f, "Form controller has been unmounted"),
        }
    }
}

impl std::error::Error for GuardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GuardError::Disposed.to_string(),
            "Form controller has been unmounted"
        );
        assert_eq!(
            GuardError::NoPendingNavigation.to_string(),
            "No navigation is awaiting confirmation"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(GuardError::Disposed);
        assert!(err.source().is_none());
    }
}
