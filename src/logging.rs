//! Logging macros.
//!
//! Guard events go to `log` (default feature) or `tracing` (feature
//! `tracing`). Enable at most one of the two; with neither, the macros
//! expand to nothing.
//!
//! | Macro | Events |
//! |-------|--------|
//! | `trace_log!` | each predicate evaluation, late tracker updates |
//! | `debug_log!` | held navigations, prompt transitions, tracker changes |
//! | `info_log!` | mount/unmount, guard registration and release, discard |
//! | `warn_log!` | a blocker replacing another on the same history |

#[doc(hidden)]
#[macro_export]
macro_rules! __guard_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Trace-level guard event.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__guard_log!(trace, $($arg)*)
    };
}

/// Debug-level guard event.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__guard_log!(debug, $($arg)*)
    };
}

/// Info-level guard event.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__guard_log!(info, $($arg)*)
    };
}

/// Warn-level guard event.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__guard_log!(warn, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_in_statement_position() {
        let _ = env_logger::builder().is_test(true).try_init();
        let destination = "/items/5";
        trace_log!("Guard decision for '{}': {:?}", destination, true);
        debug_log!("Navigation to '{}' held", destination);
        info_log!("Navigation guard registered");
        warn_log!("Replacing an existing navigation blocker");
    }
}
