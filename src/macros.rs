//! Small crate-wide convenience macros.

/// Debug-level log line, compiled in for every build but filtered at runtime
/// by the level installed in [`crate::logging::init`].
///
/// ```rust,ignore
/// debug_log!("dropping stale response seq={}", seq);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        ::log::debug!(target: "agent_flow", $($arg)*)
    };
}
