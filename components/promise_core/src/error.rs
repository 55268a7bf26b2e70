//! Errors raised by the scheduler itself.
//!
//! Promise-level failures never show up here: they become rejections.

use core_types::Value;

/// An error that stops the event loop.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A drain ran more microtasks than the configured budget allows.
    #[error("microtask turn limit of {limit} exceeded")]
    TurnLimitExceeded {
        /// The configured budget
        limit: usize,
    },

    /// A task threw instead of returning.
    #[error("uncaught exception in task: {0:?}")]
    Task(Value),
}
