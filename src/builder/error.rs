//! Build errors for the controller builder.

use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("History capacity must be at least 1. Omit .history_capacity() to use the default")]
    ZeroHistoryCapacity,
}
