//! Builder API for controller construction.
//!
//! Timing constants are fixed crate-wide; the builder only configures the
//! instance: its clock, history size and id.

pub mod controller;
pub mod error;

pub use controller::FeedbackControllerBuilder;
pub use error::BuildError;
