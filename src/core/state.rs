//! Visual state of an action control.
//!
//! The visual state is what the user sees, which is deliberately decoupled
//! from the caller's `loading` signal: the control can keep showing
//! `Loading` after the signal dropped, to honour the minimum display time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three visual states of the feedback controller.
///
/// Exactly one is active at any time.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::VisualState;
///
/// let state = VisualState::default();
/// assert!(state.is_idle());
/// assert_eq!(state.name(), "Idle");
/// assert_eq!(VisualState::Loading.to_string(), "Loading");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// Normal content is shown and the control sizes naturally.
    #[default]
    Idle,
    /// The spinner replaces the content.
    Loading,
    /// The success tick replaces the content.
    Success,
}

impl VisualState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Success => "Success",
        }
    }

    /// Whether the control is showing its normal content.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
