//! Core value types of the feedback state machine.
//!
//! This module contains the plain data the controller is made of:
//! - The visual state and the frozen footprint
//! - Timer slots holding pending deadlines
//! - Clocks
//! - Bounded transition history
//!
//! Nothing here schedules anything or touches a host; the controller in
//! [`crate::controller`] drives these types.

mod clock;
pub mod error;
mod footprint;
mod history;
mod state;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{DimensionError, FootprintError};
pub use footprint::Footprint;
pub use history::{Span, StateHistory, StateTransition, Trigger, DEFAULT_HISTORY_CAPACITY};
pub use state::VisualState;
pub use timer::{PendingTimer, TimerClass, TimerSlots};
