//! Action Feedback: a timed feedback state machine for action controls.
//!
//! An action control (a "save" button, say) is told two things by its
//! caller: whether an operation is `loading`, and whether it ended in
//! `success`. Shown as-is, those signals flicker: a fast request makes the
//! spinner blink for one frame, and swapping the label for an icon makes the
//! button jump in size. The [`FeedbackController`] turns them into a stable
//! sequence instead:
//!
//! - the spinner stays up for at least [`MIN_LOADING_MS`];
//! - a success tick follows for exactly [`SUCCESS_MS`] if `success` is set
//!   when the spinner comes down;
//! - the control keeps the size it had before the swap until it is idle again.
//!
//! # Core Concepts
//!
//! - **Controller**: owns the visual state, start mark, frozen footprint and
//!   timers of one control instance ([`controller`])
//! - **Render**: a pure projection for the presentation layer
//! - **Host loop**: timers are deadlines the host fires through
//!   [`FeedbackController::advance`], or [`driver::FeedbackDriver`] on tokio
//!
//! # Example
//!
//! ```rust
//! use action_feedback::controller::{FeedbackController, Input};
//! use action_feedback::core::{Footprint, ManualClock, VisualState};
//!
//! let clock = ManualClock::at_epoch();
//! let mut controller = FeedbackController::new(clock.clone());
//! let size = Footprint::new(36.0, 120.0).unwrap();
//!
//! // operation starts and finishes quickly
//! controller.update(Input::new(true, false), || size);
//! clock.set_ms(600);
//! let render = controller.update(Input::new(false, false), || size);
//!
//! // it took longer than the minimum, so no artificial delay
//! assert_eq!(render.state, VisualState::Idle);
//! assert_eq!(render.applied_size, None);
//! ```

pub mod builder;
pub mod button;
pub mod controller;
pub mod core;
pub mod driver;
pub mod snapshot;

// Re-export commonly used types
pub use crate::controller::{FeedbackController, Input, Render, MIN_LOADING_MS, SUCCESS_MS};
pub use crate::core::{Footprint, VisualState};
