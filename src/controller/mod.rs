//! The feedback controller and the render output it drives.
//!
//! # Key Concepts
//!
//! - **Logical vs displayed loading**: the caller's `loading` signal and the
//!   visual `Loading` state are separate; the display can outlive the signal
//!   to honour [`MIN_LOADING_MS`].
//! - **Timers as deadlines**: the controller holds its timers as data and the
//!   host fires them through [`FeedbackController::advance`].
//! - **Render**: a pure projection of the state for the presentation layer.

mod machine;
mod render;

pub use machine::{remaining_display, FeedbackController, Input, MIN_LOADING_MS, SUCCESS_MS};
pub use render::{Content, Icon, Render, SUCCESS_LABEL, WAITING_LABEL};
