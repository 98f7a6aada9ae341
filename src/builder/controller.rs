//! Builder for constructing feedback controllers.

use crate::builder::error::BuildError;
use crate::controller::FeedbackController;
use crate::core::{Clock, StateHistory, SystemClock, DEFAULT_HISTORY_CAPACITY};
use uuid::Uuid;

/// Builder for constructing controllers with a fluent API.
///
/// # Example
///
/// ```rust
/// use action_feedback::builder::FeedbackControllerBuilder;
/// use action_feedback::core::{ManualClock, VisualState};
///
/// let controller = FeedbackControllerBuilder::new()
///     .clock(ManualClock::at_epoch())
///     .history_capacity(8)
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.state(), VisualState::Idle);
/// assert_eq!(controller.history().capacity(), 8);
/// ```
pub struct FeedbackControllerBuilder<C: Clock = SystemClock> {
    clock: C,
    history_capacity: Option<usize>,
    id: Option<Uuid>,
}

impl FeedbackControllerBuilder<SystemClock> {
    /// Create a new builder using the system clock.
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            history_capacity: None,
            id: None,
        }
    }
}

impl<C: Clock> FeedbackControllerBuilder<C> {
    /// Use a different time source.
    pub fn clock<N: Clock>(self, clock: N) -> FeedbackControllerBuilder<N> {
        FeedbackControllerBuilder {
            clock,
            history_capacity: self.history_capacity,
            id: self.id,
        }
    }

    /// Keep at most `capacity` transitions in the history.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Use a fixed instance id instead of a random one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the controller.
    pub fn build(self) -> Result<FeedbackController<C>, BuildError> {
        let capacity = self.history_capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY);
        if capacity == 0 {
            return Err(BuildError::ZeroHistoryCapacity);
        }

        let id = self.id.unwrap_or_else(Uuid::new_v4);
        Ok(FeedbackController::from_parts(
            id,
            self.clock,
            StateHistory::with_capacity(capacity),
        ))
    }
}

impl Default for FeedbackControllerBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}
