//! Transition history of a controller.
//!
//! Records every visual state change with its logical timestamp, so callers
//! (and tests) can reconstruct what was on screen and for how long.

use super::state::VisualState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of transitions kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// `loading` became true while idle.
    LoadingStarted,
    /// `loading` became true while the success tick was showing.
    SuccessInterrupted,
    /// The loading display ended, after the minimum duration if needed.
    DisplayEnded,
    /// The success display ran its full duration.
    SuccessElapsed,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::{StateTransition, Trigger, VisualState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: VisualState::Idle,
///     to: VisualState::Loading,
///     timestamp: Utc::now(),
///     trigger: Trigger::LoadingStarted,
/// };
/// assert_eq!(transition.to, VisualState::Loading);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: VisualState,
    /// The state being transitioned to
    pub to: VisualState,
    /// Logical time of the transition (a timer's deadline, not when it was polled)
    pub timestamp: DateTime<Utc>,
    pub trigger: Trigger,
}

/// A contiguous interval during which one state was displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub state: VisualState,
    pub start: DateTime<Utc>,
    /// `None` while the state is still displayed.
    pub end: Option<DateTime<Utc>>,
}

/// Bounded, ordered history of state transitions.
///
/// When full, the oldest transition is evicted.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::{StateHistory, StateTransition, Trigger, VisualState};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: VisualState::Idle,
///     to: VisualState::Loading,
///     timestamp: Utc::now(),
///     trigger: Trigger::LoadingStarted,
/// });
/// history.record(StateTransition {
///     from: VisualState::Loading,
///     to: VisualState::Idle,
///     timestamp: Utc::now(),
///     trigger: Trigger::DisplayEnded,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![VisualState::Idle, VisualState::Loading, VisualState::Idle]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create a new empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a new empty history keeping at most `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then the
    /// `to` state of each transition.
    pub fn get_path(&self) -> Vec<VisualState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Duration from the first to the last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Display intervals reconstructed from the retained transitions.
    ///
    /// The first span starts at the first retained transition; the last span
    /// is open-ended.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::with_capacity(self.transitions.len());
        for transition in &self.transitions {
            if let Some(open) = spans.last_mut() {
                open.end = Some(transition.timestamp);
            }
            spans.push(Span {
                state: transition.to,
                start: transition.timestamp,
                end: None,
            });
        }
        spans
    }

    /// All retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }
}
