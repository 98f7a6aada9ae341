//! Pending timers owned by a controller instance.
//!
//! A timer is a deadline stored in a slot, one slot per timer class. The
//! host's event loop polls for the next deadline and asks the controller to
//! fire whatever is due. Because timers are plain data inside the instance,
//! destroying the instance destroys its timers with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two classes of scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerClass {
    /// End of the (possibly extended) loading display.
    LoadingDisplayEnd,
    /// End of the fixed success display.
    SuccessEnd,
}

impl TimerClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadingDisplayEnd => "LoadingDisplayEnd",
            Self::SuccessEnd => "SuccessEnd",
        }
    }
}

/// A live timer: its class and when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub class: TimerClass,
    pub deadline: DateTime<Utc>,
}

/// At most one live timer per class.
///
/// Arming a class that already has a live timer supersedes it.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::{TimerClass, TimerSlots};
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// let mut slots = TimerSlots::default();
///
/// slots.arm(TimerClass::SuccessEnd, now + Duration::milliseconds(2000));
/// assert!(slots.due(now).is_none());
/// assert!(slots.due(now + Duration::milliseconds(2000)).is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSlots {
    loading_display_end: Option<DateTime<Utc>>,
    success_end: Option<DateTime<Utc>>,
}

impl TimerSlots {
    fn slot_mut(&mut self, class: TimerClass) -> &mut Option<DateTime<Utc>> {
        match class {
            TimerClass::LoadingDisplayEnd => &mut self.loading_display_end,
            TimerClass::SuccessEnd => &mut self.success_end,
        }
    }

    /// Arm a timer, returning the deadline of the timer it superseded.
    pub fn arm(&mut self, class: TimerClass, deadline: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.slot_mut(class).replace(deadline)
    }

    /// Cancel a timer, returning its deadline if it was live.
    pub fn cancel(&mut self, class: TimerClass) -> Option<DateTime<Utc>> {
        self.slot_mut(class).take()
    }

    /// Cancel every live timer, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        [TimerClass::LoadingDisplayEnd, TimerClass::SuccessEnd]
            .into_iter()
            .filter_map(|class| self.cancel(class))
            .count()
    }

    pub fn is_armed(&self, class: TimerClass) -> bool {
        match class {
            TimerClass::LoadingDisplayEnd => self.loading_display_end.is_some(),
            TimerClass::SuccessEnd => self.success_end.is_some(),
        }
    }

    /// All live timers, earliest first.
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut pending: Vec<PendingTimer> = [
            (TimerClass::LoadingDisplayEnd, self.loading_display_end),
            (TimerClass::SuccessEnd, self.success_end),
        ]
        .into_iter()
        .filter_map(|(class, deadline)| deadline.map(|deadline| PendingTimer { class, deadline }))
        .collect();

        // stable sort keeps LoadingDisplayEnd first on ties
        pending.sort_by_key(|timer| timer.deadline);
        pending
    }

    /// The earliest live timer.
    pub fn next(&self) -> Option<PendingTimer> {
        self.pending().into_iter().next()
    }

    /// The earliest live timer whose deadline has been reached.
    pub fn due(&self, now: DateTime<Utc>) -> Option<PendingTimer> {
        self.next().filter(|timer| timer.deadline <= now)
    }
}
