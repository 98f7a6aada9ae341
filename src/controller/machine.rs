//! Feedback controller that turns `loading` / `success` signals into a
//! visually stable loading → success → idle sequence.

use super::render::Render;
use crate::core::{
    Clock, Footprint, PendingTimer, StateHistory, StateTransition, SystemClock, TimerClass,
    TimerSlots, Trigger, VisualState,
};
use crate::snapshot::Snapshot;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum time (ms) the spinner stays visible once shown.
pub const MIN_LOADING_MS: u64 = 400;
/// Time (ms) the success tick stays visible.
pub const SUCCESS_MS: u64 = 2000;

fn min_loading() -> Duration {
    Duration::milliseconds(MIN_LOADING_MS as i64)
}

fn success_display() -> Duration {
    Duration::milliseconds(SUCCESS_MS as i64)
}

/// How much longer the spinner must stay up after `elapsed` of loading.
///
/// A negative `elapsed` counts as zero elapsed.
///
/// # Example
///
/// ```rust
/// use action_feedback::controller::remaining_display;
/// use chrono::Duration;
///
/// assert_eq!(remaining_display(Duration::milliseconds(100)), Duration::milliseconds(300));
/// assert_eq!(remaining_display(Duration::milliseconds(900)), Duration::zero());
/// assert_eq!(remaining_display(Duration::milliseconds(-50)), Duration::milliseconds(400));
/// ```
pub fn remaining_display(elapsed: Duration) -> Duration {
    if elapsed < Duration::zero() {
        return min_loading();
    }
    (min_loading() - elapsed).max(Duration::zero())
}

/// Signals supplied by the caller on every evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// The underlying operation is in progress.
    pub loading: bool,
    /// The underlying operation succeeded.
    pub success: bool,
    /// Explicit disabled flag; `None` derives it from the visual state.
    pub disabled: Option<bool>,
}

impl Input {
    pub fn new(loading: bool, success: bool) -> Self {
        Self {
            loading,
            success,
            disabled: None,
        }
    }

    pub fn with_disabled(mut self, disabled: Option<bool>) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The feedback state machine of one action control.
///
/// Owns its visual state, loading start mark, frozen footprint and timers.
/// Timers are deadlines held by the instance: the host polls
/// [`next_deadline`](Self::next_deadline) and calls
/// [`advance`](Self::advance) when it is reached. [`dispose`](Self::dispose)
/// (also run on drop) cancels everything.
///
/// # Example
///
/// ```rust
/// use action_feedback::controller::{FeedbackController, Input};
/// use action_feedback::core::{Footprint, ManualClock, VisualState};
///
/// let clock = ManualClock::at_epoch();
/// let mut controller = FeedbackController::new(clock.clone());
/// let size = Footprint::new(36.0, 120.0).unwrap();
///
/// controller.update(Input::new(true, false), || size);
/// clock.set_ms(100);
/// let render = controller.update(Input::new(false, true), || size);
/// assert_eq!(render.state, VisualState::Loading);
///
/// clock.set_ms(400);
/// assert_eq!(controller.advance().state, VisualState::Success);
///
/// clock.set_ms(2400);
/// let render = controller.advance();
/// assert_eq!(render.state, VisualState::Idle);
/// assert_eq!(render.applied_size, None);
/// ```
pub struct FeedbackController<C: Clock = SystemClock> {
    id: Uuid,
    clock: C,
    state: VisualState,
    load_started: Option<DateTime<Utc>>,
    footprint: Option<Footprint>,
    timers: TimerSlots,
    input: Input,
    history: StateHistory,
    disposed: bool,
}

impl Default for FeedbackController<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> FeedbackController<C> {
    /// Create an idle controller reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self::from_parts(Uuid::new_v4(), clock, StateHistory::new())
    }

    pub(crate) fn from_parts(id: Uuid, clock: C, history: StateHistory) -> Self {
        Self {
            id,
            clock,
            state: VisualState::Idle,
            load_started: None,
            footprint: None,
            timers: TimerSlots::default(),
            input: Input::default(),
            history,
            disposed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    pub fn footprint(&self) -> Option<Footprint> {
        self.footprint
    }

    /// When the current loading episode began.
    pub fn load_started(&self) -> Option<DateTime<Utc>> {
        self.load_started
    }

    /// The most recently applied input.
    pub fn input(&self) -> Input {
        self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    /// When the host should next call [`advance`](Self::advance).
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next().map(|timer| timer.deadline)
    }

    /// Time left until the next deadline, zero if it is already due.
    pub fn until_next_deadline(&self) -> Option<std::time::Duration> {
        let deadline = self.next_deadline()?;
        Some(
            deadline
                .signed_duration_since(self.clock.now())
                .to_std()
                .unwrap_or_default(),
        )
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn render(&self) -> Render {
        Render::derive(self.state, self.footprint, self.input.disabled)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id,
            state: self.state,
            load_started: self.load_started,
            footprint: self.footprint,
            pending: self.timers.pending(),
            input: self.input,
            taken_at: self.clock.now(),
        }
    }

    /// Evaluate the caller's signals.
    ///
    /// Timers already due fire first, with the previous input, since they
    /// logically happened before this evaluation. `measure` is only called
    /// when a footprint is captured, and before the state changes, so it
    /// sees the control at its natural size.
    pub fn update<M>(&mut self, input: Input, measure: M) -> Render
    where
        M: FnOnce() -> Footprint,
    {
        let now = self.clock.now();
        self.update_at(input, now, measure)
    }

    /// Evaluate the caller's signals as of `now` instead of the clock's
    /// current time.
    ///
    /// For hosts that queue inputs: `now` is when the signals were produced,
    /// so a start mark is not pushed back by the queueing delay. Successive
    /// calls must not go back in time.
    pub fn update_at<M>(&mut self, input: Input, now: DateTime<Utc>, measure: M) -> Render
    where
        M: FnOnce() -> Footprint,
    {
        if self.disposed {
            tracing::trace!(controller = %self.id, "update on disposed controller ignored");
            return self.render();
        }

        self.fire_due(now);
        self.input = input;

        if input.loading {
            self.on_loading(now, measure);
        } else if self.state == VisualState::Loading
            && !self.timers.is_armed(TimerClass::LoadingDisplayEnd)
        {
            self.schedule_display_end(now);
        }

        self.render()
    }

    /// Fire every timer whose deadline has been reached.
    pub fn advance(&mut self) -> Render {
        if !self.disposed {
            let now = self.clock.now();
            self.fire_due(now);
        }
        self.render()
    }

    /// Cancel all timers and make the controller inert.
    ///
    /// Idempotent. Runs automatically on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let cancelled = self.timers.cancel_all();
        self.disposed = true;
        self.state = VisualState::Idle;
        self.load_started = None;
        self.footprint = None;
        tracing::debug!(controller = %self.id, cancelled, "controller disposed");
    }

    fn on_loading<M>(&mut self, now: DateTime<Utc>, measure: M)
    where
        M: FnOnce() -> Footprint,
    {
        match self.state {
            VisualState::Idle => {
                self.footprint = Some(measure());
                self.load_started = Some(now);
                self.transition(VisualState::Loading, now, Trigger::LoadingStarted);
            }
            VisualState::Success => {
                // still frozen: measuring now would read back the frozen size
                self.cancel_timer(TimerClass::SuccessEnd);
                if self.footprint.is_none() {
                    self.footprint = Some(measure());
                }
                self.load_started = Some(now);
                self.transition(VisualState::Loading, now, Trigger::SuccessInterrupted);
            }
            VisualState::Loading => {
                self.cancel_timer(TimerClass::LoadingDisplayEnd);
            }
        }
    }

    fn schedule_display_end(&mut self, now: DateTime<Utc>) {
        let started = self.load_started.unwrap_or(now);
        let elapsed = now.signed_duration_since(started);
        if elapsed < Duration::zero() {
            tracing::warn!(
                controller = %self.id,
                elapsed_ms = elapsed.num_milliseconds(),
                "negative loading time, holding spinner for the full minimum"
            );
        }

        let remaining = remaining_display(elapsed);
        if remaining > Duration::zero() {
            self.arm_timer(TimerClass::LoadingDisplayEnd, now + remaining);
        } else {
            self.end_display(now);
        }
    }

    fn fire_due(&mut self, now: DateTime<Utc>) {
        while let Some(timer) = self.timers.due(now) {
            self.timers.cancel(timer.class);
            tracing::trace!(
                controller = %self.id,
                timer = timer.class.name(),
                deadline = %timer.deadline,
                "timer fired"
            );
            match timer.class {
                TimerClass::LoadingDisplayEnd => self.end_display(timer.deadline),
                TimerClass::SuccessEnd => self.end_success(timer.deadline),
            }
        }
    }

    /// `success` is sampled here and nowhere else.
    fn end_display(&mut self, at: DateTime<Utc>) {
        self.load_started = None;
        if self.input.success {
            self.arm_timer(TimerClass::SuccessEnd, at + success_display());
            self.transition(VisualState::Success, at, Trigger::DisplayEnded);
        } else {
            self.footprint = None;
            self.transition(VisualState::Idle, at, Trigger::DisplayEnded);
        }
    }

    fn end_success(&mut self, at: DateTime<Utc>) {
        self.footprint = None;
        self.transition(VisualState::Idle, at, Trigger::SuccessElapsed);
    }

    fn transition(&mut self, to: VisualState, at: DateTime<Utc>, trigger: Trigger) {
        let from = std::mem::replace(&mut self.state, to);
        self.history.record(StateTransition {
            from,
            to,
            timestamp: at,
            trigger,
        });
        tracing::debug!(
            controller = %self.id,
            from = from.name(),
            to = to.name(),
            trigger = ?trigger,
            "visual state changed"
        );
    }

    fn arm_timer(&mut self, class: TimerClass, deadline: DateTime<Utc>) {
        let superseded = self.timers.arm(class, deadline);
        tracing::trace!(
            controller = %self.id,
            timer = class.name(),
            deadline = %deadline,
            superseded = superseded.is_some(),
            "timer armed"
        );
    }

    fn cancel_timer(&mut self, class: TimerClass) {
        if let Some(deadline) = self.timers.cancel(class) {
            tracing::trace!(
                controller = %self.id,
                timer = class.name(),
                deadline = %deadline,
                "timer cancelled"
            );
        }
    }
}

impl<C: Clock> Drop for FeedbackController<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::cell::Cell;

    fn size() -> Footprint {
        Footprint::new(36.0, 120.0).unwrap()
    }

    fn controller() -> (FeedbackController<ManualClock>, ManualClock) {
        let clock = ManualClock::at_epoch();
        (FeedbackController::new(clock.clone()), clock)
    }

    fn update(
        controller: &mut FeedbackController<ManualClock>,
        clock: &ManualClock,
        ms: i64,
        loading: bool,
        success: bool,
    ) -> Render {
        clock.set_ms(ms);
        controller.update(Input::new(loading, success), size)
    }

    fn advance_to(
        controller: &mut FeedbackController<ManualClock>,
        clock: &ManualClock,
        ms: i64,
    ) -> Render {
        clock.set_ms(ms);
        controller.advance()
    }

    fn spans_ms(controller: &FeedbackController<ManualClock>, clock: &ManualClock) -> Vec<(VisualState, i64, Option<i64>)> {
        controller
            .history()
            .spans()
            .into_iter()
            .map(|span| {
                (
                    span.state,
                    clock.offset_ms(span.start),
                    span.end.map(|end| clock.offset_ms(end)),
                )
            })
            .collect()
    }

    #[test]
    fn short_operation_holds_spinner_then_shows_success() {
        let (mut controller, clock) = controller();

        let render = update(&mut controller, &clock, 0, true, false);
        assert_eq!(render.state, VisualState::Loading);
        assert!(render.disabled);
        assert_eq!(render.applied_size, Some(size()));

        let render = update(&mut controller, &clock, 100, false, true);
        assert_eq!(render.state, VisualState::Loading);
        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(400));

        assert_eq!(advance_to(&mut controller, &clock, 399).state, VisualState::Loading);

        let render = advance_to(&mut controller, &clock, 400);
        assert_eq!(render.state, VisualState::Success);
        assert!(!render.disabled);
        assert_eq!(render.applied_size, Some(size()));

        assert_eq!(advance_to(&mut controller, &clock, 2399).state, VisualState::Success);

        let render = advance_to(&mut controller, &clock, 2400);
        assert_eq!(render.state, VisualState::Idle);
        assert_eq!(render.applied_size, None);

        assert_eq!(
            spans_ms(&controller, &clock),
            vec![
                (VisualState::Loading, 0, Some(400)),
                (VisualState::Success, 400, Some(2400)),
                (VisualState::Idle, 2400, None),
            ]
        );
    }

    #[test]
    fn long_operation_ends_without_extension() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        let render = update(&mut controller, &clock, 600, false, false);

        assert_eq!(render.state, VisualState::Idle);
        assert_eq!(render.applied_size, None);
        assert!(controller.pending_timers().is_empty());
        assert_eq!(controller.load_started(), None);
        assert_eq!(
            spans_ms(&controller, &clock),
            vec![(VisualState::Loading, 0, Some(600)), (VisualState::Idle, 600, None)]
        );
    }

    #[test]
    fn long_operation_with_success_shows_success_immediately() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        let render = update(&mut controller, &clock, 600, false, true);
        assert_eq!(render.state, VisualState::Success);
        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(2600));

        assert_eq!(advance_to(&mut controller, &clock, 2600).state, VisualState::Idle);
    }

    #[test]
    fn loading_and_success_together_queue_success() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, true);
        assert_eq!(controller.state(), VisualState::Loading);
        update(&mut controller, &clock, 50, false, true);
        assert_eq!(advance_to(&mut controller, &clock, 400).state, VisualState::Success);
    }

    #[test]
    fn success_is_sampled_when_display_ends() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);
        // success arrives while the spinner is still being held
        update(&mut controller, &clock, 300, false, true);

        assert_eq!(advance_to(&mut controller, &clock, 400).state, VisualState::Success);
    }

    #[test]
    fn late_success_has_no_retroactive_effect() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);
        assert_eq!(advance_to(&mut controller, &clock, 400).state, VisualState::Idle);

        let render = update(&mut controller, &clock, 500, false, true);
        assert_eq!(render.state, VisualState::Idle);
        assert!(controller.pending_timers().is_empty());
    }

    #[test]
    fn success_dropping_before_display_end_skips_success() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, true);
        update(&mut controller, &clock, 100, false, true);
        update(&mut controller, &clock, 200, false, false);

        assert_eq!(advance_to(&mut controller, &clock, 400).state, VisualState::Idle);
    }

    #[test]
    fn repeated_loading_keeps_start_mark_and_footprint() {
        let (mut controller, clock) = controller();
        let measured = Cell::new(0);
        let measure = || {
            measured.set(measured.get() + 1);
            size()
        };

        clock.set_ms(0);
        controller.update(Input::new(true, false), measure);
        clock.set_ms(150);
        controller.update(Input::new(true, false), measure);
        clock.set_ms(300);
        controller.update(Input::new(true, true), || {
            Footprint::new(1.0, 1.0).unwrap()
        });

        assert_eq!(measured.get(), 1);
        assert_eq!(controller.footprint(), Some(size()));
        assert_eq!(controller.load_started().map(|t| clock.offset_ms(t)), Some(0));

        update(&mut controller, &clock, 350, false, false);
        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(400));
    }

    #[test]
    fn resumed_loading_cancels_pending_display_end() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);
        assert!(controller.next_deadline().is_some());

        update(&mut controller, &clock, 200, true, false);
        assert!(controller.next_deadline().is_none());
        assert_eq!(advance_to(&mut controller, &clock, 500).state, VisualState::Loading);

        // minimum measured from the first start mark, already exceeded
        let render = update(&mut controller, &clock, 600, false, false);
        assert_eq!(render.state, VisualState::Idle);
    }

    #[test]
    fn unrelated_reevaluation_keeps_pending_timer() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);

        clock.set_ms(250);
        controller.update(Input::new(false, false).with_disabled(Some(true)), size);
        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(400));
        assert!(controller.render().disabled);
    }

    #[test]
    fn loading_during_success_restarts_episode() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, true);
        advance_to(&mut controller, &clock, 400);
        assert_eq!(controller.state(), VisualState::Success);

        let render = update(&mut controller, &clock, 1000, true, false);
        assert_eq!(render.state, VisualState::Loading);
        assert_eq!(render.applied_size, Some(size()));
        assert_eq!(controller.load_started().map(|t| clock.offset_ms(t)), Some(1000));
        assert!(controller
            .pending_timers()
            .iter()
            .all(|t| t.class != TimerClass::SuccessEnd));

        update(&mut controller, &clock, 1100, false, false);
        assert_eq!(advance_to(&mut controller, &clock, 1399).state, VisualState::Loading);
        assert_eq!(advance_to(&mut controller, &clock, 1400).state, VisualState::Idle);
        assert_eq!(
            controller.history().last().map(|t| t.trigger),
            Some(Trigger::DisplayEnded)
        );
    }

    #[test]
    fn success_ignores_other_input_changes() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 500, false, true);
        assert_eq!(controller.state(), VisualState::Success);

        update(&mut controller, &clock, 900, false, false);
        update(&mut controller, &clock, 1500, false, true);
        assert_eq!(advance_to(&mut controller, &clock, 2499).state, VisualState::Success);
        assert_eq!(advance_to(&mut controller, &clock, 2500).state, VisualState::Idle);
    }

    #[test]
    fn late_poll_uses_logical_fire_times() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, true);

        // host wakes up long after both timers were due
        let render = advance_to(&mut controller, &clock, 5000);
        assert_eq!(render.state, VisualState::Idle);
        assert_eq!(
            spans_ms(&controller, &clock),
            vec![
                (VisualState::Loading, 0, Some(400)),
                (VisualState::Success, 400, Some(2400)),
                (VisualState::Idle, 2400, None),
            ]
        );
    }

    #[test]
    fn due_timer_fires_before_new_loading_episode() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);

        let render = update(&mut controller, &clock, 450, true, false);
        assert_eq!(render.state, VisualState::Loading);
        assert_eq!(controller.load_started().map(|t| clock.offset_ms(t)), Some(450));
        assert_eq!(
            controller.history().get_path(),
            vec![
                VisualState::Idle,
                VisualState::Loading,
                VisualState::Idle,
                VisualState::Loading,
            ]
        );
    }

    #[test]
    fn update_at_uses_given_time_for_start_mark() {
        let (mut controller, clock) = controller();

        // both inputs were produced at t=0 but are only applied at t=250
        let produced = clock.now();
        clock.set_ms(250);
        controller.update_at(Input::new(true, false), produced, size);
        assert_eq!(controller.load_started(), Some(produced));

        controller.update_at(Input::new(false, true), produced, size);
        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(400));

        assert_eq!(advance_to(&mut controller, &clock, 400).state, VisualState::Success);
    }

    #[test]
    fn negative_elapsed_holds_full_minimum() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        // clock jumps backwards
        update(&mut controller, &clock, -500, false, false);

        assert_eq!(controller.next_deadline().map(|d| clock.offset_ms(d)), Some(-100));
        assert_eq!(advance_to(&mut controller, &clock, -101).state, VisualState::Loading);
        assert_eq!(advance_to(&mut controller, &clock, -100).state, VisualState::Idle);
    }

    #[test]
    fn dispose_cancels_pending_timers() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, true);
        assert_eq!(controller.pending_timers().len(), 1);

        controller.dispose();
        assert!(controller.is_disposed());
        assert!(controller.next_deadline().is_none());

        let recorded = controller.history().len();
        advance_to(&mut controller, &clock, 10_000);
        update(&mut controller, &clock, 10_100, true, false);

        assert_eq!(controller.history().len(), recorded);
        assert_eq!(controller.render().state, VisualState::Idle);

        controller.dispose();
    }

    #[test]
    fn override_controls_disabled() {
        let (mut controller, clock) = controller();

        clock.set_ms(0);
        let render = controller.update(Input::new(true, false).with_disabled(Some(false)), size);
        assert_eq!(render.state, VisualState::Loading);
        assert!(!render.disabled);
    }

    #[test]
    fn snapshot_reflects_controller() {
        let (mut controller, clock) = controller();

        update(&mut controller, &clock, 0, true, false);
        update(&mut controller, &clock, 100, false, false);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.id, controller.id());
        assert_eq!(snapshot.state, VisualState::Loading);
        assert_eq!(snapshot.footprint, Some(size()));
        assert_eq!(snapshot.pending.len(), 1);
        assert_eq!(snapshot.pending[0].class, TimerClass::LoadingDisplayEnd);
        assert_eq!(clock.offset_ms(snapshot.taken_at), 100);
    }
}
