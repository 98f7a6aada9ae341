//! Tokio host loop for a feedback controller.
//!
//! The controller runs on its own task. Inputs arrive in order through an
//! unbounded channel, renders leave through a watch channel, and the task
//! sleeps until the controller's next deadline. Stopping the task drops the
//! controller, which disposes its timers.

use crate::controller::{FeedbackController, Input, Render};
use crate::core::{Clock, Footprint};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Clock backed by tokio's monotonic time, so paused test time applies.
#[derive(Clone, Copy, Debug)]
pub struct TokioClock {
    origin: DateTime<Utc>,
    started: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Utc::now(),
            started: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.started.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin + elapsed
    }
}

/// Input plus the control's current natural size, stamped when sent.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frame {
    input: Input,
    size: Footprint,
    sent_at: DateTime<Utc>,
}

/// Handle to a controller running on a tokio task.
///
/// Dropping the handle stops the task.
pub struct FeedbackDriver {
    clock: Box<dyn Clock>,
    inputs: mpsc::UnboundedSender<Frame>,
    renders: watch::Receiver<Render>,
    task: JoinHandle<()>,
}

impl FeedbackDriver {
    /// Start driving `controller`. Must be called within a tokio runtime.
    pub fn spawn<C>(controller: FeedbackController<C>) -> Self
    where
        C: Clock + Clone + 'static,
    {
        let clock = Box::new(controller.clock().clone());
        let (inputs, input_rx) = mpsc::unbounded_channel();
        let (render_tx, renders) = watch::channel(controller.render());

        let task = tokio::spawn(run(controller, input_rx, render_tx));

        Self {
            clock,
            inputs,
            renders,
            task,
        }
    }

    /// Submit new signals along with the control's current natural size.
    ///
    /// Frames are applied in order, none is skipped. Each one is stamped with
    /// the time of this call, so a loading episode starts when `set` was
    /// called rather than when the task got to it.
    pub fn set(&self, input: Input, size: Footprint) {
        let frame = Frame {
            input,
            size,
            sent_at: self.clock.now(),
        };
        if self.inputs.send(frame).is_err() {
            tracing::trace!("input sent to stopped driver");
        }
    }

    /// The latest render.
    pub fn current(&self) -> Render {
        *self.renders.borrow()
    }

    /// Receiver notified on every new render.
    pub fn subscribe(&self) -> watch::Receiver<Render> {
        self.renders.clone()
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(mut self) {
        self.task.abort();
        // cancellation is the expected outcome
        let _ = (&mut self.task).await;
    }
}

impl Drop for FeedbackDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<C: Clock>(
    mut controller: FeedbackController<C>,
    mut inputs: mpsc::UnboundedReceiver<Frame>,
    renders: watch::Sender<Render>,
) {
    tracing::debug!(controller = %controller.id(), "driver started");

    loop {
        let wait = controller.until_next_deadline();

        tokio::select! {
            biased;
            frame = inputs.recv() => {
                let Some(frame) = frame else {
                    break;
                };
                let render = controller.update_at(frame.input, frame.sent_at, || frame.size);
                renders.send_replace(render);
            }
            _ = tokio::time::sleep(wait.unwrap_or_default()), if wait.is_some() => {
                renders.send_replace(controller.advance());
            }
        }
    }

    tracing::debug!(controller = %controller.id(), "driver stopped");
}
