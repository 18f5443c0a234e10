//! The per-frame animation loop shared by every simulation.
//!
//! An [`AnimationDriver`] owns a demo's [`RunState`] and at most one
//! [`PendingFrame`]. Each delivered frame goes through
//! [`AnimationDriver::advance`]: the driver checks that the frame is the one
//! it is waiting for, runs the step closure (compute, then draw) and either
//! schedules the next frame or settles.

use tracing::{debug, trace};

use crate::messages::Demo;
use crate::scheduler::{FrameId, FrameQueue, PendingFrame};

/// Lifecycle of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No frame pending; the surface is blank or shows a rest pose.
    #[default]
    Idle,
    /// A frame callback is scheduled.
    Running,
    /// The stopping condition was met; no frame pending.
    Settled,
}

impl RunState {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Settled => "settled",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a frame step decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Schedule another frame.
    Continue,
    /// The stopping condition holds; end the run.
    Settle,
}

/// Scheduling state machine for one demo.
#[derive(Debug)]
pub struct AnimationDriver {
    owner: Demo,
    state: RunState,
    pending: Option<PendingFrame>,
}

impl AnimationDriver {
    /// Creates an idle driver.
    #[must_use]
    pub const fn new(owner: Demo) -> Self {
        Self {
            owner,
            state: RunState::Idle,
            pending: None,
        }
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Returns `true` while a frame is scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running)
    }

    /// Id of the frame being waited for, if any.
    #[must_use]
    pub fn pending_id(&self) -> Option<FrameId> {
        self.pending.as_ref().map(PendingFrame::id)
    }

    /// Enters `Running` and schedules the first frame.
    ///
    /// Returns `false` and does nothing if already running.
    pub fn begin(&mut self, queue: &FrameQueue) -> bool {
        if self.is_running() {
            debug!(demo = %self.owner, "start ignored: already running");
            return false;
        }
        self.pending = Some(queue.request_frame(self.owner));
        self.state = RunState::Running;
        true
    }

    /// Runs one frame if `id` is the frame this driver is waiting for.
    ///
    /// Stale or foreign ids are ignored and return `None`. Otherwise `step`
    /// runs and its decision is applied: [`Flow::Continue`] schedules the
    /// next frame, [`Flow::Settle`] ends the run.
    pub fn advance<F>(&mut self, id: FrameId, queue: &FrameQueue, step: F) -> Option<Flow>
    where
        F: FnOnce() -> Flow,
    {
        if !self.is_running() || self.pending_id() != Some(id) {
            trace!(demo = %self.owner, frame = %id, "stale frame ignored");
            return None;
        }
        self.pending = None;

        let flow = step();
        match flow {
            Flow::Continue => self.pending = Some(queue.request_frame(self.owner)),
            Flow::Settle => {
                self.state = RunState::Settled;
                debug!(demo = %self.owner, "settled");
            }
        }
        Some(flow)
    }

    /// Cancels any pending frame and returns to `Idle`.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            trace!(demo = %self.owner, "pending frame cancelled");
        }
        self.state = RunState::Idle;
    }
}
