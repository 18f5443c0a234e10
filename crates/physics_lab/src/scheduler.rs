//! Display-refresh scheduler.
//!
//! [`FrameQueue`] is the single "call me before the next repaint" primitive
//! shared by every simulation. It is single-threaded: the host loop drains
//! due requests once per refresh with [`FrameQueue::take_due`] and hands each
//! one back to its owner.
//!
//! Requests are held through [`PendingFrame`] guards. Dropping a guard
//! cancels its request, so any path that discards the guard (stop, reset,
//! tab switch, dropping the simulation) also releases the callback.
//!
//! # Example
//!
//! ```rust
//! use physics_lab::{Demo, FrameQueue};
//!
//! let queue = FrameQueue::new();
//! let frame = queue.request_frame(Demo::Harmonic);
//! assert_eq!(queue.pending_count(), 1);
//!
//! drop(frame);
//! assert_eq!(queue.pending_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::messages::Demo;

/// Identifier of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A due frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Id the owner is waiting for.
    pub id: FrameId,
    /// Demo that asked for the frame.
    pub owner: Demo,
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: u64,
    pending: Vec<FrameRequest>,
}

/// Shared queue of frame callbacks awaiting the next refresh.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    state: Rc<RefCell<QueueState>>,
}

impl FrameQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules one callback for `owner` before the next refresh.
    #[must_use = "dropping the guard cancels the request"]
    pub fn request_frame(&self, owner: Demo) -> PendingFrame {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = FrameId(state.next_id);
        state.pending.push(FrameRequest { id, owner });
        PendingFrame {
            id,
            owner,
            queue: Rc::downgrade(&self.state),
        }
    }

    /// Removes and returns every request scheduled so far, oldest first.
    ///
    /// Requests made while the returned batch is being delivered wait for
    /// the next call.
    pub fn take_due(&self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    /// Number of requests not yet delivered.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Returns `true` if `id` is still waiting for delivery.
    #[must_use]
    pub fn is_scheduled(&self, id: FrameId) -> bool {
        self.state.borrow().pending.iter().any(|r| r.id == id)
    }

    /// Returns `true` if `owner` has any request waiting.
    #[must_use]
    pub fn has_pending_for(&self, owner: Demo) -> bool {
        self.state.borrow().pending.iter().any(|r| r.owner == owner)
    }
}

/// Guard for one scheduled frame. Dropping it cancels the request.
#[derive(Debug)]
pub struct PendingFrame {
    id: FrameId,
    owner: Demo,
    queue: Weak<RefCell<QueueState>>,
}

impl PendingFrame {
    /// Id of the scheduled frame.
    #[must_use]
    pub const fn id(&self) -> FrameId {
        self.id
    }

    /// Demo that owns the request.
    #[must_use]
    pub const fn owner(&self) -> Demo {
        self.owner
    }

    /// Cancels the request. Equivalent to dropping the guard.
    pub fn cancel(self) {}
}

impl Drop for PendingFrame {
    fn drop(&mut self) {
        if let Some(state) = self.queue.upgrade()
            && let Ok(mut state) = state.try_borrow_mut()
        {
            state.pending.retain(|r| r.id != self.id);
        }
    }
}
