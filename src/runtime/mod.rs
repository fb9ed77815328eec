//! Cooperative UI runtime
//!
//! Single-threaded scheduler on a virtual clock. Components register interest
//! and receive [`Wakeup`]s from the host loop:
//! - **Timers**: fire once after a fixed delay, cancellable
//! - **Frames**: one-shot per-frame callbacks, re-requested by the owner
//! - **Resize listeners**: notified with the container's new pixel box
//!
//! Nothing fires for a handle after it was removed or cancelled.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Registration handle returned by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u64);

impl Handle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Pixel box of a hosting container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides strictly positive and finite
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Callback delivered to the owner of a handle
#[derive(Debug, Clone, PartialEq)]
pub enum Wakeup {
    Timer { handle: Handle },
    Frame { handle: Handle, frame: u64 },
    Resize { handle: Handle, size: Size },
}

impl Wakeup {
    pub fn handle(&self) -> Handle {
        match self {
            Wakeup::Timer { handle } | Wakeup::Frame { handle, .. } | Wakeup::Resize { handle, .. } => {
                *handle
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Runtime {
    now: Duration,
    next_id: u64,
    frame_no: u64,
    timers: BTreeMap<Handle, Duration>,
    frames: BTreeSet<Handle>,
    resize_listeners: BTreeSet<Handle>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> Handle {
        self.next_id += 1;
        Handle(self.next_id)
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_no
    }

    /// Schedule a fire-once timer
    pub fn set_timeout(&mut self, delay: Duration) -> Handle {
        let handle = self.issue();
        self.timers.insert(handle, self.now + delay);
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn clear_timeout(&mut self, handle: Handle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    /// Request a callback on the next frame
    pub fn request_frame(&mut self) -> Handle {
        let handle = self.issue();
        self.frames.insert(handle);
        handle
    }

    pub fn cancel_frame(&mut self, handle: Handle) -> bool {
        self.frames.remove(&handle)
    }

    pub fn add_resize_listener(&mut self) -> Handle {
        let handle = self.issue();
        self.resize_listeners.insert(handle);
        handle
    }

    pub fn remove_resize_listener(&mut self, handle: Handle) -> bool {
        self.resize_listeners.remove(&handle)
    }

    pub fn is_listening(&self, handle: Handle) -> bool {
        self.resize_listeners.contains(&handle)
    }

    pub fn is_frame_pending(&self, handle: Handle) -> bool {
        self.frames.contains(&handle)
    }

    pub fn is_timer_pending(&self, handle: Handle) -> bool {
        self.timers.contains_key(&handle)
    }

    /// Total registrations still able to fire
    pub fn pending(&self) -> usize {
        self.timers.len() + self.frames.len() + self.resize_listeners.len()
    }

    /// Advance the clock and collect expired timers in due order
    pub fn advance(&mut self, dt: Duration) -> Vec<Wakeup> {
        self.now += dt;
        let now = self.now;

        let mut due: Vec<(Duration, Handle)> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(handle, at)| (*at, *handle))
            .collect();
        due.sort();

        for (_, handle) in &due {
            self.timers.remove(handle);
        }

        due.into_iter()
            .map(|(_, handle)| Wakeup::Timer { handle })
            .collect()
    }

    /// Start a new frame, draining every outstanding frame request
    pub fn next_frame(&mut self) -> Vec<Wakeup> {
        self.frame_no += 1;
        let frame = self.frame_no;
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|handle| Wakeup::Frame { handle, frame })
            .collect()
    }

    /// Notify every resize listener of a new container box
    pub fn resize(&mut self, size: Size) -> Vec<Wakeup> {
        self.resize_listeners
            .iter()
            .map(|&handle| Wakeup::Resize { handle, size })
            .collect()
    }

    /// Time until the earliest pending timer, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .values()
            .min()
            .map(|&at| at.saturating_sub(self.now))
    }
}
