// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot, cancellable dismiss timers.

use core::time::Duration;

use crate::time::HostTime;

/// A one-shot deadline owned by a single popup entry.
///
/// The owning stack polls the timer with the current time. Once the deadline has
/// passed, [`DismissTimer::poll`] returns true exactly once; afterwards, and after
/// [`DismissTimer::cancel`], it always returns false.
///
/// ```
/// use core::time::Duration;
/// use popstack_stack::{DismissTimer, HostTime};
///
/// let mut timer = DismissTimer::start(HostTime::ZERO, Duration::from_millis(100));
/// assert!(!timer.poll(HostTime::from_millis(99)));
/// assert!(timer.poll(HostTime::from_millis(100)));
/// assert!(!timer.poll(HostTime::from_millis(200)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissTimer {
    deadline: HostTime,
    armed: bool,
}

impl DismissTimer {
    /// Arm a timer that expires `after` the given start time.
    pub fn start(now: HostTime, after: Duration) -> Self {
        Self {
            deadline: now + after,
            armed: true,
        }
    }

    /// Returns true if the timer expired at or before `now` and has not fired yet.
    ///
    /// Firing disarms the timer.
    pub fn poll(&mut self, now: HostTime) -> bool {
        if self.armed && now >= self.deadline {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Disarm without firing. Cancelling a fired or cancelled timer is a no-op.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// The expiry time, or `None` once fired or cancelled.
    pub fn deadline(&self) -> Option<HostTime> {
        self.armed.then_some(self.deadline)
    }

    /// Returns true while the timer can still fire.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
