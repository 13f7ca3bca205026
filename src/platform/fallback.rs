// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Portable word-wait synthesis for targets without a native futex-shaped
// facility (e.g. macOS): one monitor mutex plus a condvar per half. The
// predicate is checked under the monitor, and wakers pass through the
// monitor before notifying, so a waiter between its check and its
// Condvar::wait cannot miss a wake. Only the contended path pays for the
// monitor; the lock fast path never enters this module.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};

use crate::platform::{lower_value, upper_value};

pub(crate) struct PlatformFutex {
    monitor: Mutex<()>,
    upper: Condvar,
    lower: Condvar,
}

impl PlatformFutex {
    pub(crate) const fn new() -> Self {
        Self {
            monitor: Mutex::new(()),
            upper: Condvar::new(),
            lower: Condvar::new(),
        }
    }

    /// Block while the upper half of `state` still equals the upper half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_upper(&self, state: &AtomicU64, expected: u64) {
        let want = upper_value(expected);
        let mut guard = self.monitor.lock().unwrap();
        while upper_value(state.load(Ordering::SeqCst)) == want {
            guard = self.upper.wait(guard).unwrap();
        }
    }

    /// Block while the lower half of `state` still equals the lower half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_lower(&self, state: &AtomicU64, expected: u64) {
        let want = lower_value(expected);
        let mut guard = self.monitor.lock().unwrap();
        while lower_value(state.load(Ordering::SeqCst)) == want {
            guard = self.lower.wait(guard).unwrap();
        }
    }

    /// Wake every thread parked on the upper half.
    pub(crate) fn wake_upper_all(&self, _state: &AtomicU64) {
        // Barrier: pass through the monitor so a waiter that has checked
        // the predicate but not yet parked still observes this wake.
        drop(self.monitor.lock().unwrap());
        self.upper.notify_all();
    }

    /// Wake one thread parked on the lower half.
    pub(crate) fn wake_lower_one(&self, _state: &AtomicU64) {
        drop(self.monitor.lock().unwrap());
        self.lower.notify_one();
    }
}
