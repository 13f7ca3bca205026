// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Writer-preferring shared mutex over one 64-bit atomic word.
// Layout: lower 32 bits count active readers, upper 32 bits form the
// writer flag. The flag spans the whole upper half so the word-wait
// facility can watch either half without cross-talk from the other.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::platform::PlatformFutex;

/// Mask of the reader-count half. Also the reader-count ceiling:
/// `lock_shared` panics and `try_lock_shared` fails rather than letting
/// the count wrap into the writer flag.
const READERS: u64 = (1u64 << 32) - 1;

/// Mask of the writer-flag half.
const WRITERS: u64 = !READERS;

/// A writer-preferring reader-writer lock.
///
/// Readers share the lock; a writer excludes everyone. A writer claims
/// the flag the moment its CAS lands, which blocks all *new* readers
/// immediately, then drains the readers counted before the claim. The
/// lock word is free exactly when it is zero.
///
/// The blocking operations park on the relevant half of the state word
/// through the platform word-wait facility; the uncontended paths are a
/// single compare-and-swap. No allocation, ever: construction is `const`
/// and the whole lock is two atomics (plus the condvar monitor on targets
/// without a native facility).
///
/// `unlock` / `unlock_shared` have the classic unchecked precondition:
/// the caller must actually hold the corresponding ownership. Use
/// [`lock_scoped`](SharedMutex::lock_scoped) /
/// [`lock_shared_scoped`](SharedMutex::lock_shared_scoped) to get RAII
/// pairing instead of calling the raw operations.
///
/// Not recursive, not upgradeable, intra-process only. Same-kind waiters
/// wake in no particular order; a steady stream of new readers arriving
/// before a writer's claim lands can in principle starve that writer.
pub struct SharedMutex {
    state: AtomicU64,
    // Threads parked on the upper half. Maintained by the parking thread
    // itself around its wait; lets unlock skip the wake syscall when
    // nobody is parked. Not needed for correctness.
    waiters: AtomicU32,
    futex: PlatformFutex,
}

impl SharedMutex {
    /// Create a new, unlocked shared mutex.
    pub const fn new() -> Self {
        Self {
            state: AtomicU64::new(0),
            waiters: AtomicU32::new(0),
            futex: PlatformFutex::new(),
        }
    }

    /// Acquire exclusive ownership, blocking until granted.
    ///
    /// Claims the writer flag as soon as no other writer holds it
    /// (preserving the current reader count), then drains: waits for the
    /// readers that were already counted to release. New readers arriving
    /// after the claim block until [`unlock`](SharedMutex::unlock).
    pub fn lock(&self) {
        let mut value = self.state.load(Ordering::SeqCst);
        loop {
            if value & WRITERS != 0 {
                self.wait_writer_released(value);
                value = self.state.load(Ordering::SeqCst);
            } else {
                match self.state.compare_exchange(
                    value,
                    value | WRITERS,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                ) {
                    Ok(_) => break,
                    Err(current) => value = current,
                }
            }
        }

        // Flag claimed; drain the pre-existing readers.
        value |= WRITERS;
        while value & READERS != 0 {
            self.futex.wait_lower(&self.state, value);
            value = self.state.load(Ordering::SeqCst);
        }
    }

    /// Try to acquire exclusive ownership without blocking.
    ///
    /// Succeeds only when the lock is completely free — stricter than
    /// [`lock`](SharedMutex::lock), which would claim the flag and drain
    /// active readers. Returns `false` if any reader or writer is present.
    pub fn try_lock(&self) -> bool {
        self.state
            .compare_exchange(0, WRITERS, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release exclusive ownership.
    ///
    /// The caller must hold exclusive ownership; this is not checked.
    /// Wakes every thread parked on the writer flag — the parked set
    /// mixes would-be readers and would-be writers, and only re-running
    /// their acquisition loops decides who proceeds.
    pub fn unlock(&self) {
        self.state.store(0, Ordering::SeqCst);
        if self.waiters.load(Ordering::SeqCst) != 0 {
            self.futex.wake_upper_all(&self.state);
        }
    }

    /// Acquire one unit of shared ownership, blocking until granted.
    ///
    /// Blocks while a writer holds (or is draining for) the flag.
    ///
    /// # Panics
    ///
    /// Panics if `u32::MAX` threads already hold shared ownership.
    pub fn lock_shared(&self) {
        let mut value = self.state.load(Ordering::SeqCst);
        loop {
            if value & WRITERS != 0 {
                self.wait_writer_released(value);
                value = self.state.load(Ordering::SeqCst);
            } else if value & READERS == READERS {
                panic!("SharedMutex reader count overflow");
            } else {
                match self.state.compare_exchange(
                    value,
                    value + 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                ) {
                    Ok(_) => break,
                    Err(current) => value = current,
                }
            }
        }
    }

    /// Try to acquire one unit of shared ownership without blocking.
    ///
    /// A single load-then-CAS: fails if a writer is present, if the
    /// reader count is at its ceiling, or if the CAS loses a race —
    /// callers wanting retry loop externally or use
    /// [`lock_shared`](SharedMutex::lock_shared).
    pub fn try_lock_shared(&self) -> bool {
        let value = self.state.load(Ordering::SeqCst);
        value & WRITERS == 0
            && value & READERS != READERS
            && self
                .state
                .compare_exchange(value, value + 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
    }

    /// Release one unit of shared ownership.
    ///
    /// The caller must hold shared ownership; this is not checked. If
    /// this was the last reader a claiming writer is draining behind,
    /// wakes that writer — exactly one thread can ever be in the drain
    /// wait, so wake-one suffices.
    pub fn unlock_shared(&self) {
        let value = self.state.fetch_sub(1, Ordering::SeqCst) - 1;
        if value == WRITERS {
            self.futex.wake_lower_one(&self.state);
        }
    }

    /// Park on the upper half while it still holds `observed`'s value,
    /// registering in the waiter count around the wait.
    fn wait_writer_released(&self, observed: u64) {
        self.waiters.fetch_add(1, Ordering::SeqCst);
        self.futex.wait_upper(&self.state, observed);
        self.waiters.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Default for SharedMutex {
    fn default() -> Self {
        Self::new()
    }
}
