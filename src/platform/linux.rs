// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Linux futex(2) backend. The state word is watched one 32-bit half at a
// time: writer-flag waiters park on the upper half, the draining writer
// parks on the lower (reader-count) half. FUTEX_PRIVATE_FLAG because the
// lock is strictly intra-process.

use std::ptr;
use std::sync::atomic::AtomicU64;

use crate::platform::{lower_value, upper_value};

// Which 32-bit word of the AtomicU64 holds which half depends on byte order.
#[cfg(target_endian = "little")]
const LOWER_WORD: usize = 0;
#[cfg(target_endian = "little")]
const UPPER_WORD: usize = 1;
#[cfg(target_endian = "big")]
const LOWER_WORD: usize = 1;
#[cfg(target_endian = "big")]
const UPPER_WORD: usize = 0;

#[inline]
fn half_address(state: &AtomicU64, word: usize) -> *const u32 {
    (state as *const AtomicU64 as *const u32).wrapping_add(word)
}

fn futex_wait(address: *const u32, expected: u32) {
    // EAGAIN (half already changed) and EINTR both just mean "re-check";
    // the caller loops on the state word, so the result is ignored.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            address,
            libc::FUTEX_WAIT | libc::FUTEX_PRIVATE_FLAG,
            expected,
            ptr::null::<libc::timespec>(),
        );
    }
}

fn futex_wake(address: *const u32, count: i32) {
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            address,
            libc::FUTEX_WAKE | libc::FUTEX_PRIVATE_FLAG,
            count,
        );
    }
}

/// Native word-wait backend. Stateless: the kernel keys wait queues by the
/// address of the watched half.
pub(crate) struct PlatformFutex;

impl PlatformFutex {
    pub(crate) const fn new() -> Self {
        Self
    }

    /// Block while the upper half of `state` still equals the upper half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_upper(&self, state: &AtomicU64, expected: u64) {
        futex_wait(half_address(state, UPPER_WORD), upper_value(expected));
    }

    /// Block while the lower half of `state` still equals the lower half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_lower(&self, state: &AtomicU64, expected: u64) {
        futex_wait(half_address(state, LOWER_WORD), lower_value(expected));
    }

    /// Wake every thread parked on the upper half.
    pub(crate) fn wake_upper_all(&self, state: &AtomicU64) {
        futex_wake(half_address(state, UPPER_WORD), i32::MAX);
    }

    /// Wake one thread parked on the lower half.
    pub(crate) fn wake_lower_one(&self, state: &AtomicU64) {
        futex_wake(half_address(state, LOWER_WORD), 1);
    }
}
