// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Windows backend via WaitOnAddress / WakeByAddress, which have exactly
// the futex shape we need: block while a watched location still compares
// equal, wake one or all waiters on that location.

use std::ffi::c_void;
use std::mem;
use std::sync::atomic::AtomicU64;

use windows_sys::Win32::System::Threading::{
    WaitOnAddress, WakeByAddressAll, WakeByAddressSingle, INFINITE,
};

use crate::platform::{lower_value, upper_value};

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

fn address_wait(address: *const u32, expected: u32) {
    let compare = expected;
    unsafe {
        WaitOnAddress(
            address as *const c_void,
            &compare as *const u32 as *const c_void,
            mem::size_of::<u32>(),
            INFINITE,
        );
    }
}

/// Native word-wait backend. Stateless: the OS keys wait queues by the
/// address of the watched half.
pub(crate) struct PlatformFutex;

impl PlatformFutex {
    pub(crate) const fn new() -> Self {
        Self
    }

    /// Block while the upper half of `state` still equals the upper half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_upper(&self, state: &AtomicU64, expected: u64) {
        address_wait(half_address(state, UPPER_WORD), upper_value(expected));
    }

    /// Block while the lower half of `state` still equals the lower half
    /// of `expected`. May return spuriously.
    pub(crate) fn wait_lower(&self, state: &AtomicU64, expected: u64) {
        address_wait(half_address(state, LOWER_WORD), lower_value(expected));
    }

    /// Wake every thread parked on the upper half.
    pub(crate) fn wake_upper_all(&self, state: &AtomicU64) {
        unsafe { WakeByAddressAll(half_address(state, UPPER_WORD) as *const c_void) };
    }

    /// Wake one thread parked on the lower half.
    pub(crate) fn wake_lower_one(&self, state: &AtomicU64) {
        unsafe { WakeByAddressSingle(half_address(state, LOWER_WORD) as *const c_void) };
    }
}
