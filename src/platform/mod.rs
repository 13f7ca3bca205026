// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Word-wait facility: block a thread while one 32-bit half of a 64-bit
// atomic word still holds an expected value, and wake threads parked on
// that half. Native futex on Linux, WaitOnAddress on Windows, and a
// mutex + condvar synthesis everywhere else.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(windows)]
mod windows;

#[cfg(not(any(target_os = "linux", windows)))]
mod fallback;

// Re-export the platform-specific implementations under a uniform name.

#[cfg(target_os = "linux")]
pub(crate) use linux::PlatformFutex;

#[cfg(windows)]
pub(crate) use windows::PlatformFutex;

#[cfg(not(any(target_os = "linux", windows)))]
pub(crate) use fallback::PlatformFutex;

/// The lower 32 bits of a state word.
#[inline]
pub(crate) const fn lower_value(value: u64) -> u32 {
    value as u32
}

/// The upper 32 bits of a state word.
#[inline]
pub(crate) const fn upper_value(value: u64) -> u32 {
    (value >> 32) as u32
}
