// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// RAII guards over the raw SharedMutex operations: acquire on
// construction, release on drop. The raw unlock calls have an unchecked
// "caller holds ownership" precondition; the guards pair every release
// with its acquisition by construction.

use crate::SharedMutex;

/// RAII guard for exclusive ownership. Releases on drop.
pub struct ExclusiveGuard<'a> {
    lock: &'a SharedMutex,
}

/// RAII guard for one unit of shared ownership. Releases on drop.
pub struct SharedGuard<'a> {
    lock: &'a SharedMutex,
}

impl SharedMutex {
    /// Acquire exclusive ownership, released when the guard drops.
    pub fn lock_scoped(&self) -> ExclusiveGuard<'_> {
        self.lock();
        ExclusiveGuard { lock: self }
    }

    /// Try to acquire exclusive ownership without blocking.
    pub fn try_lock_scoped(&self) -> Option<ExclusiveGuard<'_>> {
        self.try_lock().then(|| ExclusiveGuard { lock: self })
    }

    /// Acquire shared ownership, released when the guard drops.
    pub fn lock_shared_scoped(&self) -> SharedGuard<'_> {
        self.lock_shared();
        SharedGuard { lock: self }
    }

    /// Try to acquire shared ownership without blocking.
    pub fn try_lock_shared_scoped(&self) -> Option<SharedGuard<'_>> {
        self.try_lock_shared().then(|| SharedGuard { lock: self })
    }
}

impl Drop for ExclusiveGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

impl Drop for SharedGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock_shared();
    }
}
