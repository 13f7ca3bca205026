// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Guard lifecycle tests: every acquisition made through a guard must be
// released exactly once, when the guard drops.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;

use shared_mutex::SharedMutex;

#[test]
fn exclusive_guard_releases_on_drop() {
    let lock = SharedMutex::new();
    {
        let _guard = lock.lock_scoped();
        assert!(!lock.try_lock_shared());
    }
    assert!(lock.try_lock_shared());
    lock.unlock_shared();
}

#[test]
fn shared_guard_releases_on_drop() {
    let lock = SharedMutex::new();
    {
        let _a = lock.lock_shared_scoped();
        let _b = lock.lock_shared_scoped();
        assert!(!lock.try_lock());
    }
    assert!(lock.try_lock());
    lock.unlock();
}

#[test]
fn try_scoped_variants() {
    let lock = SharedMutex::new();

    let write = lock.try_lock_scoped().expect("lock is free");
    assert!(lock.try_lock_scoped().is_none());
    assert!(lock.try_lock_shared_scoped().is_none());
    drop(write);

    let read = lock.try_lock_shared_scoped().expect("lock is free");
    assert!(lock.try_lock_scoped().is_none());
    drop(read);

    assert!(lock.try_lock_scoped().is_some());
}

#[test]
fn guards_protect_shared_data_across_threads() {
    let lock = Arc::new(SharedMutex::new());
    let data = Arc::new(AtomicI32::new(0));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let lock = Arc::clone(&lock);
            let data = Arc::clone(&data);
            thread::spawn(move || {
                for _ in 0..200 {
                    if i % 2 == 0 {
                        let _guard = lock.lock_scoped();
                        data.fetch_add(1, Ordering::Relaxed);
                    } else {
                        let _guard = lock.lock_shared_scoped();
                        assert!(data.load(Ordering::Relaxed) >= 0);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(data.load(Ordering::Relaxed), 400);
}
