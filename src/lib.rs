// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Writer-preferring shared mutex over a single 64-bit atomic word.
// The upper 32-bit half carries the writer flag, the lower half counts
// active readers; contended threads block on whichever half they need to
// see change, via the platform word-wait facility.

mod platform;

mod shared_mutex;
pub use shared_mutex::SharedMutex;

mod guard;
pub use guard::{ExclusiveGuard, SharedGuard};
