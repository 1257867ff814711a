// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Injectable time source.
//!
//! Deadline comparisons must be testable, so the managers never call
//! `OffsetDateTime::now_utc` themselves.

use std::cell::Cell;
use time::OffsetDateTime;

/// A supplier of the current instant.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock pinned to a settable instant, for deterministic tests.
#[derive(Debug)]
pub struct FixedClock {
    instant: Cell<OffsetDateTime>,
}

impl FixedClock {
    /// Creates a clock pinned to `instant`.
    #[must_use]
    pub const fn at(instant: OffsetDateTime) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, instant: OffsetDateTime) {
        self.instant.set(instant);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant.get()
    }
}
