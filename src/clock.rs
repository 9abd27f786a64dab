// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sources of "now".
//!
//! The engine never calls `Utc::now()` directly: it reads the current
//! instant once per evaluation from a [`Clock`], so every marker comparison
//! inside one request sees the same instant.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Anything that can report the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant viewed in the league zone.
    fn now_in(&self, zone: Tz) -> DateTime<Tz> {
        self.now().with_timezone(&zone)
    }
}

/// The operating-system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at a wall-clock time in `zone`.
    ///
    /// Returns `None` when the local time does not exist in `zone`
    /// (spring-forward gap).
    pub fn at_local(zone: Tz, local: chrono::NaiveDateTime) -> Option<Self> {
        zone.from_local_datetime(&local)
            .earliest()
            .map(|dt| FixedClock(dt.with_timezone(&Utc)))
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
