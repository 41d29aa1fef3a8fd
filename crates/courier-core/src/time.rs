//! Explicit time model.
//!
//! # Design
//!
//! Every time-dependent operation in the engine (throttle windows, sample
//! ordering) takes an explicit `now: TimestampMs` argument rather than
//! reading a wall clock.  Production callers pass the platform clock; tests
//! pass literals and step time deterministically.
//!
//! Milliseconds-since-epoch as `i64` covers ±292 million years and matches
//! the resolution the platform location APIs report fixes at.

use std::fmt;

/// An absolute timestamp in milliseconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampMs(pub i64);

impl TimestampMs {
    pub const ZERO: TimestampMs = TimestampMs(0);

    /// The timestamp `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: i64) -> TimestampMs {
        TimestampMs(self.0 + ms)
    }

    /// Milliseconds elapsed from `earlier` to `self`, clamped to zero when
    /// `earlier` is in the future (platform clocks do jump backwards).
    #[inline]
    pub fn since(self, earlier: TimestampMs) -> i64 {
        (self.0 - earlier.0).max(0)
    }

    #[inline]
    pub fn from_unix_secs(secs: i64) -> TimestampMs {
        TimestampMs(secs * 1_000)
    }
}

impl std::ops::Add<i64> for TimestampMs {
    type Output = TimestampMs;
    #[inline]
    fn add(self, rhs: i64) -> TimestampMs {
        TimestampMs(self.0 + rhs)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
