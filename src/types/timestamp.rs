//! Timestamp values with schema-supplied fractional-second precision.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// Maximum supported fractional-second precision (nanoseconds).
pub const MAX_PRECISION: u8 = 9;

/// Largest precision stored as epoch milliseconds.
pub const MILLIS_PRECISION: u8 = 3;

/// Largest precision stored as epoch microseconds.
pub const MICROS_PRECISION: u8 = 6;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// An instant as milliseconds since the Unix epoch plus the nanoseconds
/// within that millisecond.
///
/// `nano_of_millisecond` is always in `0..1_000_000`, so instants before the
/// epoch carry a negative millisecond and a non-negative nano component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TimestampParts")]
pub struct Timestamp {
    millisecond: i64,
    nano_of_millisecond: i32,
}

/// Unvalidated serialized form of a [`Timestamp`].
#[derive(Deserialize)]
struct TimestampParts {
    millisecond: i64,
    nano_of_millisecond: i32,
}

impl TryFrom<TimestampParts> for Timestamp {
    type Error = BatchError;

    fn try_from(parts: TimestampParts) -> Result<Self> {
        Timestamp::from_epoch_millis_and_nanos(parts.millisecond, parts.nano_of_millisecond)
    }
}

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub fn from_epoch_millis(millisecond: i64) -> Self {
        Timestamp {
            millisecond,
            nano_of_millisecond: 0,
        }
    }

    /// Creates a timestamp from epoch milliseconds and a nano-of-millisecond.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidTimestamp`] if `nano_of_millisecond` is
    /// outside `0..1_000_000`.
    pub fn from_epoch_millis_and_nanos(millisecond: i64, nano_of_millisecond: i32) -> Result<Self> {
        if !(0..1_000_000).contains(&nano_of_millisecond) {
            return Err(BatchError::InvalidTimestamp(format!(
                "nano of millisecond {nano_of_millisecond} outside 0..1000000"
            )));
        }
        Ok(Timestamp {
            millisecond,
            nano_of_millisecond,
        })
    }

    /// Creates a timestamp from epoch microseconds.
    #[must_use]
    pub fn from_epoch_micros(micros: i64) -> Self {
        Timestamp {
            millisecond: micros.div_euclid(1_000),
            nano_of_millisecond: (micros.rem_euclid(1_000) * 1_000) as i32,
        }
    }

    /// Creates a timestamp from epoch nanoseconds.
    #[must_use]
    pub fn from_epoch_nanos(nanos: i64) -> Self {
        Timestamp {
            millisecond: nanos.div_euclid(NANOS_PER_MILLI),
            nano_of_millisecond: nanos.rem_euclid(NANOS_PER_MILLI) as i32,
        }
    }

    /// Converts a chrono date-time, interpreted as UTC.
    #[must_use]
    pub fn from_naive_date_time(dt: NaiveDateTime) -> Self {
        let utc = dt.and_utc();
        Timestamp {
            millisecond: utc.timestamp_millis(),
            nano_of_millisecond: (utc.timestamp_subsec_nanos() % 1_000_000) as i32,
        }
    }

    #[must_use]
    pub fn millisecond(&self) -> i64 {
        self.millisecond
    }

    #[must_use]
    pub fn nano_of_millisecond(&self) -> i32 {
        self.nano_of_millisecond
    }

    /// Epoch milliseconds, dropping the sub-millisecond part.
    #[must_use]
    pub fn to_epoch_millis(&self) -> i64 {
        self.millisecond
    }

    /// Epoch microseconds, dropping the sub-microsecond part, or `None` if
    /// the count does not fit an `i64`.
    #[must_use]
    pub fn to_epoch_micros(&self) -> Option<i64> {
        self.millisecond
            .checked_mul(1_000)?
            .checked_add(i64::from(self.nano_of_millisecond) / 1_000)
    }

    /// Epoch nanoseconds, or `None` outside the years 1677 to 2262.
    #[must_use]
    pub fn to_epoch_nanos(&self) -> Option<i64> {
        self.millisecond
            .checked_mul(NANOS_PER_MILLI)?
            .checked_add(i64::from(self.nano_of_millisecond))
    }

    /// Drops fractional-second digits beyond `precision`.
    ///
    /// # Panics
    ///
    /// Panics if `precision` exceeds [`MAX_PRECISION`].
    #[must_use]
    pub fn truncate(&self, precision: u8) -> Self {
        assert!(
            precision <= MAX_PRECISION,
            "timestamp precision {precision} exceeds {MAX_PRECISION}"
        );
        let unit = 10_i64.pow(u32::from(MAX_PRECISION - precision));
        let second_millis = self.millisecond.div_euclid(1_000) * 1_000;
        let frac_nanos = self.millisecond.rem_euclid(1_000) * NANOS_PER_MILLI
            + i64::from(self.nano_of_millisecond);
        let frac_nanos = frac_nanos - frac_nanos % unit;
        Timestamp {
            millisecond: second_millis + frac_nanos / NANOS_PER_MILLI,
            nano_of_millisecond: (frac_nanos % NANOS_PER_MILLI) as i32,
        }
    }

    /// Converts to a chrono date-time in UTC, or `None` if out of range.
    #[must_use]
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        let secs = self.millisecond.div_euclid(1_000);
        let nanos = self.millisecond.rem_euclid(1_000) * NANOS_PER_MILLI
            + i64::from(self.nano_of_millisecond);
        DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
    }
}

/// Validates a timestamp precision.
///
/// # Errors
///
/// Returns [`BatchError::InvalidTimestamp`] if `precision` exceeds
/// [`MAX_PRECISION`].
pub fn check_precision(precision: u8) -> Result<()> {
    if precision > MAX_PRECISION {
        return Err(BatchError::InvalidTimestamp(format!(
            "precision {precision} exceeds {MAX_PRECISION}"
        )));
    }
    Ok(())
}
