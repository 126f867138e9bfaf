//! Timestamp vectors.

use super::{IntVector, LongVector};
use crate::error::{BatchError, Result};
use crate::types::timestamp::{check_precision, MICROS_PRECISION, MILLIS_PRECISION};
use crate::types::Timestamp;

/// Timestamps in one of two physical layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampVector {
    /// Epoch milliseconds plus nano-of-millisecond. Holds any precision and
    /// ignores the precision passed on reads.
    Split {
        millis: LongVector,
        nanos_of_milli: IntVector,
    },
    /// A single epoch count whose unit follows the read precision:
    /// milliseconds up to 3, microseconds up to 6, nanoseconds beyond.
    Epoch(LongVector),
}

impl TimestampVector {
    /// Creates an empty split-layout vector.
    #[must_use]
    pub fn split(capacity: usize) -> Self {
        TimestampVector::Split {
            millis: LongVector::with_capacity(capacity),
            nanos_of_milli: IntVector::with_capacity(capacity),
        }
    }

    /// Creates an empty epoch-count vector.
    #[must_use]
    pub fn epoch(capacity: usize) -> Self {
        TimestampVector::Epoch(LongVector::with_capacity(capacity))
    }

    /// Epoch counts for precision up to microseconds, split storage above
    /// that so nanosecond values keep the full date range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BatchError::InvalidTimestamp`] if `precision` is out
    /// of range.
    pub fn for_precision(precision: u8, capacity: usize) -> Result<Self> {
        check_precision(precision)?;
        Ok(if precision <= MICROS_PRECISION {
            Self::epoch(capacity)
        } else {
            Self::split(capacity)
        })
    }

    /// Appends `value`, encoded for `precision` when the layout needs it.
    /// Digits beyond the unit of an epoch layout are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidTimestamp`] if `precision` is out of
    /// range or the epoch count for `precision` overflows an `i64`.
    pub fn push(&mut self, value: Timestamp, precision: u8) -> Result<()> {
        check_precision(precision)?;
        match self {
            TimestampVector::Split {
                millis,
                nanos_of_milli,
            } => {
                millis.push(value.millisecond());
                nanos_of_milli.push(value.nano_of_millisecond());
            }
            TimestampVector::Epoch(v) => v.push(encode_epoch(value, precision)?),
        }
        Ok(())
    }

    pub fn push_null(&mut self) {
        match self {
            TimestampVector::Split {
                millis,
                nanos_of_milli,
            } => {
                millis.push_null();
                nanos_of_milli.push(0);
            }
            TimestampVector::Epoch(v) => v.push_null(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TimestampVector::Split { millis, .. } | TimestampVector::Epoch(millis) => millis.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn is_null_at(&self, row: usize) -> bool {
        match self {
            TimestampVector::Split { millis, .. } | TimestampVector::Epoch(millis) => {
                millis.is_null_at(row)
            }
        }
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        match self {
            TimestampVector::Split { millis, .. } | TimestampVector::Epoch(millis) => {
                millis.nulls().null_count()
            }
        }
    }

    /// Reads the timestamp at `row` with fractional-second `precision`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null, or `precision` exceeds 9.
    #[must_use]
    #[track_caller]
    pub fn get_timestamp(&self, row: usize, precision: u8) -> Timestamp {
        if let Err(e) = check_precision(precision) {
            panic!("{e}");
        }
        match self {
            TimestampVector::Split {
                millis,
                nanos_of_milli,
            } => {
                match Timestamp::from_epoch_millis_and_nanos(
                    millis.get(row),
                    nanos_of_milli.get(row),
                ) {
                    Ok(ts) => ts,
                    Err(e) => panic!("timestamp at row {row}: {e}"),
                }
            }
            TimestampVector::Epoch(v) => decode_epoch(v.get(row), precision),
        }
    }

    pub fn reset(&mut self) {
        match self {
            TimestampVector::Split {
                millis,
                nanos_of_milli,
            } => {
                millis.reset();
                nanos_of_milli.reset();
            }
            TimestampVector::Epoch(v) => v.reset(),
        }
    }
}

fn encode_epoch(value: Timestamp, precision: u8) -> Result<i64> {
    let count = if precision <= MILLIS_PRECISION {
        Some(value.to_epoch_millis())
    } else if precision <= MICROS_PRECISION {
        value.to_epoch_micros()
    } else {
        value.to_epoch_nanos()
    };
    count.ok_or_else(|| {
        BatchError::InvalidTimestamp(format!(
            "{value:?} overflows a 64-bit epoch count at precision {precision}"
        ))
    })
}

fn decode_epoch(count: i64, precision: u8) -> Timestamp {
    if precision <= MILLIS_PRECISION {
        Timestamp::from_epoch_millis(count)
    } else if precision <= MICROS_PRECISION {
        Timestamp::from_epoch_micros(count)
    } else {
        Timestamp::from_epoch_nanos(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_by_precision() {
        assert!(matches!(
            TimestampVector::for_precision(3, 4).unwrap(),
            TimestampVector::Epoch(_)
        ));
        assert!(matches!(
            TimestampVector::for_precision(9, 4).unwrap(),
            TimestampVector::Split { .. }
        ));
        assert!(TimestampVector::for_precision(10, 4).is_err());
    }

    #[test]
    fn test_epoch_roundtrip_per_precision() {
        let ts = Timestamp::from_epoch_nanos(1_700_000_000_123_456_789);
        for precision in [0_u8, 3, 6, 9] {
            let stored = ts.truncate(precision);
            let mut v = TimestampVector::epoch(1);
            v.push(stored, precision).unwrap();
            assert_eq!(v.get_timestamp(0, precision), stored);
        }
    }

    #[test]
    fn test_epoch_unit_follows_precision() {
        let mut v = TimestampVector::epoch(1);
        v.push(Timestamp::from_epoch_micros(1_500), 6).unwrap();
        assert_eq!(v.get_timestamp(0, 6), Timestamp::from_epoch_micros(1_500));
        // the same count read as milliseconds
        assert_eq!(v.get_timestamp(0, 3), Timestamp::from_epoch_millis(1_500));
    }

    #[test]
    fn test_split_ignores_precision() {
        let ts = Timestamp::from_epoch_nanos(-123_456_789);
        let mut v = TimestampVector::split(2);
        v.push(ts, 9).unwrap();
        v.push_null();
        assert_eq!(v.get_timestamp(0, 9), ts);
        assert_eq!(v.get_timestamp(0, 3), ts);
        assert!(v.is_null_at(1));
        assert_eq!(v.null_count(), 1);
    }

    #[test]
    fn test_epoch_overflow_is_rejected() {
        let year_2286 = Timestamp::from_epoch_millis(10_000_000_000_000);
        let mut v = TimestampVector::epoch(1);
        assert!(matches!(
            v.push(year_2286, 9),
            Err(BatchError::InvalidTimestamp(_))
        ));
        assert!(v.is_empty());

        v.push(year_2286, 6).unwrap();
        assert_eq!(v.get_timestamp(0, 6), year_2286);

        let mut split = TimestampVector::split(1);
        split.push(year_2286, 9).unwrap();
        assert_eq!(split.get_timestamp(0, 9), year_2286);
    }

    #[test]
    fn test_push_rejects_bad_precision() {
        let mut v = TimestampVector::split(1);
        assert!(v.push(Timestamp::from_epoch_millis(0), 10).is_err());
        assert!(v.is_empty());
    }

    #[test]
    #[should_panic(expected = "exceeds 9")]
    fn test_bad_read_precision() {
        let mut v = TimestampVector::epoch(1);
        v.push(Timestamp::from_epoch_millis(0), 3).unwrap();
        let _ = v.get_timestamp(0, 10);
    }
}
