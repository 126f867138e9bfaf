//! Decimal vectors.

use super::{BytesVector, IntVector, LongVector};
use crate::error::{BatchError, Result};
use crate::types::decimal::{check_precision_scale, MAX_COMPACT_PRECISION, MAX_INT_PRECISION};
use crate::types::Decimal;

/// Unscaled decimal values in one of three physical layouts.
///
/// The layout only bounds how many digits fit; precision and scale are
/// supplied on every read, so one `Long` vector can back `DECIMAL(12, 2)` as
/// well as `DECIMAL(18, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum DecimalVector {
    /// Unscaled values of at most 9 digits.
    Int(IntVector),
    /// Unscaled values of at most 18 digits.
    Long(LongVector),
    /// Big-endian two's-complement unscaled values of any precision.
    Bytes(BytesVector),
}

impl DecimalVector {
    /// Chooses the narrowest layout for `precision`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidDecimal`] if precision/scale are out of
    /// range.
    pub fn for_precision(precision: u8, scale: u8, capacity: usize) -> Result<Self> {
        check_precision_scale(precision, scale)?;
        Ok(if precision <= MAX_INT_PRECISION {
            DecimalVector::Int(IntVector::with_capacity(capacity))
        } else if precision <= MAX_COMPACT_PRECISION {
            DecimalVector::Long(LongVector::with_capacity(capacity))
        } else {
            DecimalVector::Bytes(BytesVector::with_capacity(capacity))
        })
    }

    /// Appends the unscaled value of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidDecimal`] if the unscaled value does not
    /// fit the layout.
    pub fn push(&mut self, value: &Decimal) -> Result<()> {
        let layout = self.layout_name();
        let overflow = || {
            BatchError::InvalidDecimal(format!(
                "unscaled value {} does not fit a {layout} decimal vector",
                value.unscaled()
            ))
        };
        match self {
            DecimalVector::Int(v) => {
                v.push(i32::try_from(value.unscaled()).map_err(|_| overflow())?);
            }
            DecimalVector::Long(v) => {
                v.push(i64::try_from(value.unscaled()).map_err(|_| overflow())?);
            }
            DecimalVector::Bytes(v) => v.append(&value.to_be_bytes()),
        }
        Ok(())
    }

    pub fn push_null(&mut self) {
        match self {
            DecimalVector::Int(v) => v.push_null(),
            DecimalVector::Long(v) => v.push_null(),
            DecimalVector::Bytes(v) => v.push_null(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DecimalVector::Int(v) => v.len(),
            DecimalVector::Long(v) => v.len(),
            DecimalVector::Bytes(v) => v.len(),
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
            DecimalVector::Int(v) => v.is_null_at(row),
            DecimalVector::Long(v) => v.is_null_at(row),
            DecimalVector::Bytes(v) => v.is_null_at(row),
        }
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        match self {
            DecimalVector::Int(v) => v.nulls().null_count(),
            DecimalVector::Long(v) => v.nulls().null_count(),
            DecimalVector::Bytes(v) => v.nulls().null_count(),
        }
    }

    /// Reads the unscaled value at `row` as `DECIMAL(precision, scale)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null, if precision/scale are out
    /// of range, or if the stored value has more digits than `precision`.
    #[must_use]
    #[track_caller]
    pub fn get_decimal(&self, row: usize, precision: u8, scale: u8) -> Decimal {
        let decoded = match self {
            DecimalVector::Int(v) => {
                Decimal::from_unscaled_i128(i128::from(v.get(row)), precision, scale)
            }
            DecimalVector::Long(v) => {
                Decimal::from_unscaled_i128(i128::from(v.get(row)), precision, scale)
            }
            DecimalVector::Bytes(v) => {
                Decimal::from_be_bytes(v.get_bytes(row).as_slice(), precision, scale)
            }
        };
        match decoded {
            Ok(decimal) => decimal,
            Err(e) => panic!("decimal at row {row}: {e}"),
        }
    }

    pub fn reset(&mut self) {
        match self {
            DecimalVector::Int(v) => v.reset(),
            DecimalVector::Long(v) => v.reset(),
            DecimalVector::Bytes(v) => v.reset(),
        }
    }

    fn layout_name(&self) -> &'static str {
        match self {
            DecimalVector::Int(_) => "32-bit",
            DecimalVector::Long(_) => "64-bit",
            DecimalVector::Bytes(_) => "binary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_by_precision() {
        assert!(matches!(
            DecimalVector::for_precision(9, 2, 4).unwrap(),
            DecimalVector::Int(_)
        ));
        assert!(matches!(
            DecimalVector::for_precision(18, 2, 4).unwrap(),
            DecimalVector::Long(_)
        ));
        assert!(matches!(
            DecimalVector::for_precision(38, 10, 4).unwrap(),
            DecimalVector::Bytes(_)
        ));
        assert!(DecimalVector::for_precision(0, 0, 4).is_err());
    }

    #[test]
    fn test_roundtrip_each_layout() {
        for (precision, scale, unscaled) in [
            (9_u8, 2_u8, -12_345_i128),
            (18, 4, 123_456_789_012_345),
            (38, 10, -(10_i128.pow(37)) + 7),
        ] {
            let value = Decimal::from_unscaled_i128(unscaled, precision, scale).unwrap();
            let mut v = DecimalVector::for_precision(precision, scale, 4).unwrap();
            v.push(&value).unwrap();
            v.push_null();
            assert_eq!(v.get_decimal(0, precision, scale), value);
            assert!(v.is_null_at(1));
            assert_eq!(v.null_count(), 1);
        }
    }

    #[test]
    fn test_same_storage_different_scale() {
        let mut v = DecimalVector::Long(LongVector::new());
        v.push(&Decimal::from_unscaled_i64(12_345, 10, 2).unwrap())
            .unwrap();
        assert_eq!(v.get_decimal(0, 10, 2).to_string(), "123.45");
        assert_eq!(v.get_decimal(0, 10, 0).to_string(), "12345");
    }

    #[test]
    fn test_push_overflow() {
        let mut v = DecimalVector::Int(IntVector::new());
        let wide = Decimal::from_unscaled_i64(i64::from(i32::MAX) + 1, 18, 0).unwrap();
        assert!(matches!(v.push(&wide), Err(BatchError::InvalidDecimal(_))));
        assert!(v.is_empty());
    }

    #[test]
    #[should_panic(expected = "does not fit DECIMAL(3, 0)")]
    fn test_read_with_too_small_precision() {
        let mut v = DecimalVector::Int(IntVector::new());
        v.push(&Decimal::from_unscaled_i64(12_345, 5, 0).unwrap())
            .unwrap();
        let _ = v.get_decimal(0, 3, 0);
    }
}
