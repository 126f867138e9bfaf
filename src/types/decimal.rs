//! Decimal values with schema-supplied precision and scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// Maximum supported decimal precision.
pub const MAX_PRECISION: u8 = 38;

/// Largest precision whose unscaled value always fits in an `i64`.
pub const MAX_COMPACT_PRECISION: u8 = 18;

/// Largest precision whose unscaled value always fits in an `i32`.
pub const MAX_INT_PRECISION: u8 = 9;

/// A fixed-point decimal: an unscaled integer interpreted with a precision
/// and scale.
///
/// The logical value is `unscaled * 10^-scale`. Precision and scale come from
/// the schema; the vector that stores the unscaled value does not know them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DecimalParts")]
pub struct Decimal {
    unscaled: i128,
    precision: u8,
    scale: u8,
}

/// Unvalidated serialized form of a [`Decimal`].
#[derive(Deserialize)]
struct DecimalParts {
    unscaled: i128,
    precision: u8,
    scale: u8,
}

impl TryFrom<DecimalParts> for Decimal {
    type Error = BatchError;

    fn try_from(parts: DecimalParts) -> Result<Self> {
        Decimal::from_unscaled_i128(parts.unscaled, parts.precision, parts.scale)
    }
}

impl Decimal {
    /// Creates a decimal from an unscaled 128-bit value.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidDecimal`] if precision/scale are out of
    /// range or the value has more digits than `precision`.
    pub fn from_unscaled_i128(unscaled: i128, precision: u8, scale: u8) -> Result<Self> {
        check_precision_scale(precision, scale)?;
        if unscaled.unsigned_abs() >= 10_u128.pow(u32::from(precision)) {
            return Err(BatchError::InvalidDecimal(format!(
                "unscaled value {unscaled} does not fit DECIMAL({precision}, {scale})"
            )));
        }
        Ok(Decimal {
            unscaled,
            precision,
            scale,
        })
    }

    /// Creates a decimal from an unscaled 64-bit value.
    ///
    /// # Errors
    ///
    /// See [`Decimal::from_unscaled_i128`].
    pub fn from_unscaled_i64(unscaled: i64, precision: u8, scale: u8) -> Result<Self> {
        Self::from_unscaled_i128(i128::from(unscaled), precision, scale)
    }

    /// Creates a decimal from a big-endian two's-complement unscaled value.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidDecimal`] if `bytes` is empty, longer
    /// than 16 bytes, or the value does not fit `precision`.
    pub fn from_be_bytes(bytes: &[u8], precision: u8, scale: u8) -> Result<Self> {
        if bytes.is_empty() || bytes.len() > 16 {
            return Err(BatchError::InvalidDecimal(format!(
                "unscaled byte length {} outside 1..=16",
                bytes.len()
            )));
        }
        let fill = if bytes[0] & 0x80 == 0 { 0x00 } else { 0xFF };
        let mut buf = [fill; 16];
        buf[16 - bytes.len()..].copy_from_slice(bytes);
        Self::from_unscaled_i128(i128::from_be_bytes(buf), precision, scale)
    }

    /// Returns the minimal big-endian two's-complement encoding of the
    /// unscaled value.
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let bytes = self.unscaled.to_be_bytes();
        let mut start = 0;
        while start < bytes.len() - 1 {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
                || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        bytes[start..].to_vec()
    }

    /// Returns the unscaled value.
    #[must_use]
    pub fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// Returns the unscaled value if it fits in an `i64`.
    #[must_use]
    pub fn to_unscaled_i64(&self) -> Option<i64> {
        i64::try_from(self.unscaled).ok()
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    #[must_use]
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Returns true if values of this precision always fit in an `i64`.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        is_compact_precision(self.precision)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = usize::from(self.scale);
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// Returns true if unscaled values of `precision` always fit in an `i64`.
#[must_use]
pub fn is_compact_precision(precision: u8) -> bool {
    precision <= MAX_COMPACT_PRECISION
}

/// Validates a precision/scale pair.
///
/// # Errors
///
/// Returns [`BatchError::InvalidDecimal`] unless `1 <= precision <= 38` and
/// `scale <= precision`.
pub fn check_precision_scale(precision: u8, scale: u8) -> Result<()> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(BatchError::InvalidDecimal(format!(
            "precision {precision} outside 1..={MAX_PRECISION}"
        )));
    }
    if scale > precision {
        return Err(BatchError::InvalidDecimal(format!(
            "scale {scale} exceeds precision {precision}"
        )));
    }
    Ok(())
}
