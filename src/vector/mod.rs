//! Column vectors: per-column physical storage for one value kind.
//!
//! [`ColumnVector`] is a closed enum over every supported kind. Accessors
//! match on the variant they need and panic on any other, so a broken
//! schema/vector binding fails loudly instead of reading the wrong storage.

mod array;
mod bytes;
mod decimal;
mod map;
mod null_mask;
mod primitive;
mod row;
mod timestamp;

use std::fmt;

use crate::batch::{ArrayView, MapView, RowView};
use crate::types::{Decimal, Timestamp};

pub use array::ArrayVector;
pub use bytes::{ByteView, BytesVector, SegmentId};
pub use decimal::DecimalVector;
pub use map::MapVector;
pub use null_mask::NullMask;
pub use primitive::{
    BooleanVector, ByteVector, DoubleVector, FloatVector, IntVector, LongVector, NativeType,
    PrimitiveVector, ShortVector,
};
pub use row::RowVector;
pub use timestamp::TimestampVector;

/// The closed set of vector kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    Decimal,
    Timestamp,
    Array,
    Row,
    Map,
}

impl VectorKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            VectorKind::Boolean => "Boolean",
            VectorKind::Byte => "Byte",
            VectorKind::Short => "Short",
            VectorKind::Int => "Int",
            VectorKind::Long => "Long",
            VectorKind::Float => "Float",
            VectorKind::Double => "Double",
            VectorKind::Bytes => "Bytes",
            VectorKind::Decimal => "Decimal",
            VectorKind::Timestamp => "Timestamp",
            VectorKind::Array => "Array",
            VectorKind::Row => "Row",
            VectorKind::Map => "Map",
        }
    }
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column vector of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnVector {
    Boolean(BooleanVector),
    Byte(ByteVector),
    Short(ShortVector),
    Int(IntVector),
    Long(LongVector),
    Float(FloatVector),
    Double(DoubleVector),
    Bytes(BytesVector),
    Decimal(DecimalVector),
    Timestamp(TimestampVector),
    Array(ArrayVector),
    Row(RowVector),
    Map(MapVector),
}

macro_rules! impl_from_vector {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ColumnVector {
                fn from(vector: $ty) -> Self {
                    ColumnVector::$variant(vector)
                }
            }
        )*
    };
}

impl_from_vector!(
    Boolean(BooleanVector),
    Byte(ByteVector),
    Short(ShortVector),
    Int(IntVector),
    Long(LongVector),
    Float(FloatVector),
    Double(DoubleVector),
    Bytes(BytesVector),
    Decimal(DecimalVector),
    Timestamp(TimestampVector),
    Array(ArrayVector),
    Row(RowVector),
    Map(MapVector),
);

/// Generates a row-addressed getter that requires one variant.
macro_rules! vector_getter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ret:ty) => {
        $(#[$doc])*
        #[inline]
        #[must_use]
        #[track_caller]
        pub fn $name(&self, row: usize) -> $ret {
            match self {
                ColumnVector::$variant(v) => v.get(row),
                other => kind_mismatch(VectorKind::$variant, other.kind()),
            }
        }
    };
}

impl ColumnVector {
    #[must_use]
    pub fn kind(&self) -> VectorKind {
        match self {
            ColumnVector::Boolean(_) => VectorKind::Boolean,
            ColumnVector::Byte(_) => VectorKind::Byte,
            ColumnVector::Short(_) => VectorKind::Short,
            ColumnVector::Int(_) => VectorKind::Int,
            ColumnVector::Long(_) => VectorKind::Long,
            ColumnVector::Float(_) => VectorKind::Float,
            ColumnVector::Double(_) => VectorKind::Double,
            ColumnVector::Bytes(_) => VectorKind::Bytes,
            ColumnVector::Decimal(_) => VectorKind::Decimal,
            ColumnVector::Timestamp(_) => VectorKind::Timestamp,
            ColumnVector::Array(_) => VectorKind::Array,
            ColumnVector::Row(_) => VectorKind::Row,
            ColumnVector::Map(_) => VectorKind::Map,
        }
    }

    /// Number of populated rows, null rows included.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnVector::Boolean(v) => v.len(),
            ColumnVector::Byte(v) => v.len(),
            ColumnVector::Short(v) => v.len(),
            ColumnVector::Int(v) => v.len(),
            ColumnVector::Long(v) => v.len(),
            ColumnVector::Float(v) => v.len(),
            ColumnVector::Double(v) => v.len(),
            ColumnVector::Bytes(v) => v.len(),
            ColumnVector::Decimal(v) => v.len(),
            ColumnVector::Timestamp(v) => v.len(),
            ColumnVector::Array(v) => v.len(),
            ColumnVector::Row(v) => v.len(),
            ColumnVector::Map(v) => v.len(),
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
            ColumnVector::Boolean(v) => v.is_null_at(row),
            ColumnVector::Byte(v) => v.is_null_at(row),
            ColumnVector::Short(v) => v.is_null_at(row),
            ColumnVector::Int(v) => v.is_null_at(row),
            ColumnVector::Long(v) => v.is_null_at(row),
            ColumnVector::Float(v) => v.is_null_at(row),
            ColumnVector::Double(v) => v.is_null_at(row),
            ColumnVector::Bytes(v) => v.is_null_at(row),
            ColumnVector::Decimal(v) => v.is_null_at(row),
            ColumnVector::Timestamp(v) => v.is_null_at(row),
            ColumnVector::Array(v) => v.is_null_at(row),
            ColumnVector::Row(v) => v.is_null_at(row),
            ColumnVector::Map(v) => v.is_null_at(row),
        }
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        match self {
            ColumnVector::Boolean(v) => v.nulls().null_count(),
            ColumnVector::Byte(v) => v.nulls().null_count(),
            ColumnVector::Short(v) => v.nulls().null_count(),
            ColumnVector::Int(v) => v.nulls().null_count(),
            ColumnVector::Long(v) => v.nulls().null_count(),
            ColumnVector::Float(v) => v.nulls().null_count(),
            ColumnVector::Double(v) => v.nulls().null_count(),
            ColumnVector::Bytes(v) => v.nulls().null_count(),
            ColumnVector::Decimal(v) => v.null_count(),
            ColumnVector::Timestamp(v) => v.null_count(),
            ColumnVector::Array(v) => v.nulls().null_count(),
            ColumnVector::Row(v) => v.nulls().null_count(),
            ColumnVector::Map(v) => v.nulls().null_count(),
        }
    }

    #[must_use]
    pub fn has_nulls(&self) -> bool {
        self.null_count() > 0
    }

    /// Appends a null row.
    pub fn push_null(&mut self) {
        match self {
            ColumnVector::Boolean(v) => v.push_null(),
            ColumnVector::Byte(v) => v.push_null(),
            ColumnVector::Short(v) => v.push_null(),
            ColumnVector::Int(v) => v.push_null(),
            ColumnVector::Long(v) => v.push_null(),
            ColumnVector::Float(v) => v.push_null(),
            ColumnVector::Double(v) => v.push_null(),
            ColumnVector::Bytes(v) => v.push_null(),
            ColumnVector::Decimal(v) => v.push_null(),
            ColumnVector::Timestamp(v) => v.push_null(),
            ColumnVector::Array(v) => v.push_null(),
            ColumnVector::Row(v) => v.push_null(),
            ColumnVector::Map(v) => v.push_null(),
        }
    }

    /// Appends `rows` null rows.
    pub fn fill_nulls(&mut self, rows: usize) {
        for _ in 0..rows {
            self.push_null();
        }
    }

    /// Clears all rows, keeping allocations where the kind allows it.
    pub fn reset(&mut self) {
        match self {
            ColumnVector::Boolean(v) => v.reset(),
            ColumnVector::Byte(v) => v.reset(),
            ColumnVector::Short(v) => v.reset(),
            ColumnVector::Int(v) => v.reset(),
            ColumnVector::Long(v) => v.reset(),
            ColumnVector::Float(v) => v.reset(),
            ColumnVector::Double(v) => v.reset(),
            ColumnVector::Bytes(v) => v.reset(),
            ColumnVector::Decimal(v) => v.reset(),
            ColumnVector::Timestamp(v) => v.reset(),
            ColumnVector::Array(v) => v.reset(),
            ColumnVector::Row(v) => v.reset(),
            ColumnVector::Map(v) => v.reset(),
        }
    }

    vector_getter!(get_boolean, Boolean, bool);
    vector_getter!(get_byte, Byte, i8);
    vector_getter!(get_short, Short, i16);
    vector_getter!(get_int, Int, i32);
    vector_getter!(get_long, Long, i64);
    vector_getter!(get_float, Float, f32);
    vector_getter!(get_double, Double, f64);

    /// # Panics
    ///
    /// Panics unless this is a bytes vector with a non-null `row`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn get_byte_view(&self, row: usize) -> ByteView<'_> {
        match self {
            ColumnVector::Bytes(v) => v.get_bytes(row),
            other => kind_mismatch(VectorKind::Bytes, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless this is a decimal vector with a non-null `row` whose
    /// value fits `precision`.
    #[must_use]
    #[track_caller]
    pub fn get_decimal(&self, row: usize, precision: u8, scale: u8) -> Decimal {
        match self {
            ColumnVector::Decimal(v) => v.get_decimal(row, precision, scale),
            other => kind_mismatch(VectorKind::Decimal, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless this is a timestamp vector with a non-null `row`.
    #[must_use]
    #[track_caller]
    pub fn get_timestamp(&self, row: usize, precision: u8) -> Timestamp {
        match self {
            ColumnVector::Timestamp(v) => v.get_timestamp(row, precision),
            other => kind_mismatch(VectorKind::Timestamp, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless this is an array vector with a non-null `row`.
    #[must_use]
    #[track_caller]
    pub fn get_array(&self, row: usize) -> ArrayView<'_> {
        match self {
            ColumnVector::Array(v) => v.get_array(row),
            other => kind_mismatch(VectorKind::Array, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless this is a row vector with a non-null `row`.
    #[must_use]
    #[track_caller]
    pub fn get_row(&self, row: usize) -> RowView<'_> {
        match self {
            ColumnVector::Row(v) => v.get_row(row),
            other => kind_mismatch(VectorKind::Row, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless this is a map vector with a non-null `row`.
    #[must_use]
    #[track_caller]
    pub fn get_map(&self, row: usize) -> MapView<'_> {
        match self {
            ColumnVector::Map(v) => v.get_map(row),
            other => kind_mismatch(VectorKind::Map, other.kind()),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn kind_mismatch(expected: VectorKind, actual: VectorKind) -> ! {
    panic!("vector kind mismatch: requested {expected}, found {actual}")
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn null_access(kind: VectorKind, row: usize) -> ! {
    panic!("{kind} read of null cell at row {row}")
}

#[inline]
#[track_caller]
pub(crate) fn check_row(row: usize, len: usize) {
    if row >= len {
        row_out_of_bounds(row, len);
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn row_out_of_bounds(row: usize, len: usize) -> ! {
    panic!("row index {row} out of bounds for vector of length {len}")
}
