//! Nested data views over columnar storage.
//!
//! Views are borrowed windows, never materialized rows. A [`RowView`] is a
//! `(batch, row)` pair that forwards `(row, pos)` reads to a batch, which is
//! how nested row vectors expose their fields. An [`ArrayView`] is an
//! `(offset, len)` window into an element vector, and a [`MapView`] pairs a
//! key window with a value window of the same shape.

use std::borrow::Cow;

use super::ColumnarBatch;
use crate::types::{DataType, Decimal, Field, Timestamp, Value, Variant};
use crate::vector::{kind_mismatch, ByteView, ColumnVector, VectorKind};

macro_rules! row_getter {
    ($name:ident, $ret:ty) => {
        #[inline]
        #[must_use]
        #[track_caller]
        pub fn $name(&self, pos: usize) -> $ret {
            self.batch.$name(self.row, pos)
        }
    };
}

macro_rules! array_getter {
    ($name:ident, $ret:ty) => {
        #[inline]
        #[must_use]
        #[track_caller]
        pub fn $name(&self, index: usize) -> $ret {
            self.child.$name(self.element(index))
        }
    };
}

macro_rules! array_to_vec {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        #[must_use]
        #[track_caller]
        pub fn $name(&self) -> Vec<$ty> {
            match self.child {
                ColumnVector::$variant(v) => {
                    let window = self.offset..self.offset + self.len;
                    if v.nulls().has_nulls() {
                        if let Some(row) = window.clone().find(|&row| v.is_null_at(row)) {
                            null_element(row - self.offset);
                        }
                    }
                    v.values()[window].to_vec()
                }
                other => kind_mismatch(VectorKind::$variant, other.kind()),
            }
        }
    };
}

/// A single row of a batch, addressed by field position.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    batch: &'a ColumnarBatch,
    row: usize,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(batch: &'a ColumnarBatch, row: usize) -> Self {
        RowView { batch, row }
    }

    /// Row index within the underlying batch.
    #[must_use]
    pub fn row_id(&self) -> usize {
        self.row
    }

    /// Number of fields.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.batch.arity()
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn is_null_at(&self, pos: usize) -> bool {
        self.batch.is_null_at(self.row, pos)
    }

    row_getter!(get_boolean, bool);
    row_getter!(get_byte, i8);
    row_getter!(get_short, i16);
    row_getter!(get_int, i32);
    row_getter!(get_long, i64);
    row_getter!(get_float, f32);
    row_getter!(get_double, f64);
    row_getter!(get_byte_view, ByteView<'a>);
    row_getter!(get_bytes, Cow<'a, [u8]>);
    row_getter!(get_string, &'a str);
    row_getter!(get_array, ArrayView<'a>);
    row_getter!(get_row, RowView<'a>);
    row_getter!(get_map, MapView<'a>);
    row_getter!(get_variant, Variant<'a>);

    #[must_use]
    #[track_caller]
    pub fn get_decimal(&self, pos: usize, precision: u8, scale: u8) -> Decimal {
        self.batch.get_decimal(self.row, pos, precision, scale)
    }

    #[must_use]
    #[track_caller]
    pub fn get_timestamp(&self, pos: usize, precision: u8) -> Timestamp {
        self.batch.get_timestamp(self.row, pos, precision)
    }

    #[must_use]
    #[track_caller]
    pub fn get_value(&self, pos: usize, data_type: &DataType) -> Value {
        self.batch.get_value(self.row, pos, data_type)
    }

    /// Materializes every field, interpreting field `i` as `fields[i]`.
    #[must_use]
    #[track_caller]
    pub fn to_values(&self, fields: &[Field]) -> Vec<Value> {
        fields
            .iter()
            .enumerate()
            .map(|(pos, field)| self.get_value(pos, &field.data_type))
            .collect()
    }
}

/// The elements of one array cell.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    child: &'a ColumnVector,
    offset: usize,
    len: usize,
}

impl<'a> ArrayView<'a> {
    #[track_caller]
    pub(crate) fn new(child: &'a ColumnVector, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= child.len(),
            "array window [{offset}, {offset}+{len}) exceeds element vector of length {}",
            child.len()
        );
        ArrayView { child, offset, len }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Kind of the element vector.
    #[must_use]
    pub fn element_kind(&self) -> VectorKind {
        self.child.kind()
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn is_null_at(&self, index: usize) -> bool {
        self.child.is_null_at(self.element(index))
    }

    array_getter!(get_boolean, bool);
    array_getter!(get_byte, i8);
    array_getter!(get_short, i16);
    array_getter!(get_int, i32);
    array_getter!(get_long, i64);
    array_getter!(get_float, f32);
    array_getter!(get_double, f64);
    array_getter!(get_byte_view, ByteView<'a>);
    array_getter!(get_array, ArrayView<'a>);
    array_getter!(get_row, RowView<'a>);
    array_getter!(get_map, MapView<'a>);

    /// See [`ColumnarBatch::get_bytes`].
    #[must_use]
    #[track_caller]
    pub fn get_bytes(&self, index: usize) -> Cow<'a, [u8]> {
        self.get_byte_view(index).to_bytes()
    }

    /// # Panics
    ///
    /// Panics if the element is not valid UTF-8.
    #[must_use]
    #[track_caller]
    pub fn get_string(&self, index: usize) -> &'a str {
        match self.get_byte_view(index).to_str() {
            Ok(s) => s,
            Err(_) => panic!("invalid UTF-8 in array element {index}"),
        }
    }

    #[must_use]
    #[track_caller]
    pub fn get_decimal(&self, index: usize, precision: u8, scale: u8) -> Decimal {
        self.child.get_decimal(self.element(index), precision, scale)
    }

    #[must_use]
    #[track_caller]
    pub fn get_timestamp(&self, index: usize, precision: u8) -> Timestamp {
        self.child.get_timestamp(self.element(index), precision)
    }

    #[must_use]
    #[track_caller]
    pub fn get_variant(&self, index: usize) -> Variant<'a> {
        Variant::from_row(&self.get_row(index))
    }

    #[must_use]
    #[track_caller]
    pub fn get_value(&self, index: usize, element_type: &DataType) -> Value {
        value_of(self.child, self.element(index), element_type)
    }

    /// Materializes every element as `element_type`.
    #[must_use]
    #[track_caller]
    pub fn to_values(&self, element_type: &DataType) -> Vec<Value> {
        (0..self.len)
            .map(|index| self.get_value(index, element_type))
            .collect()
    }

    array_to_vec!(
        /// Copies the elements out of the element vector.
        ///
        /// # Panics
        ///
        /// Panics if any element is null or the element vector is not of the
        /// matching kind. The same holds for the other `to_*_vec` methods.
        to_boolean_vec,
        Boolean,
        bool
    );
    array_to_vec!(to_byte_vec, Byte, i8);
    array_to_vec!(to_short_vec, Short, i16);
    array_to_vec!(to_int_vec, Int, i32);
    array_to_vec!(to_long_vec, Long, i64);
    array_to_vec!(to_float_vec, Float, f32);
    array_to_vec!(to_double_vec, Double, f64);

    #[inline]
    #[track_caller]
    fn element(&self, index: usize) -> usize {
        if index >= self.len {
            element_out_of_bounds(index, self.len);
        }
        self.offset + index
    }
}

/// The entries of one map cell.
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    keys: ArrayView<'a>,
    values: ArrayView<'a>,
}

impl<'a> MapView<'a> {
    pub(crate) fn new(keys: ArrayView<'a>, values: ArrayView<'a>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        MapView { keys, values }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> ArrayView<'a> {
        self.keys
    }

    #[must_use]
    pub fn values(&self) -> ArrayView<'a> {
        self.values
    }

    /// Materializes every entry as `(key_type, value_type)` pairs.
    #[must_use]
    #[track_caller]
    pub fn to_entries(&self, key_type: &DataType, value_type: &DataType) -> Vec<(Value, Value)> {
        (0..self.len())
            .map(|i| {
                (
                    self.keys.get_value(i, key_type),
                    self.values.get_value(i, value_type),
                )
            })
            .collect()
    }
}

/// Reads `row` of `vector` as an owned value of `data_type`.
#[track_caller]
pub(super) fn value_of(vector: &ColumnVector, row: usize, data_type: &DataType) -> Value {
    if vector.is_null_at(row) {
        return Value::Null;
    }
    match data_type {
        DataType::Bool => Value::Bool(vector.get_boolean(row)),
        DataType::Int8 => Value::Int8(vector.get_byte(row)),
        DataType::Int16 => Value::Int16(vector.get_short(row)),
        DataType::Int32 => Value::Int32(vector.get_int(row)),
        DataType::Int64 => Value::Int64(vector.get_long(row)),
        DataType::Float32 => Value::Float32(vector.get_float(row)),
        DataType::Float64 => Value::Float64(vector.get_double(row)),
        DataType::Date => Value::Date(vector.get_int(row)),
        DataType::String => match vector.get_byte_view(row).to_str() {
            Ok(s) => Value::String(s.to_owned()),
            Err(_) => panic!("invalid UTF-8 at row {row}"),
        },
        DataType::Binary => Value::Binary(vector.get_byte_view(row).as_slice().to_vec()),
        DataType::Decimal { precision, scale } => {
            Value::Decimal(vector.get_decimal(row, *precision, *scale))
        }
        DataType::Timestamp { precision } => {
            Value::Timestamp(vector.get_timestamp(row, *precision))
        }
        DataType::Array(element) => Value::Array(vector.get_array(row).to_values(element)),
        DataType::Row(fields) => Value::Row(vector.get_row(row).to_values(fields)),
        DataType::Map { key, value } => Value::Map(vector.get_map(row).to_entries(key, value)),
        DataType::Variant => {
            Value::Variant(Variant::from_row(&vector.get_row(row)).into_owned())
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn element_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("element index {index} out of bounds for array of length {len}")
}

#[cold]
#[inline(never)]
#[track_caller]
fn null_element(index: usize) -> ! {
    panic!("array element {index} is null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{ArrayVector, BytesVector, IntVector, MapVector, RowVector};

    fn int_array(values: &[Option<i32>], lengths: &[usize]) -> ArrayVector {
        let mut v = ArrayVector::new(IntVector::from_options(values.iter().copied()).into(), 4);
        let mut offset = 0;
        for &len in lengths {
            v.push_range(offset, len);
            offset += len;
        }
        v
    }

    #[test]
    fn test_array_view_getters() {
        let v = int_array(&[Some(10), Some(20), Some(30)], &[1, 2]);
        let view = v.get_array(1);
        assert_eq!(view.len(), 2);
        assert_eq!(view.element_kind(), VectorKind::Int);
        assert_eq!(view.get_int(0), 20);
        assert_eq!(view.get_int(1), 30);
        assert_eq!(view.to_int_vec(), vec![20, 30]);
    }

    #[test]
    #[should_panic(expected = "element index 2 out of bounds for array of length 2")]
    fn test_array_view_bounds() {
        let v = int_array(&[Some(10), Some(20), Some(30)], &[1, 2]);
        let _ = v.get_array(1).get_int(2);
    }

    #[test]
    #[should_panic(expected = "array element 1 is null")]
    fn test_to_vec_with_null_element() {
        let v = int_array(&[Some(1), Some(2), None], &[1, 2]);
        let _ = v.get_array(1).to_int_vec();
    }

    #[test]
    fn test_array_values_keep_nulls() {
        let v = int_array(&[Some(1), None], &[2]);
        let values = v.get_array(0).to_values(&DataType::Int32);
        assert_eq!(values, vec![Value::Int32(1), Value::Null]);
    }

    #[test]
    fn test_nested_row_in_array() {
        let rows = RowVector::new(vec![
            IntVector::from_values(vec![1, 2]).into(),
            BytesVector::from_strs(["x", "y"]).into(),
        ]);
        let mut v = ArrayVector::new(rows.into(), 1);
        v.push_range(0, 2);
        let view = v.get_array(0);
        assert_eq!(view.get_row(1).get_int(0), 2);
        assert_eq!(view.get_row(1).get_string(1), "y");
    }

    #[test]
    fn test_map_entries() {
        let mut v = MapVector::new(
            BytesVector::from_strs(["k1", "k2", "k3"]).into(),
            IntVector::from_options([Some(1), None, Some(3)]).into(),
            2,
        );
        v.push_range(0, 2);
        v.push_range(2, 1);
        let entries = v.get_map(0).to_entries(&DataType::String, &DataType::Int32);
        assert_eq!(
            entries,
            vec![
                (Value::String("k1".into()), Value::Int32(1)),
                (Value::String("k2".into()), Value::Null),
            ]
        );
        assert_eq!(v.get_map(1).keys().get_string(0), "k3");
    }
}
