//! Columnar batches: the unit of vectorized execution.
//!
//! A [`ColumnarBatch`] is a fixed set of column vectors plus the number of
//! rows that are currently valid. A producer fills the vectors and sets the
//! row count once per cycle; consumers then read cells by `(row, col)`
//! through typed getters. Getters check bounds, nullness and vector kind and
//! panic on violations, since each one indicates a broken schema binding
//! upstream rather than a recoverable condition.

mod views;

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::config::BatchConfig;
use crate::error::{BatchError, Result};
use crate::types::{DataType, Decimal, Timestamp, Value, Variant};
use crate::vector::{ByteView, ColumnVector, VectorKind};

pub use views::{ArrayView, MapView, RowView};

/// Default batch capacity in rows.
///
/// Chosen so a batch's working set stays cache resident.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

/// Generates a `(row, col)` getter that requires one vector variant.
macro_rules! batch_getter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ret:ty) => {
        $(#[$doc])*
        #[inline]
        #[must_use]
        #[track_caller]
        pub fn $name(&self, row: usize, col: usize) -> $ret {
            match self.column_at(row, col) {
                ColumnVector::$variant(v) => v.get(row),
                other => column_kind_mismatch(col, VectorKind::$variant, other.kind()),
            }
        }
    };
}

/// A fixed-arity set of column vectors with an active row count.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnarBatch {
    columns: Vec<ColumnVector>,
    num_rows: usize,
    capacity: usize,
}

impl ColumnarBatch {
    /// Creates an unpopulated batch with the default capacity.
    #[must_use]
    pub fn new(columns: Vec<ColumnVector>) -> Self {
        Self::with_config(columns, &BatchConfig::default())
    }

    /// Creates an unpopulated batch with the configured capacity.
    #[must_use]
    pub fn with_config(columns: Vec<ColumnVector>, config: &BatchConfig) -> Self {
        debug!(
            arity = columns.len(),
            capacity = config.capacity,
            "created columnar batch"
        );
        ColumnarBatch {
            columns,
            num_rows: 0,
            capacity: config.capacity,
        }
    }

    /// Creates the field batch of a nested row vector: unbounded capacity,
    /// row count equal to the shortest field.
    pub(crate) fn nested(columns: Vec<ColumnVector>) -> Self {
        let num_rows = columns.iter().map(ColumnVector::len).min().unwrap_or(0);
        ColumnarBatch {
            columns,
            num_rows,
            capacity: usize::MAX,
        }
    }

    /// Number of columns, fixed for the batch's lifetime.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Number of valid rows in the current cycle.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Maximum number of rows.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnVector] {
        &self.columns
    }

    /// Returns the vector at `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn column(&self, col: usize) -> &ColumnVector {
        self.check_col(col);
        &self.columns[col]
    }

    /// Mutable vector at `col`, for the producer while populating.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    #[track_caller]
    pub fn column_mut(&mut self, col: usize) -> &mut ColumnVector {
        self.check_col(col);
        &mut self.columns[col]
    }

    /// Sets the active row count.
    ///
    /// # Panics
    ///
    /// Panics if `num_rows` exceeds the capacity or any column holds fewer
    /// values; see [`ColumnarBatch::try_set_num_rows`].
    #[track_caller]
    pub fn set_num_rows(&mut self, num_rows: usize) {
        if let Err(e) = self.try_set_num_rows(num_rows) {
            panic!("{e}");
        }
    }

    /// Sets the active row count after checking it against the capacity and
    /// every column's length.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::RowCountExceedsCapacity`] or
    /// [`BatchError::VectorTooShort`]; the row count is left unchanged.
    pub fn try_set_num_rows(&mut self, num_rows: usize) -> Result<()> {
        self.commit_rows(num_rows)?;
        trace!(num_rows, arity = self.columns.len(), "batch populated");
        Ok(())
    }

    /// Validates and sets the row count without logging. Nested row vectors
    /// commit through here once per row.
    pub(crate) fn commit_rows(&mut self, num_rows: usize) -> Result<()> {
        if num_rows > self.capacity {
            return Err(BatchError::RowCountExceedsCapacity {
                num_rows,
                capacity: self.capacity,
            });
        }
        if let Some((col, vector)) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() < num_rows)
        {
            return Err(BatchError::VectorTooShort {
                col,
                len: vector.len(),
                num_rows,
            });
        }
        self.num_rows = num_rows;
        Ok(())
    }

    /// Clears every vector and the row count so the batch can be refilled.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.reset();
        }
        self.num_rows = 0;
        trace!(arity = self.columns.len(), "batch reset");
    }

    /// Returns true if the cell at `(row, col)` is null.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn is_null_at(&self, row: usize, col: usize) -> bool {
        self.column_at(row, col).is_null_at(row)
    }

    batch_getter!(
        /// # Panics
        ///
        /// Panics if the cell is out of bounds, null, or not in a boolean
        /// vector. The same holds for every typed getter below.
        get_boolean,
        Boolean,
        bool
    );
    batch_getter!(get_byte, Byte, i8);
    batch_getter!(get_short, Short, i16);
    batch_getter!(get_int, Int, i32);
    batch_getter!(get_long, Long, i64);
    batch_getter!(get_float, Float, f32);
    batch_getter!(get_double, Double, f64);

    /// Borrowed view of a bytes cell.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn get_byte_view(&self, row: usize, col: usize) -> ByteView<'_> {
        match self.column_at(row, col) {
            ColumnVector::Bytes(v) => v.get_bytes(row),
            other => column_kind_mismatch(col, VectorKind::Bytes, other.kind()),
        }
    }

    /// Bytes of a cell, never including neighboring cells' data.
    ///
    /// Borrows the backing buffer when the cell spans all of it and returns
    /// a compacted copy otherwise.
    #[must_use]
    #[track_caller]
    pub fn get_bytes(&self, row: usize, col: usize) -> Cow<'_, [u8]> {
        self.get_byte_view(row, col).to_bytes()
    }

    /// Decodes a bytes cell as UTF-8.
    ///
    /// # Panics
    ///
    /// Panics on invalid UTF-8, in addition to the usual getter checks.
    #[must_use]
    #[track_caller]
    pub fn get_string(&self, row: usize, col: usize) -> &str {
        match self.try_get_string(row, col) {
            Ok(s) => s,
            Err(e) => panic!("{e}"),
        }
    }

    /// Decodes a bytes cell as UTF-8, reporting invalid data as an error.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidUtf8`] if the cell is not valid UTF-8.
    #[track_caller]
    pub fn try_get_string(&self, row: usize, col: usize) -> Result<&str> {
        self.get_byte_view(row, col)
            .to_str()
            .map_err(|_| BatchError::InvalidUtf8 { row, col })
    }

    /// Reads a decimal cell as `DECIMAL(precision, scale)`.
    #[must_use]
    #[track_caller]
    pub fn get_decimal(&self, row: usize, col: usize, precision: u8, scale: u8) -> Decimal {
        match self.column_at(row, col) {
            ColumnVector::Decimal(v) => v.get_decimal(row, precision, scale),
            other => column_kind_mismatch(col, VectorKind::Decimal, other.kind()),
        }
    }

    /// Reads a timestamp cell with fractional-second `precision`.
    #[must_use]
    #[track_caller]
    pub fn get_timestamp(&self, row: usize, col: usize, precision: u8) -> Timestamp {
        match self.column_at(row, col) {
            ColumnVector::Timestamp(v) => v.get_timestamp(row, precision),
            other => column_kind_mismatch(col, VectorKind::Timestamp, other.kind()),
        }
    }

    #[must_use]
    #[track_caller]
    pub fn get_array(&self, row: usize, col: usize) -> ArrayView<'_> {
        match self.column_at(row, col) {
            ColumnVector::Array(v) => v.get_array(row),
            other => column_kind_mismatch(col, VectorKind::Array, other.kind()),
        }
    }

    #[must_use]
    #[track_caller]
    pub fn get_row(&self, row: usize, col: usize) -> RowView<'_> {
        match self.column_at(row, col) {
            ColumnVector::Row(v) => v.get_row(row),
            other => column_kind_mismatch(col, VectorKind::Row, other.kind()),
        }
    }

    #[must_use]
    #[track_caller]
    pub fn get_map(&self, row: usize, col: usize) -> MapView<'_> {
        match self.column_at(row, col) {
            ColumnVector::Map(v) => v.get_map(row),
            other => column_kind_mismatch(col, VectorKind::Map, other.kind()),
        }
    }

    /// Reads a variant from a two-field row column: field 0 holds the
    /// encoded value, field 1 the encoded metadata.
    #[must_use]
    #[track_caller]
    pub fn get_variant(&self, row: usize, col: usize) -> Variant<'_> {
        Variant::from_row(&self.get_row(row, col))
    }

    /// Materializes the cell at `(row, col)` as an owned [`Value`],
    /// interpreting it as `data_type`. Null cells become [`Value::Null`].
    #[must_use]
    #[track_caller]
    pub fn get_value(&self, row: usize, col: usize, data_type: &DataType) -> Value {
        views::value_of(self.column_at(row, col), row, data_type)
    }

    /// Views of rows `0..num_rows`.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.num_rows).map(move |row| RowView::new(self, row))
    }

    #[inline]
    #[track_caller]
    fn check_col(&self, col: usize) {
        if col >= self.columns.len() {
            column_out_of_bounds(col, self.columns.len());
        }
    }

    #[inline]
    #[track_caller]
    fn column_at(&self, row: usize, col: usize) -> &ColumnVector {
        self.check_col(col);
        if row >= self.num_rows {
            row_out_of_bounds(row, self.num_rows);
        }
        &self.columns[col]
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn column_out_of_bounds(col: usize, arity: usize) -> ! {
    panic!("column index {col} out of bounds for batch of arity {arity}")
}

#[cold]
#[inline(never)]
#[track_caller]
fn row_out_of_bounds(row: usize, num_rows: usize) -> ! {
    panic!("row index {row} out of bounds for batch with {num_rows} rows")
}

#[cold]
#[inline(never)]
#[track_caller]
fn column_kind_mismatch(col: usize, expected: VectorKind, actual: VectorKind) -> ! {
    panic!("column {col}: requested {expected} vector, found {actual}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{BytesVector, IntVector, LongVector, RowVector};

    fn sample() -> ColumnarBatch {
        let mut batch = ColumnarBatch::new(vec![
            IntVector::from_options([Some(1), Some(2), None, Some(4)]).into(),
            BytesVector::from_strs(["a", "bb", "ccc", "dddd"]).into(),
        ]);
        batch.set_num_rows(4);
        batch
    }

    #[test]
    fn test_basic_access() {
        let batch = sample();
        assert_eq!(batch.arity(), 2);
        assert_eq!(batch.num_rows(), 4);
        assert_eq!(batch.capacity(), DEFAULT_BATCH_SIZE);
        assert_eq!(batch.get_int(0, 0), 1);
        assert!(batch.is_null_at(2, 0));
        assert_eq!(batch.get_string(3, 1), "dddd");
    }

    #[test]
    fn test_row_count_capacity() {
        let config = BatchConfig::new().with_capacity(2);
        let mut batch =
            ColumnarBatch::with_config(vec![IntVector::from_values(vec![1, 2, 3]).into()], &config);
        assert_eq!(
            batch.try_set_num_rows(3),
            Err(BatchError::RowCountExceedsCapacity {
                num_rows: 3,
                capacity: 2
            })
        );
        assert_eq!(batch.num_rows(), 0);
        assert!(batch.try_set_num_rows(2).is_ok());
    }

    #[test]
    fn test_row_count_vector_length() {
        let mut batch = ColumnarBatch::new(vec![
            IntVector::from_values(vec![1, 2]).into(),
            LongVector::from_values(vec![1]).into(),
        ]);
        assert_eq!(
            batch.try_set_num_rows(2),
            Err(BatchError::VectorTooShort {
                col: 1,
                len: 1,
                num_rows: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "row index 4 out of bounds for batch with 4 rows")]
    fn test_row_beyond_num_rows() {
        let _ = sample().get_int(4, 0);
    }

    #[test]
    #[should_panic(expected = "row index 0 out of bounds for batch with 0 rows")]
    fn test_unpopulated_batch() {
        let batch = ColumnarBatch::new(vec![IntVector::from_values(vec![1]).into()]);
        let _ = batch.get_int(0, 0);
    }

    #[test]
    #[should_panic(expected = "column 1: requested Int vector, found Bytes")]
    fn test_kind_mismatch_names_column() {
        let _ = sample().get_int(0, 1);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut batch = ColumnarBatch::new(vec![
            BytesVector::from_options([Some(&[0xFF_u8, 0xFE][..])]).into(),
        ]);
        batch.set_num_rows(1);
        assert_eq!(
            batch.try_get_string(0, 0),
            Err(BatchError::InvalidUtf8 { row: 0, col: 0 })
        );
    }

    #[test]
    #[should_panic(expected = "Invalid UTF-8 at row 0, column 0")]
    fn test_invalid_utf8_panics() {
        let mut batch = ColumnarBatch::new(vec![
            BytesVector::from_options([Some(&[0xC3_u8][..])]).into(),
        ]);
        batch.set_num_rows(1);
        let _ = batch.get_string(0, 0);
    }

    #[test]
    fn test_reset() {
        let mut batch = sample();
        batch.reset();
        assert_eq!(batch.num_rows(), 0);
        assert!(batch.columns().iter().all(ColumnVector::is_empty));
        assert_eq!(batch.arity(), 2);
    }

    #[test]
    fn test_rows_iterator() {
        let batch = sample();
        let lengths: Vec<usize> = batch.rows().map(|r| r.get_string(1).len()).collect();
        assert_eq!(lengths, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_variant() {
        let mut fields = RowVector::new(vec![
            BytesVector::from_strs(["v0", "v1"]).into(),
            BytesVector::from_strs(["m0", "m1"]).into(),
        ]);
        fields.push_null();
        let mut batch = ColumnarBatch::new(vec![fields.into()]);
        batch.set_num_rows(3);
        let variant = batch.get_variant(1, 0);
        assert_eq!(variant.value(), b"v1");
        assert_eq!(variant.metadata(), b"m1");
        assert!(batch.is_null_at(2, 0));
    }
}
