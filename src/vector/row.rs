//! Row (struct) vectors.

use super::{check_row, null_access, ColumnVector, NullMask, VectorKind};
use crate::batch::{ColumnarBatch, RowView};

/// Nested rows stored column-wise: one child vector per field, wrapped in a
/// [`ColumnarBatch`] so a row view can address `(row, field)` with the same
/// accessors as a top-level batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RowVector {
    fields: ColumnarBatch,
    nulls: NullMask,
}

impl RowVector {
    /// Wraps field vectors. The row count is the length of the shortest
    /// field.
    #[must_use]
    pub fn new(fields: Vec<ColumnVector>) -> Self {
        RowVector {
            fields: ColumnarBatch::nested(fields),
            nulls: NullMask::new(),
        }
    }

    /// The field vectors as a batch.
    #[must_use]
    pub fn fields(&self) -> &ColumnarBatch {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.arity()
    }

    /// Mutable field vector, for producers appending field values. Call
    /// [`RowVector::push_row`] once every field holds the new row.
    #[track_caller]
    pub fn field_mut(&mut self, pos: usize) -> &mut ColumnVector {
        self.fields.column_mut(pos)
    }

    /// Commits the next row after a value was appended to every field.
    ///
    /// # Panics
    ///
    /// Panics if some field does not yet hold the new row.
    #[track_caller]
    pub fn push_row(&mut self) {
        let row = self.fields.num_rows();
        self.commit(row + 1);
    }

    /// Appends a null row, pushing a null into every field.
    ///
    /// # Panics
    ///
    /// Panics if a field holds values not yet committed with
    /// [`RowVector::push_row`].
    #[track_caller]
    pub fn push_null(&mut self) {
        let row = self.fields.num_rows();
        if let Some((pos, field)) = self
            .fields
            .columns()
            .iter()
            .enumerate()
            .find(|(_, field)| field.len() != row)
        {
            panic!(
                "field {pos} holds {} values but the row vector has {row} rows",
                field.len()
            );
        }
        for pos in 0..self.fields.arity() {
            self.fields.column_mut(pos).push_null();
        }
        self.nulls.set_null(row);
        self.commit(row + 1);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn is_null_at(&self, row: usize) -> bool {
        self.nulls.is_null(row)
    }

    #[must_use]
    pub fn nulls(&self) -> &NullMask {
        &self.nulls
    }

    /// Returns a view of the row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null.
    #[must_use]
    #[track_caller]
    pub fn get_row(&self, row: usize) -> RowView<'_> {
        check_row(row, self.fields.num_rows());
        if self.nulls.is_null(row) {
            null_access(VectorKind::Row, row);
        }
        RowView::new(&self.fields, row)
    }

    #[track_caller]
    fn commit(&mut self, num_rows: usize) {
        if let Err(e) = self.fields.commit_rows(num_rows) {
            panic!("{e}");
        }
    }

    /// Clears rows and every field vector.
    pub fn reset(&mut self) {
        self.fields.reset();
        self.nulls.clear();
    }
}
