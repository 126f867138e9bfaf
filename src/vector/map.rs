//! Map vectors.

use super::array::check_window;
use super::{check_row, null_access, ColumnVector, NullMask, VectorKind};
use crate::batch::{ArrayView, MapView};

/// Maps as `(offset, length)` windows into parallel key and value vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct MapVector {
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    keys: Box<ColumnVector>,
    values: Box<ColumnVector>,
    nulls: NullMask,
}

impl MapVector {
    #[must_use]
    pub fn new(keys: ColumnVector, values: ColumnVector, capacity: usize) -> Self {
        MapVector {
            offsets: Vec::with_capacity(capacity),
            lengths: Vec::with_capacity(capacity),
            keys: Box::new(keys),
            values: Box::new(values),
            nulls: NullMask::new(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &ColumnVector {
        &self.keys
    }

    #[must_use]
    pub fn values(&self) -> &ColumnVector {
        &self.values
    }

    /// Mutable key and value vectors, for producers appending entries.
    pub fn entries_mut(&mut self) -> (&mut ColumnVector, &mut ColumnVector) {
        (&mut self.keys, &mut self.values)
    }

    /// Adds a row holding entries `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past either entry vector.
    #[track_caller]
    pub fn push_range(&mut self, offset: usize, len: usize) {
        check_window(offset, len, self.keys.len().min(self.values.len()));
        self.offsets.push(offset);
        self.lengths.push(len);
    }

    /// Adds a row holding the last `len` entries appended.
    ///
    /// # Panics
    ///
    /// Panics if the key and value vectors differ in length or hold fewer
    /// than `len` entries.
    #[track_caller]
    pub fn push_tail(&mut self, len: usize) {
        let (keys, values) = (self.keys.len(), self.values.len());
        assert!(keys == values, "map has {keys} keys but {values} values");
        assert!(len <= keys, "map of {len} entries exceeds {keys} entries");
        self.push_range(keys - len, len);
    }

    pub fn push_null(&mut self) {
        self.nulls.set_null(self.offsets.len());
        self.offsets.push(0);
        self.lengths.push(0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
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

    /// Returns a view of the map at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null.
    #[must_use]
    #[track_caller]
    pub fn get_map(&self, row: usize) -> MapView<'_> {
        check_row(row, self.offsets.len());
        if self.nulls.is_null(row) {
            null_access(VectorKind::Map, row);
        }
        let (offset, len) = (self.offsets[row], self.lengths[row]);
        MapView::new(
            ArrayView::new(&self.keys, offset, len),
            ArrayView::new(&self.values, offset, len),
        )
    }

    /// Clears rows and both entry vectors.
    pub fn reset(&mut self) {
        self.offsets.clear();
        self.lengths.clear();
        self.keys.reset();
        self.values.reset();
        self.nulls.clear();
    }
}
