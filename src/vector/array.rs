//! Array vectors.

use super::{check_row, null_access, ColumnVector, NullMask, VectorKind};
use crate::batch::ArrayView;

/// Variable-length arrays as `(offset, length)` windows into one child
/// vector holding every element of every row.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayVector {
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    child: Box<ColumnVector>,
    nulls: NullMask,
}

impl ArrayVector {
    #[must_use]
    pub fn new(child: ColumnVector, capacity: usize) -> Self {
        ArrayVector {
            offsets: Vec::with_capacity(capacity),
            lengths: Vec::with_capacity(capacity),
            child: Box::new(child),
            nulls: NullMask::new(),
        }
    }

    /// The element vector.
    #[must_use]
    pub fn child(&self) -> &ColumnVector {
        &self.child
    }

    /// Mutable element vector, for producers appending elements.
    pub fn child_mut(&mut self) -> &mut ColumnVector {
        &mut self.child
    }

    /// Adds a row holding child elements `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past the child's current length.
    #[track_caller]
    pub fn push_range(&mut self, offset: usize, len: usize) {
        check_window(offset, len, self.child.len());
        self.offsets.push(offset);
        self.lengths.push(len);
    }

    /// Adds a row holding the last `len` elements appended to the child.
    ///
    /// # Panics
    ///
    /// Panics if the child holds fewer than `len` elements.
    #[track_caller]
    pub fn push_tail(&mut self, len: usize) {
        let child_len = self.child.len();
        assert!(
            len <= child_len,
            "array of {len} elements exceeds child of length {child_len}"
        );
        self.push_range(child_len - len, len);
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

    /// Returns a view of the array at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null.
    #[must_use]
    #[track_caller]
    pub fn get_array(&self, row: usize) -> ArrayView<'_> {
        check_row(row, self.offsets.len());
        if self.nulls.is_null(row) {
            null_access(VectorKind::Array, row);
        }
        ArrayView::new(&self.child, self.offsets[row], self.lengths[row])
    }

    /// Clears rows and the child vector.
    pub fn reset(&mut self) {
        self.offsets.clear();
        self.lengths.clear();
        self.child.reset();
        self.nulls.clear();
    }
}

#[track_caller]
pub(super) fn check_window(offset: usize, len: usize, child_len: usize) {
    assert!(
        offset.checked_add(len).is_some_and(|end| end <= child_len),
        "element window [{offset}, {offset}+{len}) exceeds child of length {child_len}"
    );
}
