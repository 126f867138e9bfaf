//! Fixed-width primitive vectors.

use std::fmt::Debug;

use super::{check_row, null_access, NullMask, VectorKind};

/// Element types stored in a [`PrimitiveVector`].
pub trait NativeType: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    /// Vector kind that stores this element type.
    const KIND: VectorKind;
}

impl NativeType for bool {
    const KIND: VectorKind = VectorKind::Boolean;
}

impl NativeType for i8 {
    const KIND: VectorKind = VectorKind::Byte;
}

impl NativeType for i16 {
    const KIND: VectorKind = VectorKind::Short;
}

impl NativeType for i32 {
    const KIND: VectorKind = VectorKind::Int;
}

impl NativeType for i64 {
    const KIND: VectorKind = VectorKind::Long;
}

impl NativeType for f32 {
    const KIND: VectorKind = VectorKind::Float;
}

impl NativeType for f64 {
    const KIND: VectorKind = VectorKind::Double;
}

/// A contiguous array of fixed-width values with a parallel null mask.
///
/// Null rows still occupy a slot (holding `T::default()`) so that row `i`
/// is always `values[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveVector<T> {
    values: Vec<T>,
    nulls: NullMask,
}

pub type BooleanVector = PrimitiveVector<bool>;
pub type ByteVector = PrimitiveVector<i8>;
pub type ShortVector = PrimitiveVector<i16>;
pub type IntVector = PrimitiveVector<i32>;
pub type LongVector = PrimitiveVector<i64>;
pub type FloatVector = PrimitiveVector<f32>;
pub type DoubleVector = PrimitiveVector<f64>;

impl<T: NativeType> PrimitiveVector<T> {
    #[must_use]
    pub fn new() -> Self {
        PrimitiveVector {
            values: Vec::new(),
            nulls: NullMask::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PrimitiveVector {
            values: Vec::with_capacity(capacity),
            nulls: NullMask::new(),
        }
    }

    /// Creates a vector with no nulls.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        PrimitiveVector {
            values,
            nulls: NullMask::new(),
        }
    }

    /// Creates a vector where `None` marks a null row.
    pub fn from_options(values: impl IntoIterator<Item = Option<T>>) -> Self {
        let mut vector = Self::new();
        for value in values {
            match value {
                Some(v) => vector.push(v),
                None => vector.push_null(),
            }
        }
        vector
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn push_null(&mut self) {
        self.nulls.set_null(self.values.len());
        self.values.push(T::default());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_null_at(&self, row: usize) -> bool {
        self.nulls.is_null(row)
    }

    /// Returns the value at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn get(&self, row: usize) -> T {
        check_row(row, self.values.len());
        if self.nulls.is_null(row) {
            null_access(T::KIND, row);
        }
        self.values[row]
    }

    /// Raw value slots, including the placeholders of null rows.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn nulls(&self) -> &NullMask {
        &self.nulls
    }

    /// Clears values and nulls, keeping the allocation.
    pub fn reset(&mut self) {
        self.values.clear();
        self.nulls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options() {
        let v = IntVector::from_options([Some(1), Some(2), None, Some(4)]);
        assert_eq!(v.len(), 4);
        assert!(v.is_null_at(2));
        assert!(!v.is_null_at(3));
        assert_eq!(v.get(0), 1);
        assert_eq!(v.get(3), 4);
        assert_eq!(v.nulls().null_count(), 1);
    }

    #[test]
    #[should_panic(expected = "null cell")]
    fn test_get_null_panics() {
        let v = LongVector::from_options([None]);
        let _ = v.get(0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let v = DoubleVector::from_values(vec![1.0]);
        let _ = v.get(1);
    }

    #[test]
    fn test_reset() {
        let mut v = BooleanVector::from_options([Some(true), None]);
        v.reset();
        assert!(v.is_empty());
        v.push(false);
        assert!(!v.is_null_at(0));
        assert!(!v.get(0));
    }
}
