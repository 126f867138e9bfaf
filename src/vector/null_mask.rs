//! Packed per-row null indicator.

/// Packed null bitmap, one bit per row, set bit meaning null.
///
/// Rows past the last written word read as non-null, so a vector with no
/// nulls never allocates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullMask {
    words: Vec<u64>,
    null_count: usize,
}

impl NullMask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `row` is null.
    #[inline]
    #[must_use]
    pub fn is_null(&self, row: usize) -> bool {
        self.words
            .get(row / 64)
            .is_some_and(|word| (word >> (row % 64)) & 1 == 1)
    }

    /// Marks `row` as null.
    pub fn set_null(&mut self, row: usize) {
        let word = row / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let bit = 1_u64 << (row % 64);
        if self.words[word] & bit == 0 {
            self.words[word] |= bit;
            self.null_count += 1;
        }
    }

    /// Number of rows marked null.
    #[must_use]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[must_use]
    pub fn has_nulls(&self) -> bool {
        self.null_count > 0
    }

    /// Clears every null flag, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.clear();
        self.null_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask_has_no_nulls() {
        let mask = NullMask::new();
        assert!(!mask.is_null(0));
        assert!(!mask.is_null(10_000));
        assert!(!mask.has_nulls());
    }

    #[test]
    fn test_set_null_across_words() {
        let mut mask = NullMask::new();
        mask.set_null(3);
        mask.set_null(64);
        mask.set_null(200);
        assert!(mask.is_null(3));
        assert!(mask.is_null(64));
        assert!(mask.is_null(200));
        assert!(!mask.is_null(4));
        assert!(!mask.is_null(63));
        assert_eq!(mask.null_count(), 3);
    }

    #[test]
    fn test_set_null_is_idempotent() {
        let mut mask = NullMask::new();
        mask.set_null(7);
        mask.set_null(7);
        assert_eq!(mask.null_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut mask = NullMask::new();
        for row in 0..70 {
            mask.set_null(row);
        }
        assert_eq!(mask.null_count(), 70);
        assert!(mask.is_null(69));
        assert!(!mask.is_null(70));
        mask.clear();
        assert!(!mask.is_null(0));
        assert_eq!(mask.null_count(), 0);
    }
}
