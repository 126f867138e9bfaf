//! Batch sizing configuration.

use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_BATCH_SIZE;

/// Configuration shared by batch producers.
///
/// Producers that allocate vectors through [`crate::BatchSchema`] or build a
/// [`crate::ColumnarBatch`] with [`crate::ColumnarBatch::with_config`] honor
/// the capacity set here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of rows per batch.
    pub capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchConfig {
    /// Creates a configuration with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch capacity in rows.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(BatchConfig::default().capacity, 2048);
        assert_eq!(BatchConfig::new(), BatchConfig::default());
    }

    #[test]
    fn test_with_capacity() {
        let config = BatchConfig::new().with_capacity(512);
        assert_eq!(config.capacity, 512);
    }
}
