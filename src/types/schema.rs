//! Batch schemas and vector allocation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataType;
use crate::batch::ColumnarBatch;
use crate::config::BatchConfig;
use crate::error::{BatchError, Result};
use crate::vector::ColumnVector;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Logical type.
    pub data_type: DataType,
    /// Whether the column may contain nulls.
    pub nullable: bool,
}

impl Field {
    /// Creates a nullable field.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Field {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Creates a non-nullable field.
    #[must_use]
    pub fn not_null(name: impl Into<String>, data_type: DataType) -> Self {
        Field {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }
}

/// Ordered column definitions shared by producer and consumers of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSchema {
    fields: Vec<Field>,
}

impl BatchSchema {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        BatchSchema { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of columns.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn field(&self, col: usize) -> Option<&Field> {
        self.fields.get(col)
    }

    /// Returns the position of the column named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Allocates one empty vector per column, sized to the configured
    /// capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if a column's decimal or timestamp precision is out
    /// of range.
    pub fn create_vectors(&self, config: &BatchConfig) -> Result<Vec<ColumnVector>> {
        let vectors = self
            .fields
            .iter()
            .map(|f| f.data_type.create_vector(config.capacity))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            arity = vectors.len(),
            capacity = config.capacity,
            "allocated column vectors from schema"
        );
        Ok(vectors)
    }

    /// Allocates an empty batch for this schema.
    ///
    /// # Errors
    ///
    /// See [`BatchSchema::create_vectors`].
    pub fn create_batch(&self, config: &BatchConfig) -> Result<ColumnarBatch> {
        Ok(ColumnarBatch::with_config(self.create_vectors(config)?, config))
    }

    /// Checks that `vectors` has one vector per column, each of the kind the
    /// column's type is stored in, and that non-nullable columns hold no
    /// nulls.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ArityMismatch`] if the counts differ,
    /// [`BatchError::KindMismatch`] for a vector of the wrong kind and
    /// [`BatchError::UnexpectedNulls`] for nulls in a non-nullable column.
    pub fn check_vectors(&self, vectors: &[ColumnVector]) -> Result<()> {
        if vectors.len() != self.fields.len() {
            return Err(BatchError::ArityMismatch {
                expected: self.fields.len(),
                actual: vectors.len(),
            });
        }
        for (col, (field, vector)) in self.fields.iter().zip(vectors).enumerate() {
            let expected = field.data_type.vector_kind();
            if vector.kind() != expected {
                return Err(BatchError::KindMismatch {
                    col,
                    name: field.name.clone(),
                    expected,
                    actual: vector.kind(),
                });
            }
            if !field.nullable && vector.has_nulls() {
                return Err(BatchError::UnexpectedNulls {
                    col,
                    name: field.name.clone(),
                    null_count: vector.null_count(),
                });
            }
        }
        Ok(())
    }
}
