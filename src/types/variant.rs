//! Semi-structured variant values.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::batch::RowView;

/// Field position of the encoded value inside a variant row.
pub const VALUE_FIELD: usize = 0;

/// Field position of the encoded metadata inside a variant row.
pub const METADATA_FIELD: usize = 1;

/// A variant as two opaque binary components: the encoded value and the
/// encoded metadata (field-name dictionary).
///
/// Components borrow from the batch when the cell spans its whole backing
/// buffer and own a compacted copy otherwise; see
/// [`crate::ColumnarBatch::get_bytes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant<'a> {
    value: Cow<'a, [u8]>,
    metadata: Cow<'a, [u8]>,
}

impl<'a> Variant<'a> {
    pub fn new(value: impl Into<Cow<'a, [u8]>>, metadata: impl Into<Cow<'a, [u8]>>) -> Self {
        Variant {
            value: value.into(),
            metadata: metadata.into(),
        }
    }

    /// Reads a variant out of a two-field row: field 0 is the value, field 1
    /// the metadata.
    ///
    /// # Panics
    ///
    /// Panics if the row has fewer than two fields, either field is null, or
    /// either field is not a bytes vector.
    #[must_use]
    #[track_caller]
    pub fn from_row(row: &RowView<'a>) -> Self {
        Variant::new(row.get_bytes(VALUE_FIELD), row.get_bytes(METADATA_FIELD))
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    #[must_use]
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    /// Detaches the variant from the batch it was read from.
    #[must_use]
    pub fn into_owned(self) -> Variant<'static> {
        Variant {
            value: Cow::Owned(self.value.into_owned()),
            metadata: Cow::Owned(self.metadata.into_owned()),
        }
    }

    /// Splits into `(value, metadata)`.
    #[must_use]
    pub fn into_parts(self) -> (Cow<'a, [u8]>, Cow<'a, [u8]>) {
        (self.value, self.metadata)
    }
}
