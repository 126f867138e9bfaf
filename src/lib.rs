//! colbatch - columnar vector batches for vectorized query execution.
//!
//! A [`ColumnarBatch`] holds one [`ColumnVector`] per column and a row count.
//! Operators read cells by `(row, col)` through null-aware typed getters,
//! processing a whole batch per call instead of one record at a time.
//!
//! ```
//! use colbatch::{BytesVector, ColumnarBatch, IntVector};
//!
//! let mut batch = ColumnarBatch::new(vec![
//!     IntVector::from_options([Some(1), None]).into(),
//!     BytesVector::from_strs(["a", "b"]).into(),
//! ]);
//! batch.set_num_rows(2);
//!
//! assert_eq!(batch.get_int(0, 0), 1);
//! assert!(batch.is_null_at(1, 0));
//! assert_eq!(batch.get_string(1, 1), "b");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod types;
pub mod vector;

pub use batch::{ArrayView, ColumnarBatch, MapView, RowView, DEFAULT_BATCH_SIZE};
pub use config::BatchConfig;
pub use error::{BatchError, Result};
pub use types::{BatchSchema, DataType, Decimal, Field, Timestamp, Value, Variant};
pub use vector::{
    ArrayVector, BooleanVector, ByteVector, ByteView, BytesVector, ColumnVector, DecimalVector,
    DoubleVector, FloatVector, IntVector, LongVector, MapVector, NullMask, RowVector, ShortVector,
    TimestampVector, VectorKind,
};
