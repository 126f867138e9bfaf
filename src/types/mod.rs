//! Logical types, schemas and cell values.

pub mod decimal;
mod schema;
pub mod timestamp;
mod value;
mod variant;

pub use decimal::Decimal;
pub use schema::{BatchSchema, Field};
pub use timestamp::Timestamp;
pub use value::{DataType, Value};
pub use variant::{Variant, METADATA_FIELD, VALUE_FIELD};
