//! Value and `DataType` definitions.

use serde::{Deserialize, Serialize};

use super::{Decimal, Field, Timestamp, Variant};
use crate::error::Result;
use crate::vector::{
    ArrayVector, BooleanVector, ByteVector, BytesVector, ColumnVector, DecimalVector,
    DoubleVector, FloatVector, IntVector, LongVector, MapVector, RowVector, ShortVector,
    TimestampVector, VectorKind,
};

/// Logical column types.
///
/// Decimal precision/scale and timestamp precision live here rather than in
/// the vectors, which store only the physical representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Date (stored as days since epoch).
    Date,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Binary,
    /// Fixed-point decimal.
    Decimal { precision: u8, scale: u8 },
    /// Timestamp with fractional-second precision.
    Timestamp { precision: u8 },
    /// Array of a single element type.
    Array(Box<DataType>),
    /// Nested row of named fields.
    Row(Vec<Field>),
    /// Map from keys to values.
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
    },
    /// Semi-structured value stored as a (value, metadata) binary row.
    Variant,
}

impl DataType {
    /// Returns the SQL name of the data type.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            DataType::Bool => "BOOLEAN".to_string(),
            DataType::Int8 => "TINYINT".to_string(),
            DataType::Int16 => "SMALLINT".to_string(),
            DataType::Int32 => "INT".to_string(),
            DataType::Int64 => "BIGINT".to_string(),
            DataType::Float32 => "FLOAT".to_string(),
            DataType::Float64 => "DOUBLE".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::String => "STRING".to_string(),
            DataType::Binary => "BYTES".to_string(),
            DataType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
            DataType::Timestamp { precision } => format!("TIMESTAMP({precision})"),
            DataType::Array(element) => format!("ARRAY<{}>", element.name()),
            DataType::Row(fields) => {
                let inner: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} {}", f.name, f.data_type.name()))
                    .collect();
                format!("ROW<{}>", inner.join(", "))
            }
            DataType::Map { key, value } => format!("MAP<{}, {}>", key.name(), value.name()),
            DataType::Variant => "VARIANT".to_string(),
        }
    }

    /// Returns the vector kind that stores values of this type.
    #[must_use]
    pub fn vector_kind(&self) -> VectorKind {
        match self {
            DataType::Bool => VectorKind::Boolean,
            DataType::Int8 => VectorKind::Byte,
            DataType::Int16 => VectorKind::Short,
            DataType::Int32 | DataType::Date => VectorKind::Int,
            DataType::Int64 => VectorKind::Long,
            DataType::Float32 => VectorKind::Float,
            DataType::Float64 => VectorKind::Double,
            DataType::String | DataType::Binary => VectorKind::Bytes,
            DataType::Decimal { .. } => VectorKind::Decimal,
            DataType::Timestamp { .. } => VectorKind::Timestamp,
            DataType::Array(_) => VectorKind::Array,
            DataType::Row(_) | DataType::Variant => VectorKind::Row,
            DataType::Map { .. } => VectorKind::Map,
        }
    }

    /// Allocates an empty vector able to hold `capacity` values of this type.
    ///
    /// # Errors
    ///
    /// Returns an error if a decimal or timestamp precision is out of range.
    pub fn create_vector(&self, capacity: usize) -> Result<ColumnVector> {
        let vector = match self {
            DataType::Bool => BooleanVector::with_capacity(capacity).into(),
            DataType::Int8 => ByteVector::with_capacity(capacity).into(),
            DataType::Int16 => ShortVector::with_capacity(capacity).into(),
            DataType::Int32 | DataType::Date => IntVector::with_capacity(capacity).into(),
            DataType::Int64 => LongVector::with_capacity(capacity).into(),
            DataType::Float32 => FloatVector::with_capacity(capacity).into(),
            DataType::Float64 => DoubleVector::with_capacity(capacity).into(),
            DataType::String | DataType::Binary => BytesVector::with_capacity(capacity).into(),
            DataType::Decimal { precision, scale } => {
                DecimalVector::for_precision(*precision, *scale, capacity)?.into()
            }
            DataType::Timestamp { precision } => {
                TimestampVector::for_precision(*precision, capacity)?.into()
            }
            DataType::Array(element) => {
                ArrayVector::new(element.create_vector(capacity)?, capacity).into()
            }
            DataType::Row(fields) => {
                let children = fields
                    .iter()
                    .map(|f| f.data_type.create_vector(capacity))
                    .collect::<Result<Vec<_>>>()?;
                RowVector::new(children).into()
            }
            DataType::Map { key, value } => MapVector::new(
                key.create_vector(capacity)?,
                value.create_vector(capacity)?,
                capacity,
            )
            .into(),
            DataType::Variant => RowVector::new(vec![
                BytesVector::with_capacity(capacity).into(),
                BytesVector::with_capacity(capacity).into(),
            ])
            .into(),
        };
        Ok(vector)
    }
}

/// Owned value of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer value.
    Int8(i8),
    /// 16-bit signed integer value.
    Int16(i16),
    /// 32-bit signed integer value.
    Int32(i32),
    /// 64-bit signed integer value.
    Int64(i64),
    /// 32-bit floating point value.
    Float32(f32),
    /// 64-bit floating point value.
    Float64(f64),
    /// Date value (days since Unix epoch).
    Date(i32),
    /// String value.
    String(String),
    /// Binary value.
    Binary(Vec<u8>),
    /// Decimal value.
    Decimal(Decimal),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Array elements.
    Array(Vec<Value>),
    /// Row fields in schema order.
    Row(Vec<Value>),
    /// Map entries in storage order.
    Map(Vec<(Value, Value)>),
    /// Variant value.
    Variant(Variant<'static>),
}

impl Value {
    /// Returns true if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
