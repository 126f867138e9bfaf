//! Contract tests for the batch accessor API.

use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};

use colbatch::{
    BytesVector, ColumnarBatch, Decimal, DecimalVector, IntVector, LongVector, RowVector,
    Timestamp, TimestampVector,
};

// =============================================================================
// Null handling contracts
// =============================================================================

mod null_contracts {
    use super::*;

    fn int_batch() -> ColumnarBatch {
        let values = IntVector::from_options([Some(1), Some(2), None, Some(4)]);
        let mut batch = ColumnarBatch::new(vec![values.into()]);
        batch.set_num_rows(4);
        batch
    }

    #[test]
    fn test_int_column_with_null() {
        let batch = int_batch();
        assert!(batch.is_null_at(2, 0));
        assert!(!batch.is_null_at(0, 0));
        assert_eq!(batch.get_int(0, 0), 1);
        assert_eq!(batch.get_int(1, 0), 2);
        assert_eq!(batch.get_int(3, 0), 4);
    }

    #[test]
    #[should_panic(expected = "null cell at row 2")]
    fn test_typed_getter_on_null_cell_panics() {
        let _ = int_batch().get_int(2, 0);
    }

    #[test]
    fn test_every_getter_rejects_null() {
        let mut bytes = BytesVector::new();
        bytes.push_null();
        let mut decimal = DecimalVector::for_precision(10, 2, 1).unwrap();
        decimal.push_null();
        let mut timestamp = TimestampVector::for_precision(6, 1).unwrap();
        timestamp.push_null();
        let mut batch = ColumnarBatch::new(vec![
            bytes.into(),
            decimal.into(),
            timestamp.into(),
            RowVector::new(vec![BytesVector::new().into(), BytesVector::new().into()]).into(),
        ]);
        if let colbatch::ColumnVector::Row(row) = batch.column_mut(3) {
            row.push_null();
        }
        batch.set_num_rows(1);

        for col in 0..batch.arity() {
            assert!(batch.is_null_at(0, col));
        }
        assert!(catch_unwind(AssertUnwindSafe(|| batch.get_bytes(0, 0).len())).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| batch.get_string(0, 0).len())).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| batch.get_decimal(0, 1, 10, 2))).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| batch.get_timestamp(0, 2, 6))).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| batch.get_variant(0, 3).value().len())).is_err());
    }
}

// =============================================================================
// Bounds contracts
// =============================================================================

mod bounds_contracts {
    use super::*;

    fn three_columns() -> ColumnarBatch {
        let mut batch = ColumnarBatch::new(vec![
            IntVector::from_values(vec![1]).into(),
            LongVector::from_values(vec![2]).into(),
            BytesVector::from_strs(["x"]).into(),
        ]);
        batch.set_num_rows(1);
        batch
    }

    #[test]
    fn test_arity() {
        assert_eq!(three_columns().arity(), 3);
    }

    #[test]
    #[should_panic(expected = "column index 3 out of bounds for batch of arity 3")]
    fn test_column_past_arity_panics() {
        let _ = three_columns().is_null_at(0, 3);
    }

    #[test]
    #[should_panic(expected = "column index 3 out of bounds")]
    fn test_typed_getter_past_arity_panics() {
        let _ = three_columns().get_int(0, 3);
    }

    #[test]
    #[should_panic(expected = "row index 1 out of bounds")]
    fn test_row_past_num_rows_panics() {
        let _ = three_columns().get_long(1, 1);
    }
}

// =============================================================================
// Kind dispatch contracts
// =============================================================================

mod kind_contracts {
    use super::*;

    #[test]
    #[should_panic(expected = "column 0: requested Long vector, found Int")]
    fn test_mismatched_getter_panics() {
        let mut batch = ColumnarBatch::new(vec![IntVector::from_values(vec![7]).into()]);
        batch.set_num_rows(1);
        let _ = batch.get_long(0, 0);
    }

    #[test]
    #[should_panic(expected = "requested Bytes vector, found Decimal")]
    fn test_string_on_decimal_panics() {
        let mut decimal = DecimalVector::for_precision(5, 0, 1).unwrap();
        decimal
            .push(&Decimal::from_unscaled_i64(1, 5, 0).unwrap())
            .unwrap();
        let mut batch = ColumnarBatch::new(vec![decimal.into()]);
        batch.set_num_rows(1);
        let _ = batch.get_string(0, 0);
    }

    #[test]
    #[should_panic(expected = "requested Row vector, found Bytes")]
    fn test_variant_on_bytes_panics() {
        let mut batch = ColumnarBatch::new(vec![BytesVector::from_strs(["v"]).into()]);
        batch.set_num_rows(1);
        let _ = batch.get_variant(0, 0);
    }
}

// =============================================================================
// Byte view contracts
// =============================================================================

mod byte_view_contracts {
    use super::*;

    fn shared_buffer_batch() -> ColumnarBatch {
        let mut bytes = BytesVector::new();
        let segment = bytes.add_segment(b"abcdef".to_vec());
        bytes.push_view(segment, 0, 3);
        bytes.push_view(segment, 3, 3);
        let mut batch = ColumnarBatch::new(vec![bytes.into()]);
        batch.set_num_rows(2);
        batch
    }

    #[test]
    fn test_partial_view_is_compacted_copy() {
        let batch = shared_buffer_batch();
        let first = batch.get_bytes(0, 0);
        assert!(matches!(first, Cow::Owned(_)));
        assert_eq!(&*first, b"abc");
        assert_eq!(first.len(), 3);

        let second = batch.get_bytes(1, 0);
        assert!(matches!(second, Cow::Owned(_)));
        assert_eq!(&*second, b"def");
    }

    #[test]
    fn test_full_view_returns_backing_buffer() {
        let mut bytes = BytesVector::new();
        bytes.push_buffer(b"abcdef".to_vec());
        let mut batch = ColumnarBatch::new(vec![bytes.into()]);
        batch.set_num_rows(1);

        let view = batch.get_byte_view(0, 0);
        let result = batch.get_bytes(0, 0);
        match result {
            Cow::Borrowed(buffer) => {
                assert_eq!(buffer, b"abcdef");
                assert!(std::ptr::eq(buffer, view.buffer()));
            }
            Cow::Owned(_) => panic!("full-buffer cell must not be copied"),
        }
    }

    #[test]
    fn test_string_decodes_only_window() {
        let batch = shared_buffer_batch();
        assert_eq!(batch.get_string(0, 0), "abc");
        assert_eq!(batch.get_string(1, 0), "def");
    }

    #[test]
    fn test_view_exposes_offset_and_buffer() {
        let batch = shared_buffer_batch();
        let view = batch.get_byte_view(1, 0);
        assert_eq!(view.offset(), 3);
        assert_eq!(view.len(), 3);
        assert_eq!(view.buffer(), b"abcdef");
        assert!(!view.spans_buffer());
    }
}

// =============================================================================
// Decimal / timestamp contracts
// =============================================================================

mod decimal_timestamp_contracts {
    use super::*;

    #[test]
    fn test_decimal_roundtrip_same_precision_scale() {
        for (precision, scale) in [(5_u8, 2_u8), (15, 5), (30, 10)] {
            let value = Decimal::from_unscaled_i64(-12_345, precision, scale).unwrap();
            let mut vector = DecimalVector::for_precision(precision, scale, 1).unwrap();
            vector.push(&value).unwrap();
            let mut batch = ColumnarBatch::new(vec![vector.into()]);
            batch.set_num_rows(1);
            let read = batch.get_decimal(0, 0, precision, scale);
            assert_eq!(read, value);
            assert_eq!(read.to_string(), value.to_string());
        }
    }

    #[test]
    fn test_timestamp_roundtrip_same_precision() {
        let instant = Timestamp::from_epoch_nanos(1_234_567_890_123_456_789);
        for precision in 0..=9_u8 {
            let stored = instant.truncate(precision);
            let mut vector = TimestampVector::for_precision(precision, 1).unwrap();
            vector.push(stored, precision).unwrap();
            let mut batch = ColumnarBatch::new(vec![vector.into()]);
            batch.set_num_rows(1);
            assert_eq!(batch.get_timestamp(0, 0, precision), stored);
        }
    }

    #[test]
    fn test_epoch_overflow_is_reported_not_wrapped() {
        let year_2286 = Timestamp::from_epoch_millis(10_000_000_000_000);
        let mut epoch = TimestampVector::epoch(1);
        assert!(epoch.push(year_2286, 9).is_err());
        assert!(epoch.is_empty());

        let mut vector = TimestampVector::for_precision(9, 1).unwrap();
        vector.push(year_2286, 9).unwrap();
        let mut batch = ColumnarBatch::new(vec![vector.into()]);
        batch.set_num_rows(1);
        assert_eq!(batch.get_timestamp(0, 0, 9), year_2286);
    }

    #[test]
    fn test_dictionary_rows_are_readable_when_not_null() {
        let dictionary = BytesVector::from_options([Some(&b"a"[..]), None]);
        let mut ids = BytesVector::dictionary_encoded(dictionary);
        ids.push_id(0);
        assert!(catch_unwind(AssertUnwindSafe(|| ids.push_id(1))).is_err());
        let mut batch = ColumnarBatch::new(vec![ids.into()]);
        batch.set_num_rows(1);
        assert!(!batch.is_null_at(0, 0));
        assert_eq!(&*batch.get_bytes(0, 0), b"a");
    }
}

// =============================================================================
// Variant contracts
// =============================================================================

mod variant_contracts {
    use super::*;

    #[test]
    fn test_variant_field_order() {
        let mut row = RowVector::new(vec![
            BytesVector::from_strs(["value-0", "value-1"]).into(),
            BytesVector::from_strs(["meta-0", "meta-1"]).into(),
        ]);
        row.push_null();
        let mut batch = ColumnarBatch::new(vec![row.into()]);
        batch.set_num_rows(3);

        for r in 0..2 {
            let variant = batch.get_variant(r, 0);
            let fields = batch.get_row(r, 0);
            assert_eq!(variant.value(), &*fields.get_bytes(0));
            assert_eq!(variant.metadata(), &*fields.get_bytes(1));
        }
        assert!(batch.is_null_at(2, 0));
    }

    #[test]
    #[should_panic(expected = "column index 1 out of bounds for batch of arity 1")]
    fn test_variant_needs_two_fields() {
        let row = RowVector::new(vec![BytesVector::from_strs(["v"]).into()]);
        let mut batch = ColumnarBatch::new(vec![row.into()]);
        batch.set_num_rows(1);
        let _ = batch.get_variant(0, 0);
    }
}
