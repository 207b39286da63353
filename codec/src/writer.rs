//! Production of bytes from records.

use crate::{
    field::Value,
    layout::{FieldDescriptor, Kind},
    Error, Record, RecordLayout,
};
use bytes::{BufMut, BytesMut};
use std::io;
use tracing::trace;

/// Encodes `record` into a new buffer of exactly `layout.size()` bytes.
pub fn encode<R: Record>(layout: &RecordLayout, record: &R) -> Result<BytesMut, Error> {
    let mut values = Vec::with_capacity(layout.len());
    record.put_values(&mut values);
    if values.len() != layout.len() {
        return Err(Error::FieldCount {
            expected: layout.len(),
            found: values.len(),
        });
    }

    let mut buffer = BytesMut::with_capacity(layout.size());
    for (field, value) in layout.fields().iter().zip(values) {
        let value = value.ok_or_else(|| Error::UnsupportedFieldValue {
            field: field.name().to_string(),
            reason: "no value".to_string(),
        })?;
        put(field, value, &mut buffer)?;
    }
    assert_eq!(buffer.len(), layout.size(), "encode did not write expected bytes");
    trace!(record = layout.record(), size = layout.size(), "encoded record");

    Ok(buffer)
}

/// Appends the encoded `record` to `buf`.
///
/// The record is encoded in full before anything is appended: on error, `buf` is untouched.
pub fn write<R: Record>(
    layout: &RecordLayout,
    record: &R,
    buf: &mut impl BufMut,
) -> Result<(), Error> {
    let encoded = encode(layout, record)?;
    buf.put_slice(&encoded);
    Ok(())
}

/// Writes the encoded `record` to a byte stream.
pub fn write_to<R: Record>(
    layout: &RecordLayout,
    record: &R,
    sink: &mut impl io::Write,
) -> Result<(), Error> {
    let encoded = encode(layout, record)?;
    sink.write_all(&encoded)?;
    Ok(())
}

/// Appends a single field.
fn put(field: &FieldDescriptor, value: Value, buffer: &mut BytesMut) -> Result<(), Error> {
    let unsupported = |reason: String| Error::UnsupportedFieldValue {
        field: field.name().to_string(),
        reason,
    };
    match (field.kind(), &value) {
        (Kind::Scalar(scalar), _) if value.scalar() == Some(scalar) => {
            let mut bytes = value.to_ne_bytes();
            if !field.order().is_host() {
                bytes.reverse();
            }
            buffer.put_slice(&bytes);
        }
        (Kind::Blob, Value::Blob(bytes)) => {
            if bytes.len() != field.width() {
                return Err(unsupported(format!(
                    "expected {} bytes, found {}",
                    field.width(),
                    bytes.len()
                )));
            }
            buffer.put_slice(bytes);
        }
        (Kind::Text, Value::Text(text)) => {
            if text.len() > field.width() {
                return Err(unsupported(format!(
                    "text of {} bytes exceeds size {}",
                    text.len(),
                    field.width()
                )));
            }
            // Trailing NULs are indistinguishable from padding
            if text.ends_with('\0') {
                return Err(unsupported("text ends with a NUL character".to_string()));
            }
            buffer.put_slice(text.as_bytes());
            buffer.put_bytes(0, field.width() - text.len());
        }
        (kind, value) => {
            return Err(Error::TypeMismatch {
                field: field.name().to_string(),
                expected: kind.name(),
                found: value.type_name(),
            })
        }
    }
    Ok(())
}
