//! Core record traits.

use crate::{
    cache,
    field::{FieldSpec, Value, Values},
    reader, writer, Error, LayoutError, RecordLayout,
};
use bytes::{Buf, BufMut, BytesMut};
use std::sync::Arc;

/// Trait for fixed-layout records.
///
/// Usually implemented with `#[derive(Record)]`, which lists the fields in declaration order and
/// reads per-field attributes:
/// - `#[record(big_endian)]` / `#[record(little_endian)]` override the (native) byte order.
/// - `#[record(size = N)]` declares the fixed size of a `String` field.
pub trait Record: Sized {
    /// Name of the record, for diagnostics.
    const NAME: &'static str;

    /// Static field table, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Appends the record's values in layout order. `None` marks an absent value.
    fn put_values(&self, out: &mut Vec<Option<Value>>);

    /// Constructs the record from decoded values, taken positionally.
    fn from_values(values: &mut Values<'_>) -> Result<Self, Error>;
}

/// Extension trait providing ergonomic methods that resolve layouts through the global cache.
pub trait RecordExt: Record + 'static {
    /// Returns the cached layout of this record.
    fn layout() -> Result<Arc<RecordLayout>, LayoutError> {
        cache::global().get::<Self>()
    }

    /// Reads one record from the buffer, consuming exactly the layout's size.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        let layout = Self::layout()?;
        reader::read(&layout, buf)
    }

    /// Decodes one record, ensuring the buffer is fully consumed.
    fn decode(mut buf: impl Buf) -> Result<Self, Error> {
        let record = Self::read(&mut buf)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(record)
    }

    /// Reads one record from a byte stream.
    fn read_from(source: &mut impl std::io::Read) -> Result<Self, Error> {
        let layout = Self::layout()?;
        reader::read_from(&layout, source)
    }

    /// Appends the encoded record to the buffer.
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        let layout = Self::layout()?;
        writer::write(&layout, self, buf)
    }

    /// Encodes the record to a new buffer.
    fn encode(&self) -> Result<BytesMut, Error> {
        let layout = Self::layout()?;
        writer::encode(&layout, self)
    }

    /// Writes the encoded record to a byte stream.
    fn write_to(&self, sink: &mut impl std::io::Write) -> Result<(), Error> {
        let layout = Self::layout()?;
        writer::write_to(&layout, self, sink)
    }
}

// Automatically implement `RecordExt` for all records.
impl<T: Record + 'static> RecordExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[derive(Debug, PartialEq, Record)]
    struct Reading {
        #[record(big_endian)]
        sensor: u16,
        #[record(little_endian)]
        value: i32,
    }

    fn reading() -> Reading {
        Reading {
            sensor: 0x0102,
            value: -2,
        }
    }

    #[test]
    fn test_layout_is_cached() {
        let first = Reading::layout().unwrap();
        let second = Reading::layout().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.size(), 6);
    }

    #[test]
    fn test_buffer_methods() {
        let encoded = reading().encode().unwrap();
        assert_eq!(&encoded[..], &[0x01, 0x02, 0xFE, 0xFF, 0xFF, 0xFF]);

        let mut buf = BytesMut::new();
        reading().write(&mut buf).unwrap();
        assert_eq!(buf, encoded);

        let mut frozen = buf.freeze();
        assert_eq!(Reading::read(&mut frozen).unwrap(), reading());
        assert_eq!(frozen.remaining(), 0);
        assert_eq!(Reading::decode(encoded).unwrap(), reading());
    }

    #[test]
    fn test_stream_methods() {
        let mut sink = Vec::new();
        reading().write_to(&mut sink).unwrap();
        assert_eq!(sink.len(), 6);
        assert_eq!(Reading::read_from(&mut sink.as_slice()).unwrap(), reading());
    }
}
