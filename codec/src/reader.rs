//! Reconstruction of records from bytes.

use crate::{
    field::{Value, Values},
    layout::{FieldDescriptor, Kind},
    Error, Record, RecordLayout,
};
use bytes::Buf;
use std::io;
use tracing::trace;

/// Reads one record of type `R` from `buf` using `layout`.
///
/// Exactly `layout.size()` bytes are consumed. If fewer are available, nothing is consumed and
/// [Error::InsufficientData] is returned.
pub fn read<R: Record>(layout: &RecordLayout, buf: &mut impl Buf) -> Result<R, Error> {
    let remaining = buf.remaining();
    if remaining < layout.size() {
        return Err(Error::InsufficientData {
            needed: layout.size(),
            remaining,
        });
    }

    let mut decoded = Vec::with_capacity(layout.len());
    for field in layout.fields() {
        let mut raw = vec![0; field.width()];
        buf.copy_to_slice(&mut raw);
        decoded.push(decode(field, raw)?);
    }
    trace!(record = layout.record(), size = layout.size(), "read record");

    let mut values = Values::new(layout, decoded);
    let record = R::from_values(&mut values)?;
    values.finish()?;
    Ok(record)
}

/// Reads one record of type `R` from a byte stream.
///
/// Bytes are pulled until a full record is buffered. If the stream ends first,
/// [Error::InsufficientData] reports how many bytes were available.
pub fn read_from<R: Record>(layout: &RecordLayout, source: &mut impl io::Read) -> Result<R, Error> {
    let mut raw = vec![0; layout.size()];
    let mut filled = 0;
    while filled < raw.len() {
        match source.read(&mut raw[filled..]) {
            Ok(0) => {
                return Err(Error::InsufficientData {
                    needed: layout.size(),
                    remaining: filled,
                })
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    read(layout, &mut raw.as_slice())
}

/// Converts the raw bytes of a field into a value.
fn decode(field: &FieldDescriptor, mut raw: Vec<u8>) -> Result<Value, Error> {
    let invalid = |message: String| Error::InvalidData(field.name().to_string(), message);
    match field.kind() {
        Kind::Scalar(scalar) => {
            if !field.order().is_host() {
                raw.reverse();
            }
            scalar.decode(&raw).map_err(invalid)
        }
        Kind::Blob => Ok(Value::Blob(raw)),
        Kind::Text => {
            let len = raw.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
            raw.truncate(len);
            String::from_utf8(raw)
                .map(Value::Text)
                .map_err(|err| invalid(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{FieldSpec, Scalar, Shape},
        ByteOrder, Record,
    };
    use bytes::Bytes;

    /// Hand-written record with an explicit constructor and no public fields.
    #[derive(Debug, PartialEq)]
    struct Header {
        magic: u32,
        version: u16,
        label: String,
    }

    impl Header {
        fn new(magic: u32, version: u16, label: String) -> Self {
            Self {
                magic,
                version,
                label,
            }
        }
    }

    impl Record for Header {
        const NAME: &'static str = "Header";

        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("magic", Shape::Scalar(Scalar::U32), ByteOrder::Big),
                FieldSpec::new("version", Shape::Scalar(Scalar::U16), ByteOrder::Little),
                FieldSpec::new("label", Shape::Text(4), ByteOrder::Native),
            ]
        }

        fn put_values(&self, out: &mut Vec<Option<Value>>) {
            out.push(Some(Value::U32(self.magic)));
            out.push(Some(Value::U16(self.version)));
            out.push(Some(Value::Text(self.label.clone())));
        }

        fn from_values(values: &mut Values<'_>) -> Result<Self, Error> {
            use crate::Field;
            let magic = u32::take(values)?;
            let version = u16::take(values)?;
            let label = String::take(values)?;
            Ok(Self::new(magic, version, label))
        }
    }

    fn layout() -> RecordLayout {
        RecordLayout::resolve::<Header>().unwrap()
    }

    #[test]
    fn test_read() {
        let mut buf = Bytes::from_static(&[
            0xCA, 0xFE, 0xBA, 0xBE, // magic (big-endian)
            0x02, 0x00, // version (little-endian)
            b'm', b'c', 0, 0, // label
            0xFF, // trailing
        ]);
        let header: Header = read(&layout(), &mut buf).unwrap();
        assert_eq!(header, Header::new(0xCAFEBABE, 2, "mc".to_string()));
        assert_eq!(buf.remaining(), 1);
    }

    #[test]
    fn test_insufficient_data() {
        let mut buf = Bytes::from_static(&[0xCA, 0xFE, 0xBA, 0xBE, 0x02]);
        let result = read::<Header>(&layout(), &mut buf);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                needed: 10,
                remaining: 5
            })
        ));

        // Nothing was consumed
        assert_eq!(buf.remaining(), 5);
    }

    #[test]
    fn test_invalid_text() {
        let mut buf = Bytes::from_static(&[0, 0, 0, 0, 0, 0, 0xFF, 0xFE, 0, 0]);
        let result = read::<Header>(&layout(), &mut buf);
        assert!(matches!(result, Err(Error::InvalidData(field, _)) if field == "label"));
    }

    #[test]
    fn test_read_from() {
        let raw = [0, 0, 0, 1, 1, 0, b'a', b'b', b'c', b'd'];
        let header: Header = read_from(&layout(), &mut &raw[..]).unwrap();
        assert_eq!(header, Header::new(1, 1, "abcd".to_string()));
    }

    #[test]
    fn test_read_from_short_stream() {
        let raw = [0u8, 0, 0, 1];
        let result = read_from::<Header>(&layout(), &mut &raw[..]);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                needed: 10,
                remaining: 4
            })
        ));
    }

    #[test]
    fn test_read_from_io_error() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "unplugged"))
            }
        }

        let result = read_from::<Header>(&layout(), &mut Broken);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
