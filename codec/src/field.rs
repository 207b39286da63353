//! Field shapes, decoded values, and [Field] implementations for supported member types.
//!
//! # Fixed-width vs variable-width
//!
//! Every primitive has a constant width and can be marshaled without configuration. Strings are
//! only eligible when the record declares a size for them (`#[record(size = N)]`), in which case
//! they occupy exactly `N` bytes of UTF-8, padded with NUL bytes. Unsized strings and collections
//! report [Shape::Variable] and are rejected when the layout is resolved.

use crate::{
    layout::{FieldDescriptor, RecordLayout},
    ByteOrder, Error,
};
use uuid::Uuid;

/// Primitive type of a scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    /// Encoded as a single byte, `0` or `1`.
    Bool,
    /// Encoded as the 4-byte Unicode scalar value.
    Char,
}

impl Scalar {
    /// Number of bytes occupied by the encoded value.
    pub const fn width(self) -> usize {
        match self {
            Scalar::U8 | Scalar::I8 | Scalar::Bool => 1,
            Scalar::U16 | Scalar::I16 => 2,
            Scalar::U32 | Scalar::I32 | Scalar::F32 | Scalar::Char => 4,
            Scalar::U64 | Scalar::I64 | Scalar::F64 => 8,
            Scalar::U128 | Scalar::I128 => 16,
        }
    }

    /// Rust name of the primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::U128 => "u128",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::I128 => "i128",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::Bool => "bool",
            Scalar::Char => "char",
        }
    }

    /// Interprets `raw` (already in host order) as a value of this primitive.
    pub(crate) fn decode(self, raw: &[u8]) -> Result<Value, String> {
        let width = self.width();
        macro_rules! ne {
            ($type:ty) => {
                <$type>::from_ne_bytes(
                    raw.try_into()
                        .map_err(|_| format!("expected {width} bytes, found {}", raw.len()))?,
                )
            };
        }

        Ok(match self {
            Scalar::U8 => Value::U8(ne!(u8)),
            Scalar::U16 => Value::U16(ne!(u16)),
            Scalar::U32 => Value::U32(ne!(u32)),
            Scalar::U64 => Value::U64(ne!(u64)),
            Scalar::U128 => Value::U128(ne!(u128)),
            Scalar::I8 => Value::I8(ne!(i8)),
            Scalar::I16 => Value::I16(ne!(i16)),
            Scalar::I32 => Value::I32(ne!(i32)),
            Scalar::I64 => Value::I64(ne!(i64)),
            Scalar::I128 => Value::I128(ne!(i128)),
            Scalar::F32 => Value::F32(ne!(f32)),
            Scalar::F64 => Value::F64(ne!(f64)),
            Scalar::Bool => match ne!(u8) {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => return Err(format!("invalid bool {other:#04x}")),
            },
            Scalar::Char => {
                let code = ne!(u32);
                Value::Char(
                    char::from_u32(code).ok_or_else(|| format!("invalid char {code:#010x}"))?,
                )
            }
        })
    }
}

/// How a member type is laid out, as reported by [Field::shape].
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// A single primitive value.
    Scalar(Scalar),
    /// Opaque bytes of a fixed length, never reordered.
    Blob(usize),
    /// UTF-8 text stored in a fixed number of bytes.
    Text(usize),
    /// Another record, flattened into the enclosing layout.
    Nested {
        record: &'static str,
        fields: fn() -> Vec<FieldSpec>,
    },
    /// A type without a fixed width.
    Variable(&'static str),
}

impl Shape {
    /// Number of descriptors this shape flattens into.
    pub fn leaves(&self) -> usize {
        match self {
            Shape::Nested { fields, .. } => fields().iter().map(|spec| spec.shape.leaves()).sum(),
            _ => 1,
        }
    }
}

/// One entry of a record's static field table.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub order: ByteOrder,
    /// Size declared on the member, only valid for text.
    pub size: Option<usize>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, shape: Shape, order: ByteOrder) -> Self {
        Self {
            name,
            shape,
            order,
            size: None,
        }
    }

    /// Records the size declared on the member.
    pub const fn sized(self, size: usize) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }
}

/// A decoded field value (or one waiting to be encoded).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    Blob(Vec<u8>),
    Text(String),
}

impl Value {
    /// The primitive type of a scalar value, or `None` for blobs and text.
    pub fn scalar(&self) -> Option<Scalar> {
        Some(match self {
            Value::U8(_) => Scalar::U8,
            Value::U16(_) => Scalar::U16,
            Value::U32(_) => Scalar::U32,
            Value::U64(_) => Scalar::U64,
            Value::U128(_) => Scalar::U128,
            Value::I8(_) => Scalar::I8,
            Value::I16(_) => Scalar::I16,
            Value::I32(_) => Scalar::I32,
            Value::I64(_) => Scalar::I64,
            Value::I128(_) => Scalar::I128,
            Value::F32(_) => Scalar::F32,
            Value::F64(_) => Scalar::F64,
            Value::Bool(_) => Scalar::Bool,
            Value::Char(_) => Scalar::Char,
            Value::Blob(_) | Value::Text(_) => return None,
        })
    }

    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Blob(_) => "blob",
            Value::Text(_) => "text",
            scalar => scalar.scalar().map_or("unknown", Scalar::name),
        }
    }

    /// Host-order bytes of a scalar value, or the raw bytes of a blob or text.
    pub(crate) fn to_ne_bytes(&self) -> Vec<u8> {
        match self {
            Value::U8(v) => v.to_ne_bytes().to_vec(),
            Value::U16(v) => v.to_ne_bytes().to_vec(),
            Value::U32(v) => v.to_ne_bytes().to_vec(),
            Value::U64(v) => v.to_ne_bytes().to_vec(),
            Value::U128(v) => v.to_ne_bytes().to_vec(),
            Value::I8(v) => v.to_ne_bytes().to_vec(),
            Value::I16(v) => v.to_ne_bytes().to_vec(),
            Value::I32(v) => v.to_ne_bytes().to_vec(),
            Value::I64(v) => v.to_ne_bytes().to_vec(),
            Value::I128(v) => v.to_ne_bytes().to_vec(),
            Value::F32(v) => v.to_ne_bytes().to_vec(),
            Value::F64(v) => v.to_ne_bytes().to_vec(),
            Value::Bool(v) => vec![u8::from(*v)],
            Value::Char(v) => u32::from(*v).to_ne_bytes().to_vec(),
            Value::Blob(bytes) => bytes.clone(),
            Value::Text(text) => text.as_bytes().to_vec(),
        }
    }
}

/// Cursor over the decoded values of one record, in layout order.
///
/// Handed to [crate::Record::from_values], which consumes values positionally.
pub struct Values<'a> {
    layout: &'a RecordLayout,
    values: std::iter::Zip<std::slice::Iter<'a, FieldDescriptor>, std::vec::IntoIter<Value>>,
    taken: usize,
}

impl<'a> Values<'a> {
    pub(crate) fn new(layout: &'a RecordLayout, values: Vec<Value>) -> Self {
        Self {
            layout,
            values: layout.fields().iter().zip(values),
            taken: 0,
        }
    }

    /// Returns the next value along with the descriptor it was decoded from.
    pub fn next(&mut self) -> Result<(&'a FieldDescriptor, Value), Error> {
        self.taken += 1;
        self.values.next().ok_or(Error::FieldCount {
            expected: self.layout.len(),
            found: self.taken,
        })
    }

    /// Number of values not yet taken.
    pub fn remaining(&self) -> usize {
        self.layout.len().saturating_sub(self.taken)
    }

    /// Ensures every value was taken.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.taken != self.layout.len() {
            return Err(Error::FieldCount {
                expected: self.layout.len(),
                found: self.taken,
            });
        }
        Ok(())
    }
}

/// Builds the error returned when a value does not match the member type taking it.
pub fn mismatch(field: &FieldDescriptor, expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        field: field.name().to_string(),
        expected,
        found: found.type_name(),
    }
}

/// A type that can appear as a member of a record.
///
/// Implemented for primitives, byte arrays, [Uuid], strings, `Option<T>`, and (through
/// `#[derive(Record)]`) for records themselves, which are then flattened into the enclosing
/// layout.
pub trait Field: Sized {
    /// Shape of the member, given the size declared on it (if any).
    fn shape(size: Option<usize>) -> Shape;

    /// Appends the member's values in layout order. `None` marks an absent value.
    fn put(&self, out: &mut Vec<Option<Value>>);

    /// Rebuilds the member from the next value(s).
    fn take(values: &mut Values<'_>) -> Result<Self, Error>;
}

macro_rules! impl_scalar {
    ($type:ty, $variant:ident) => {
        impl Field for $type {
            #[inline]
            fn shape(_: Option<usize>) -> Shape {
                Shape::Scalar(Scalar::$variant)
            }

            #[inline]
            fn put(&self, out: &mut Vec<Option<Value>>) {
                out.push(Some(Value::$variant(*self)));
            }

            #[inline]
            fn take(values: &mut Values<'_>) -> Result<Self, Error> {
                match values.next()? {
                    (_, Value::$variant(value)) => Ok(value),
                    (field, other) => Err(mismatch(field, stringify!($type), &other)),
                }
            }
        }
    };
}

impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(u128, U128);
impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(i128, I128);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(bool, Bool);
impl_scalar!(char, Char);

// Constant-size array implementation
impl<const N: usize> Field for [u8; N] {
    #[inline]
    fn shape(_: Option<usize>) -> Shape {
        if N == 0 {
            return Shape::Variable("[u8; 0]");
        }
        Shape::Blob(N)
    }

    #[inline]
    fn put(&self, out: &mut Vec<Option<Value>>) {
        out.push(Some(Value::Blob(self.to_vec())));
    }

    fn take(values: &mut Values<'_>) -> Result<Self, Error> {
        match values.next()? {
            (field, Value::Blob(bytes)) => <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
                Error::InvalidData(
                    field.name().to_string(),
                    format!("expected {N} bytes, found {}", bytes.len()),
                )
            }),
            (field, other) => Err(mismatch(field, "blob", &other)),
        }
    }
}

impl Field for Uuid {
    #[inline]
    fn shape(_: Option<usize>) -> Shape {
        Shape::Blob(16)
    }

    #[inline]
    fn put(&self, out: &mut Vec<Option<Value>>) {
        out.push(Some(Value::Blob(self.as_bytes().to_vec())));
    }

    fn take(values: &mut Values<'_>) -> Result<Self, Error> {
        match values.next()? {
            (field, Value::Blob(bytes)) => Uuid::from_slice(&bytes)
                .map_err(|err| Error::InvalidData(field.name().to_string(), err.to_string())),
            (field, other) => Err(mismatch(field, "uuid", &other)),
        }
    }
}

impl Field for String {
    fn shape(size: Option<usize>) -> Shape {
        match size {
            Some(size) if size > 0 => Shape::Text(size),
            _ => Shape::Variable("String"),
        }
    }

    #[inline]
    fn put(&self, out: &mut Vec<Option<Value>>) {
        out.push(Some(Value::Text(self.clone())));
    }

    fn take(values: &mut Values<'_>) -> Result<Self, Error> {
        match values.next()? {
            (_, Value::Text(text)) => Ok(text),
            (field, other) => Err(mismatch(field, "text", &other)),
        }
    }
}

// Collections never have a fixed width; layouts containing one fail to resolve.
impl<T> Field for Vec<T> {
    fn shape(_: Option<usize>) -> Shape {
        Shape::Variable("Vec")
    }

    fn put(&self, out: &mut Vec<Option<Value>>) {
        out.push(None);
    }

    fn take(values: &mut Values<'_>) -> Result<Self, Error> {
        let (field, other) = values.next()?;
        Err(mismatch(field, "Vec", &other))
    }
}

// Option implementation
impl<T: Field> Field for Option<T> {
    #[inline]
    fn shape(size: Option<usize>) -> Shape {
        T::shape(size)
    }

    fn put(&self, out: &mut Vec<Option<Value>>) {
        match self {
            Some(inner) => inner.put(out),
            None => out.extend((0..T::shape(None).leaves()).map(|_| None)),
        }
    }

    #[inline]
    fn take(values: &mut Values<'_>) -> Result<Self, Error> {
        T::take(values).map(Some)
    }
}
