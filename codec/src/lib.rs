//! Marshal fixed-layout records.
//!
//! # Overview
//!
//! Converts values of fixed-shape record types to and from flat byte sequences:
//! - Fields are encoded in declaration order, with no padding.
//! - Each field has its own byte order (native unless annotated).
//! - Layouts are resolved once per type, validated up front, and cached.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u128`, `i8`..`i128`, `f32`, `f64`, `bool`, `char`
//! - Fixed-size blobs: `[u8; N]`, [uuid::Uuid]
//! - Fixed-size text: `String` with a declared size
//! - `Option<T>` (which must hold a value when written)
//! - Nested records, flattened into the enclosing layout
//!
//! Types without a fixed width (unsized `String`, `Vec<T>`) are rejected when the layout is
//! resolved, with [LayoutError::UnsupportedFieldType].
//!
//! # Example
//!
//! ```
//! use mcart_codec::{Record, RecordExt};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Header {
//!     #[record(big_endian)]
//!     length: u32,
//!     #[record(little_endian)]
//!     checksum: u16,
//!     #[record(size = 4)]
//!     tag: String,
//! }
//!
//! let header = Header { length: 1, checksum: 1, tag: "mc".to_string() };
//! let encoded = header.encode().unwrap();
//! assert_eq!(&encoded[..], &[0, 0, 0, 1, 1, 0, b'm', b'c', 0, 0]);
//! assert_eq!(Header::decode(encoded).unwrap(), header);
//! ```

extern crate self as mcart_codec;

pub mod cache;
pub mod error;
pub mod field;
pub mod layout;
pub mod order;
pub mod reader;
pub mod record;
pub mod writer;

// Re-export main types and traits
pub use cache::LayoutCache;
pub use error::{Error, LayoutError};
pub use field::{Field, FieldSpec, Scalar, Shape, Value, Values};
pub use layout::{FieldDescriptor, Kind, RecordLayout};
pub use mcart_macros::Record;
pub use order::{ByteOrder, Flip};
pub use reader::{read, read_from};
pub use record::{Record, RecordExt};
pub use writer::{encode, write, write_to};
