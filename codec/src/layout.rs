//! Resolution of a record's static field table into an ordered, flattened layout.
//!
//! A [RecordLayout] lists one [FieldDescriptor] per encoded value, in declaration order. Nested
//! records are flattened at resolution time: their descriptors are inlined (named with a dotted
//! path) and keep their own byte orders. A byte order placed on the nested member itself becomes
//! the default for inner fields that do not declare one.

use crate::{
    field::{FieldSpec, Scalar, Shape},
    ByteOrder, LayoutError, Record,
};

/// Encoded representation of a single descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A primitive value, reordered according to the field's byte order.
    Scalar(Scalar),
    /// Opaque bytes copied verbatim.
    Blob,
    /// UTF-8 text padded with NUL bytes.
    Text,
}

impl Kind {
    /// Name of the kind, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Scalar(scalar) => scalar.name(),
            Kind::Blob => "blob",
            Kind::Text => "text",
        }
    }
}

/// Describes one encoded field of a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: String,
    kind: Kind,
    width: usize,
    order: ByteOrder,
    offset: usize,
    index: usize,
}

impl FieldDescriptor {
    /// Name of the field (dotted for fields of nested records).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of bytes occupied by the field.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Byte order requested for the field.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Byte offset of the field within an encoded record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position of the field within the layout.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered, immutable description of how a record is encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordLayout {
    record: &'static str,
    fields: Vec<FieldDescriptor>,
    size: usize,
}

impl RecordLayout {
    /// Resolves the layout of `R`.
    pub fn resolve<R: Record>() -> Result<Self, LayoutError> {
        Self::from_fields(R::NAME, &R::fields())
    }

    /// Resolves a layout from a field table.
    ///
    /// Fails if any field has no fixed width or if no fields are declared.
    pub fn from_fields(record: &'static str, fields: &[FieldSpec]) -> Result<Self, LayoutError> {
        let mut layout = Self {
            record,
            fields: Vec::with_capacity(fields.len()),
            size: 0,
        };
        layout.flatten(record, None, fields, ByteOrder::Native)?;
        if layout.fields.is_empty() {
            return Err(LayoutError::EmptyLayout(record));
        }
        Ok(layout)
    }

    fn flatten(
        &mut self,
        record: &'static str,
        prefix: Option<&str>,
        fields: &[FieldSpec],
        inherited: ByteOrder,
    ) -> Result<(), LayoutError> {
        for spec in fields {
            let name = match prefix {
                Some(prefix) => format!("{prefix}.{}", spec.name),
                None => spec.name.to_string(),
            };
            let order = inherited.or(spec.order);
            if let Some(size) = spec.size {
                if !matches!(spec.shape, Shape::Text(_) | Shape::Variable(_)) {
                    return Err(LayoutError::UnexpectedSize {
                        record,
                        field: name,
                        size,
                    });
                }
            }
            let (kind, width) = match spec.shape {
                Shape::Scalar(scalar) => (Kind::Scalar(scalar), scalar.width()),
                Shape::Blob(width) => (Kind::Blob, width),
                Shape::Text(width) => (Kind::Text, width),
                Shape::Nested {
                    record: nested,
                    fields,
                } => {
                    let fields = fields();
                    if fields.is_empty() {
                        return Err(LayoutError::EmptyLayout(nested));
                    }
                    self.flatten(nested, Some(&name), &fields, order)?;
                    continue;
                }
                Shape::Variable(ty) => {
                    return Err(LayoutError::UnsupportedFieldType {
                        record,
                        field: name,
                        ty,
                    })
                }
            };
            self.fields.push(FieldDescriptor {
                name,
                kind,
                width,
                order,
                offset: self.size,
                index: self.fields.len(),
            });
            self.size += width;
        }
        Ok(())
    }

    /// Name of the record the layout was resolved from.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Descriptors in encoding order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a descriptor by (dotted) name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: empty layouts fail to resolve.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of bytes in one encoded record.
    pub fn size(&self) -> usize {
        self.size
    }
}
