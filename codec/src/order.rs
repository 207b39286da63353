//! Byte order of encoded fields and helpers for flipping primitive values.
//!
//! A field without an explicit order uses [ByteOrder::Native], which resolves to the byte order
//! of the host at compile time. Only scalar fields are affected by byte order: blobs and text are
//! copied verbatim.

/// Byte order of a single encoded field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Whatever order the host uses.
    #[default]
    Native,
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the host.
    #[cfg(target_endian = "little")]
    pub const HOST: ByteOrder = ByteOrder::Little;

    /// The byte order of the host.
    #[cfg(target_endian = "big")]
    pub const HOST: ByteOrder = ByteOrder::Big;

    /// Replaces [ByteOrder::Native] with the concrete host order.
    pub const fn resolve(self) -> Self {
        match self {
            ByteOrder::Native => Self::HOST,
            order => order,
        }
    }

    /// Returns true if values in this order can be interpreted without reversing their bytes.
    pub const fn is_host(self) -> bool {
        matches!(
            (self.resolve(), Self::HOST),
            (ByteOrder::Little, ByteOrder::Little) | (ByteOrder::Big, ByteOrder::Big)
        )
    }

    /// Returns `other` if it is explicit, otherwise `self`.
    ///
    /// Used to let an order placed on a nested record act as the default for its fields.
    pub(crate) const fn or(self, other: ByteOrder) -> Self {
        match other {
            ByteOrder::Native => self,
            order => order,
        }
    }
}

/// Primitive values whose byte representation can be reversed.
pub trait Flip: Sized {
    /// Reverses the byte order of the value.
    fn flip(self) -> Self;

    /// Converts a host-order value into its representation in `order`.
    #[inline]
    fn to_order(self, order: ByteOrder) -> Self {
        if order.is_host() {
            self
        } else {
            self.flip()
        }
    }

    /// Converts a value represented in `order` back into host order.
    #[inline]
    fn from_order(self, order: ByteOrder) -> Self {
        // Reversal is its own inverse.
        self.to_order(order)
    }
}

macro_rules! impl_flip_int {
    ($($type:ty),*) => {
        $(
            impl Flip for $type {
                #[inline]
                fn flip(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_flip_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_flip_float {
    ($($type:ty),*) => {
        $(
            impl Flip for $type {
                #[inline]
                fn flip(self) -> Self {
                    <$type>::from_bits(self.to_bits().swap_bytes())
                }
            }
        )*
    };
}

impl_flip_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(ByteOrder::Native.resolve(), ByteOrder::HOST);
        assert_eq!(ByteOrder::Big.resolve(), ByteOrder::Big);
        assert_eq!(ByteOrder::Little.resolve(), ByteOrder::Little);
    }

    #[test]
    fn test_is_host() {
        assert!(ByteOrder::Native.is_host());
        assert!(ByteOrder::HOST.is_host());
        assert_ne!(ByteOrder::Big.is_host(), ByteOrder::Little.is_host());
    }

    #[test]
    fn test_or() {
        assert_eq!(ByteOrder::Big.or(ByteOrder::Native), ByteOrder::Big);
        assert_eq!(ByteOrder::Big.or(ByteOrder::Little), ByteOrder::Little);
        assert_eq!(ByteOrder::Native.or(ByteOrder::Native), ByteOrder::Native);
    }

    #[test]
    fn test_flip_integers() {
        assert_eq!(0x0102u16.flip(), 0x0201);
        assert_eq!(0x01020304u32.flip(), 0x04030201);
        assert_eq!(0x7Fu8.flip(), 0x7F);
        assert_eq!((-2i16).flip(), i16::from_le_bytes((-2i16).to_be_bytes()));
        assert_eq!(1i64.flip().flip(), 1);
    }

    #[test]
    fn test_flip_floats() {
        let value = 1.5f64;
        assert_eq!(value.flip().to_bits(), value.to_bits().swap_bytes());
        assert_eq!(value.flip().flip(), value);
        assert_eq!(2.25f32.flip().flip(), 2.25);
    }

    #[test]
    fn test_to_order() {
        let value = 0x01020304u32;
        assert_eq!(value.to_order(ByteOrder::Big).to_ne_bytes(), [1, 2, 3, 4]);
        assert_eq!(value.to_order(ByteOrder::Little).to_ne_bytes(), [4, 3, 2, 1]);
        assert_eq!(value.to_order(ByteOrder::Native), value);
        assert_eq!(value.to_order(ByteOrder::Big).from_order(ByteOrder::Big), value);
    }
}
