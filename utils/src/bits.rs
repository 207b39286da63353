//! Bitwise reductions over sequences of integers.
//!
//! `Or` and `Xor` start from zero. `And` starts from all bits set, so folding an empty
//! sequence yields the identity element of the operation.

use crate::Error;
use core::ops::{BitAnd, BitOr, BitXor};

/// Bitwise operation applied by [fold].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fold {
    Or,
    And,
    Xor,
}

/// Fixed-width integer that can be folded.
pub trait Bits:
    Copy + BitOr<Output = Self> + BitAnd<Output = Self> + BitXor<Output = Self>
{
    /// No bits set.
    const ZERO: Self;
    /// All bits set.
    const ONES: Self;
}

macro_rules! impl_bits {
    ($($type:ty),+) => {
        $(
            impl Bits for $type {
                const ZERO: Self = 0;
                const ONES: Self = !0;
            }
        )+
    };
}

impl_bits!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Fold {
    /// Identity element of the operation.
    pub fn identity<T: Bits>(self) -> T {
        match self {
            Fold::Or | Fold::Xor => T::ZERO,
            Fold::And => T::ONES,
        }
    }

    /// Combines two values.
    pub fn apply<T: Bits>(self, acc: T, value: T) -> T {
        match self {
            Fold::Or => acc | value,
            Fold::And => acc & value,
            Fold::Xor => acc ^ value,
        }
    }
}

/// Folds `sequence` with `op`.
///
/// Returns [Error::EmptyInput] when no sequence is supplied. An empty sequence returns the
/// identity element of `op`.
pub fn fold<T, I>(op: Fold, sequence: Option<I>) -> Result<T, Error>
where
    T: Bits,
    I: IntoIterator<Item = T>,
{
    let sequence = sequence.ok_or(Error::EmptyInput)?;
    Ok(sequence
        .into_iter()
        .fold(op.identity(), |acc, value| op.apply(acc, value)))
}

/// Bitwise OR of all values (zero if empty).
pub fn or_all<T: Bits>(values: impl IntoIterator<Item = T>) -> T {
    values.into_iter().fold_or()
}

/// Bitwise AND of all values (all bits set if empty).
pub fn and_all<T: Bits>(values: impl IntoIterator<Item = T>) -> T {
    values.into_iter().fold_and()
}

/// Bitwise XOR of all values (zero if empty).
pub fn xor_all<T: Bits>(values: impl IntoIterator<Item = T>) -> T {
    values.into_iter().fold_xor()
}

/// Bitwise folds on iterators of integers.
pub trait BitFold<T: Bits>: Iterator<Item = T> + Sized {
    fn fold_or(self) -> T {
        self.fold(Fold::Or.identity(), |acc, value| acc | value)
    }

    fn fold_and(self) -> T {
        self.fold(Fold::And.identity(), |acc, value| acc & value)
    }

    fn fold_xor(self) -> T {
        self.fold(Fold::Xor.identity(), |acc, value| acc ^ value)
    }
}

impl<T: Bits, I: Iterator<Item = T>> BitFold<T> for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;
    use test_case::test_case;

    #[test_case(Fold::Or, &[], 0; "or empty")]
    #[test_case(Fold::And, &[], u32::MAX; "and empty")]
    #[test_case(Fold::Xor, &[], 0; "xor empty")]
    #[test_case(Fold::Or, &[1, 2, 4], 7; "or distinct bits")]
    #[test_case(Fold::Xor, &[1, 2, 3], 0; "xor cancels")]
    #[test_case(Fold::And, &[0b1110, 0b0111], 0b0110; "and overlap")]
    #[test_case(Fold::And, &[42], 42; "and single")]
    fn test_fold(op: Fold, values: &[u32], expected: u32) {
        assert_eq!(fold(op, Some(values.iter().copied())), Ok(expected));
    }

    #[test]
    fn test_fold_none() {
        assert_eq!(fold::<u8, Vec<u8>>(Fold::Or, None), Err(Error::EmptyInput));
        assert_eq!(fold::<i64, Vec<i64>>(Fold::And, None), Err(Error::EmptyInput));
        assert_eq!(
            fold::<u128, Vec<u128>>(Fold::Xor, None),
            Err(Error::EmptyInput)
        );
    }

    macro_rules! impl_identity_test {
        ($($type:ident),+) => {
            $(
                paste! {
                    #[test]
                    fn [<test_identity_ $type>]() {
                        let empty: [$type; 0] = [];
                        assert_eq!(or_all(empty), 0);
                        assert_eq!(xor_all(empty), 0);
                        assert_eq!(and_all(empty), !0);
                        assert_eq!(and_all([$type::MAX, 1]), 1);
                    }
                }
            )+
        };
    }

    impl_identity_test!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

    #[test]
    fn test_signed() {
        assert_eq!(and_all([-1i32, -2]), -2);
        assert_eq!(or_all([i8::MIN, 1]), i8::MIN | 1);
        assert_eq!(xor_all([-1i16, -1]), 0);
    }

    #[test]
    fn test_iterator_ext() {
        let values = vec![0x0Fu8, 0xF0, 0x3C];
        assert_eq!(values.iter().copied().fold_or(), 0xFF);
        assert_eq!(values.iter().copied().fold_and(), 0x00);
        assert_eq!(values.iter().copied().fold_xor(), 0xC3);
        assert_eq!((1..=3u64).fold_xor(), 0);
    }
}
