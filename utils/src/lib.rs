//! Small numeric helpers shared by MCART crates.

pub mod bits;
pub mod percent;
pub mod units;

pub use bits::{and_all, fold, or_all, xor_all, BitFold, Bits, Fold};
pub use percent::{normalize, percent_of};
pub use units::{format_bytes, Base};

use thiserror::Error;

/// Errors returned by the helpers in this crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("empty input")]
    EmptyInput,
    #[error("total is zero")]
    ZeroTotal,
    #[error("negative value")]
    Negative,
    #[error("value is not finite")]
    NonFinite,
}
