//! Derive fixed-layout records and trace tests with procedural macros.

pub use mcart_proc_macros::{test_traced, Record};

// Hidden from docs because these are needed for the proc macros to use 3rd
// party crates.
#[doc(hidden)]
pub use ::tracing;
#[doc(hidden)]
pub use ::tracing_subscriber;
