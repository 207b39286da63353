//! Procedural macros for fixed-layout records and traced tests.
//!
//! Use these through `mcart-macros`, which also re-exports the crates the expansions refer to.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput, Error, ItemFn, Lit, MetaNameValue};

mod record;

/// Derives `mcart_codec::Record` (and `mcart_codec::Field`, so the record can be nested).
///
/// Fields are encoded in declaration order. Per-field options:
/// - `#[record(big_endian)]` or `#[record(little_endian)]`: byte order of the field (or the
///   default order for the fields of a nested record).
/// - `#[record(size = N)]`: fixed size in bytes of a `String` field.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Runs a test with a `tracing` subscriber that prints to the test output.
///
/// The level defaults to `DEBUG` and can be set with `#[test_traced(level = "INFO")]`. Expands to
/// paths through `mcart_macros`, which re-exports `tracing` and `tracing_subscriber`.
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let level = if attr.is_empty() {
        "DEBUG".to_string()
    } else {
        let option = parse_macro_input!(attr as MetaNameValue);
        if !option.path.is_ident("level") {
            return Error::new_spanned(option.path, "expected level = \"<LEVEL>\"")
                .to_compile_error()
                .into();
        }
        match option.lit {
            Lit::Str(level) => level.value().to_uppercase(),
            other => {
                return Error::new_spanned(other, "level must be a string")
                    .to_compile_error()
                    .into()
            }
        }
    };
    if !LEVELS.contains(&level.as_str()) {
        return Error::new_spanned(
            &input.sig.ident,
            format!("unknown level {level}, expected one of {LEVELS:?}"),
        )
        .to_compile_error()
        .into();
    }
    let level = format_ident!("{}", level);

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;
    quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::mcart_macros::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::mcart_macros::tracing::Level::#level)
                .finish();
            let dispatch = ::mcart_macros::tracing::Dispatch::new(subscriber);
            ::mcart_macros::tracing::dispatcher::with_default(&dispatch, || #block)
        }
    }
    .into()
}
