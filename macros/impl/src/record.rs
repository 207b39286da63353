//! Expansion of `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    spanned::Spanned, Attribute, Data, DeriveInput, Error, Fields, Lit, LitStr, Member, Meta,
    NestedMeta,
};

/// Options read from `#[record(...)]` on a single field.
#[derive(Default)]
struct FieldOptions {
    order: Option<TokenStream>,
    size: Option<usize>,
}

fn parse_options(attrs: &[Attribute]) -> Result<FieldOptions, Error> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path.is_ident("record") {
            continue;
        }
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "expected #[record(big_endian | little_endian | size = N)]",
                ))
            }
        };
        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::Path(path))
                    if path.is_ident("big_endian") || path.is_ident("little_endian") =>
                {
                    if options.order.is_some() {
                        return Err(Error::new_spanned(path, "conflicting byte order"));
                    }
                    options.order = Some(if path.is_ident("big_endian") {
                        quote!(::mcart_codec::ByteOrder::Big)
                    } else {
                        quote!(::mcart_codec::ByteOrder::Little)
                    });
                }
                NestedMeta::Meta(Meta::NameValue(value)) if value.path.is_ident("size") => {
                    if options.size.is_some() {
                        return Err(Error::new_spanned(value, "duplicate size"));
                    }
                    match value.lit {
                        Lit::Int(size) => options.size = Some(size.base10_parse()?),
                        other => return Err(Error::new_spanned(other, "size must be an integer")),
                    }
                }
                other => return Err(Error::new_spanned(other, "unknown record option")),
            }
        }
    }
    Ok(options)
}

pub(crate) fn expand(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new(
                data.enum_token.span(),
                "Record can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(Error::new(
                data.union_token.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut specs = Vec::new();
    let mut puts = Vec::new();
    let mut takes = Vec::new();
    let members: Vec<(Member, &syn::Field)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| Some((Member::Named(field.ident.clone()?), field)))
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(index, field)| (Member::Unnamed(index.into()), field))
            .collect(),
        Fields::Unit => Vec::new(),
    };
    for (member, field) in &members {
        let options = parse_options(&field.attrs)?;
        let ty = &field.ty;
        let label = match member {
            Member::Named(ident) => LitStr::new(&ident.to_string(), ident.span()),
            Member::Unnamed(index) => LitStr::new(&index.index.to_string(), field.span()),
        };
        let order = options
            .order
            .unwrap_or_else(|| quote!(::mcart_codec::ByteOrder::Native));
        let (size, sized) = match options.size {
            Some(size) => (
                quote!(::core::option::Option::Some(#size)),
                quote!(.sized(#size)),
            ),
            None => (quote!(::core::option::Option::None), quote!()),
        };
        specs.push(quote! {
            ::mcart_codec::FieldSpec::new(
                #label,
                <#ty as ::mcart_codec::Field>::shape(#size),
                #order,
            )#sized
        });
        puts.push(quote! {
            <#ty as ::mcart_codec::Field>::put(&self.#member, out);
        });
        takes.push(quote! {
            #member: <#ty as ::mcart_codec::Field>::take(values)?,
        });
    }

    let record_name = LitStr::new(&name.to_string(), name.span());
    Ok(quote! {
        impl ::mcart_codec::Record for #name {
            const NAME: &'static str = #record_name;

            fn fields() -> ::std::vec::Vec<::mcart_codec::FieldSpec> {
                ::std::vec![#(#specs),*]
            }

            #[allow(unused_variables)]
            fn put_values(
                &self,
                out: &mut ::std::vec::Vec<::core::option::Option<::mcart_codec::Value>>,
            ) {
                #(#puts)*
            }

            #[allow(unused_variables)]
            fn from_values(
                values: &mut ::mcart_codec::Values<'_>,
            ) -> ::core::result::Result<Self, ::mcart_codec::Error> {
                ::core::result::Result::Ok(Self { #(#takes)* })
            }
        }

        impl ::mcart_codec::Field for #name {
            fn shape(_: ::core::option::Option<usize>) -> ::mcart_codec::Shape {
                ::mcart_codec::Shape::Nested {
                    record: <Self as ::mcart_codec::Record>::NAME,
                    fields: <Self as ::mcart_codec::Record>::fields,
                }
            }

            fn put(
                &self,
                out: &mut ::std::vec::Vec<::core::option::Option<::mcart_codec::Value>>,
            ) {
                <Self as ::mcart_codec::Record>::put_values(self, out)
            }

            fn take(
                values: &mut ::mcart_codec::Values<'_>,
            ) -> ::core::result::Result<Self, ::mcart_codec::Error> {
                <Self as ::mcart_codec::Record>::from_values(values)
            }
        }
    })
}
