//! Procedural macros for the callbind dispatcher.
//!
//! - `#[derive(Event)]`: Implements `callbind::Event` for an enum. Every variant
//!   is an event kind named after the variant, and its fields, in order, are
//!   the kind's parameter signature.
//!
//! Usage:
//! ```rust,ignore
//! use callbind::Event;
//!
//! #[derive(Event)]
//! #[event(output = Result<(), ConsumerError>)]
//! enum Poll {
//!     Message(Message),
//!     #[event(default = Err::<(), ConsumerError>)]
//!     Error(ConsumerError),
//!     #[event(default = |_: i32| Ok(()))]
//!     PartitionEof { partition: i32 },
//!     Timeout,
//! }
//! ```
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Ident, Type, parse_macro_input, parse_quote,
};

/// Derives `callbind::Event` for an enum.
///
/// # Attributes
///
/// - `#[event(output = Type)]` on the enum: return type of every handler.
///   Defaults to `()`.
/// - `#[event(default = expr)]` on a variant: default handler for that kind.
///   `expr` is any function or closure taking the variant's fields.
///   Variants without a default are required.
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Event)] is only supported on enums",
        ));
    };
    if data_enum.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Event)] needs at least one variant",
        ));
    }

    let ident = &input.ident;
    // Event kinds store their argument types as `TypeId`s, so every type
    // parameter must be 'static.
    let mut generics = input.generics.clone();
    let type_params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in &type_params {
        where_clause.predicates.push(parse_quote! { #param: 'static });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let output = parse_output(&input.attrs)?.unwrap_or_else(|| parse_quote!(()));

    let mut kinds = Vec::new();
    let mut index_arms = Vec::new();
    let mut route_arms = Vec::new();
    let mut name_arms = Vec::new();

    for (index, variant) in data_enum.variants.iter().enumerate() {
        let variant_ident = &variant.ident;
        let variant_name = variant_ident.to_string();
        let types = variant.fields.iter().map(|field| &field.ty);
        let args = quote! { (#(#types,)*) };

        kinds.push(match parse_default(&variant.attrs)? {
            Some(default) => quote! {
                ::callbind::EventKind::optional::<#args, _>(#variant_name, #default)
            },
            None => quote! {
                ::callbind::EventKind::required::<#args>(#variant_name)
            },
        });

        // Handle different field types (unit, tuple, struct)
        let (wildcard, pattern, bindings) = match &variant.fields {
            Fields::Unit => (
                quote! { Self::#variant_ident },
                quote! { Self::#variant_ident },
                Vec::new(),
            ),
            Fields::Unnamed(fields) => {
                let bindings: Vec<Ident> = (0..fields.unnamed.len())
                    .map(|i| format_ident!("arg{}", i))
                    .collect();
                (
                    quote! { Self::#variant_ident(..) },
                    quote! { Self::#variant_ident(#(#bindings),*) },
                    bindings,
                )
            }
            Fields::Named(fields) => {
                let bindings: Vec<Ident> =
                    fields.named.iter().filter_map(|f| f.ident.clone()).collect();
                (
                    quote! { Self::#variant_ident { .. } },
                    quote! { Self::#variant_ident { #(#bindings),* } },
                    bindings,
                )
            }
        };

        index_arms.push(quote! { #wildcard => #index });
        name_arms.push(quote! { #wildcard => ::std::borrow::Cow::Borrowed(#variant_name) });
        route_arms.push(quote! {
            #pattern => __binding.call::<#args>(#index, (#(#bindings,)*))
        });
    }

    Ok(quote! {
        impl #impl_generics ::callbind::Event for #ident #ty_generics #where_clause {
            type Output = #output;

            fn kinds() -> ::std::vec::Vec<::callbind::EventKind<Self::Output>> {
                ::std::vec![#(#kinds),*]
            }

            fn kind_index(&self) -> usize {
                match self {
                    #(#index_arms),*
                }
            }

            fn route(self, __binding: &::callbind::Binding<Self>) -> Self::Output {
                match self {
                    #(#route_arms),*
                }
            }

            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                match self {
                    #(#name_arms),*
                }
            }
        }
    })
}

fn parse_output(attrs: &[Attribute]) -> syn::Result<Option<Type>> {
    let mut output = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("output") {
                output = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported event attribute, expected `output`"))
            }
        })?;
    }
    Ok(output)
}

fn parse_default(attrs: &[Attribute]) -> syn::Result<Option<Expr>> {
    let mut default = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if default.is_some() {
                    return Err(meta.error("duplicate `default` handler"));
                }
                default = Some(meta.value()?.parse::<Expr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported variant attribute, expected `default`"))
            }
        })?;
    }
    Ok(default)
}
