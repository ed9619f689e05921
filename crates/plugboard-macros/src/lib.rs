//! # Plugboard Macros
//!
//! Procedural macros for registering types with the Plugboard type registry.
//!
//! ## Available Macros
//!
//! - `#[component]` - Register a struct as a constructible type

use darling::{ast::NestedMeta, FromMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, ItemStruct, Path, Token, Type};

/// Component attribute arguments.
#[derive(Debug, FromMeta)]
struct ComponentArgs {
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    capabilities: Option<String>,
    #[darling(default)]
    new: Option<Path>,
    #[darling(default)]
    try_new: Option<Path>,
    #[darling(default)]
    with_builder: Option<Path>,
    #[darling(default)]
    try_with_builder: Option<Path>,
}

/// Register a struct as a component.
///
/// Generates the `Component` and `Capability` implementations for the struct
/// and a load-time registration in the type registry of whichever binary or
/// shared library the struct is compiled into.
///
/// Arguments:
///
/// - `name`: registered type name, defaults to the struct name
/// - `capabilities`: comma-separated capability types the struct implements,
///   e.g. `"dyn Greeter, dyn Application"`; the struct itself is always one
/// - `new` / `try_new`: no-argument constructor returning `Self` or
///   `Result<Self, E>`
/// - `with_builder` / `try_with_builder`: constructor taking `&Builder`
///
/// Without any constructor the type is registered but cannot be built.
///
/// # Example
///
/// ```ignore
/// use plugboard_core::component;
///
/// #[component(
///     name = "EnglishGreeter",
///     capabilities = "dyn Greeter",
///     new = "EnglishGreeter::new"
/// )]
/// pub struct EnglishGreeter;
/// ```
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.to_compile_error()),
    };

    let args = match ComponentArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    let input = parse_macro_input!(item as ItemStruct);

    match expand_component(args, &input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn expand_component(args: ComponentArgs, input: &ItemStruct) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&input.generics, "components cannot be generic"));
    }
    if args.new.is_some() && args.try_new.is_some() {
        return Err(syn::Error::new_spanned(struct_name, "`new` and `try_new` are mutually exclusive"));
    }
    if args.with_builder.is_some() && args.try_with_builder.is_some() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "`with_builder` and `try_with_builder` are mutually exclusive",
        ));
    }

    let name = args.name.unwrap_or_else(|| struct_name.to_string());
    let capabilities = parse_capabilities(args.capabilities.as_deref(), struct_name)?;

    let object = quote! { ::plugboard_core::Object };
    let constructor = match (&args.new, &args.try_new) {
        (Some(path), _) => Some(quote! {
            .with_constructor(|| {
                let value: #struct_name = #path();
                ::std::result::Result::Ok(::std::sync::Arc::new(value) as #object)
            })
        }),
        (None, Some(path)) => Some(quote! {
            .with_constructor(|| {
                let value: #struct_name = #path()?;
                ::std::result::Result::Ok(::std::sync::Arc::new(value) as #object)
            })
        }),
        (None, None) => None,
    };
    let builder_constructor = match (&args.with_builder, &args.try_with_builder) {
        (Some(path), _) => Some(quote! {
            .with_builder_constructor(|builder: &::plugboard_core::Builder| {
                let value: #struct_name = #path(builder);
                ::std::result::Result::Ok(::std::sync::Arc::new(value) as #object)
            })
        }),
        (None, Some(path)) => Some(quote! {
            .with_builder_constructor(|builder: &::plugboard_core::Builder| {
                let value: #struct_name = #path(builder)?;
                ::std::result::Result::Ok(::std::sync::Arc::new(value) as #object)
            })
        }),
        (None, None) => None,
    };

    Ok(quote! {
        #input

        impl ::plugboard_core::Capability for #struct_name {
            const NAME: &'static str = #name;
        }

        impl ::plugboard_core::Component for #struct_name {
            const TYPE_NAME: &'static str = #name;

            fn capabilities() -> ::std::vec::Vec<::plugboard_core::CapabilityCast> {
                ::std::vec![
                    ::plugboard_core::capability_cast!(#struct_name => #struct_name),
                    #(::plugboard_core::capability_cast!(#struct_name => #capabilities),)*
                ]
            }
        }

        ::plugboard_core::__private::inventory::submit! {
            ::plugboard_core::TypeRegistration::new(|| {
                ::plugboard_core::TypeDescriptor::new(#name)
                    .with_capabilities(<#struct_name as ::plugboard_core::Component>::capabilities())
                    #constructor
                    #builder_constructor
            })
        }
    })
}

fn parse_capabilities(list: Option<&str>, struct_name: &syn::Ident) -> syn::Result<Vec<Type>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };

    let parsed = Punctuated::<Type, Token![,]>::parse_terminated
        .parse_str(list)
        .map_err(|e| syn::Error::new_spanned(struct_name, format!("invalid capabilities: {e}")))?;
    Ok(parsed.into_iter().collect())
}
