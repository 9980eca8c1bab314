use crate::args::{RouteArgs, RoutePrefixArgs};
use darling::{ast::NestedMeta, FromMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

#[derive(Debug, Default, FromMeta)]
struct ControllerArgs {
    /// Controller whose prefix declarations are inherited
    #[darling(default)]
    base: Option<syn::Path>,
    /// Overrides the name used in error messages
    #[darling(default)]
    name: Option<String>,
}

pub fn controller_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(darling::Error::from(e).write_errors()),
    };
    let args = match ControllerArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };
    let input = parse_macro_input!(item as ItemStruct);
    match generate_controller_impl(&args, input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn generate_controller_impl(args: &ControllerArgs, mut input: ItemStruct) -> syn::Result<TokenStream2> {
    let mut prefixes = Vec::new();
    let mut factories = Vec::new();

    for attr in &input.attrs {
        if attr.path().is_ident("route_prefix") {
            prefixes.push(attr.parse_args::<RoutePrefixArgs>()?.to_tokens());
        } else if attr.path().is_ident("route") {
            let route = RouteArgs::from_attribute(attr)?;
            let factory = route
                .factory_tokens()
                .ok_or_else(|| syn::Error::new_spanned(attr, "#[route] needs a template"))?;
            factories.push(factory);
        }
    }
    input
        .attrs
        .retain(|attr| !attr.path().is_ident("route_prefix") && !attr.path().is_ident("route"));

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let inherited = match &args.base {
        Some(base) => quote! { <#base as ::multiprefix::Controller>::route_prefixes() },
        None => quote! { ::std::vec::Vec::new() },
    };
    let name_method = args.name.as_ref().map(|name| {
        quote! {
            fn controller_name() -> ::std::option::Option<&'static str> {
                ::std::option::Option::Some(#name)
            }
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::multiprefix::Controller for #struct_name #ty_generics #where_clause {
            fn route_prefixes() -> ::std::vec::Vec<::multiprefix::RoutePrefix> {
                let mut prefixes: ::std::vec::Vec<::multiprefix::RoutePrefix> = #inherited;
                let declared: ::std::vec::Vec<::multiprefix::RoutePrefix> = ::std::vec![#(#prefixes),*];
                prefixes.extend(declared);
                prefixes
            }

            fn route_factories() -> ::std::vec::Vec<::std::sync::Arc<dyn ::multiprefix::DirectRouteFactory>> {
                ::std::vec![#(#factories),*]
            }

            #name_method
        }
    })
}
