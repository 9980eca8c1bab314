use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, Attribute, Expr, LitStr, Meta, Token};

/// `#[route_prefix("v1/orders")]` or `#[route_prefix("v1/orders", order = 1)]`
pub struct RoutePrefixArgs {
    pub prefix: LitStr,
    pub order: Option<Expr>,
}

impl Parse for RoutePrefixArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let prefix: LitStr = input.parse()?;
        let mut order = None;
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "order" {
                order = Some(input.parse()?);
            } else {
                return Err(syn::Error::new(name.span(), "expected `order`"));
            }
        }
        Ok(RoutePrefixArgs { prefix, order })
    }
}

impl RoutePrefixArgs {
    pub fn to_tokens(&self) -> TokenStream2 {
        let prefix = &self.prefix;
        let order = self
            .order
            .as_ref()
            .map(|o| quote! { #o })
            .unwrap_or_else(|| quote! { 0 });
        quote! { ::multiprefix::RoutePrefix::with_order(#prefix, #order) }
    }
}

/// `#[route("{id}")]`, `#[get("{id}", name = "GetOrder", order = 2)]` or a bare `#[get]`
#[derive(Default)]
pub struct RouteArgs {
    pub template: Option<LitStr>,
    pub name: Option<LitStr>,
    pub order: Option<Expr>,
}

impl Parse for RouteArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = RouteArgs::default();
        if input.peek(LitStr) {
            args.template = Some(input.parse()?);
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "name" {
                args.name = Some(input.parse()?);
            } else if name == "order" {
                args.order = Some(input.parse()?);
            } else {
                return Err(syn::Error::new(name.span(), "expected `name` or `order`"));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(args)
    }
}

impl RouteArgs {
    pub fn from_attribute(attr: &Attribute) -> syn::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(RouteArgs::default()),
            _ => attr.parse_args(),
        }
    }

    /// `None` when the attribute declares no template
    pub fn factory_tokens(&self) -> Option<TokenStream2> {
        let template = self.template.as_ref()?;
        let name = self.name.as_ref().map(|n| quote! { .name(#n) });
        let order = self.order.as_ref().map(|o| quote! { .order(#o) });
        Some(quote! {
            ::std::sync::Arc::new(
                ::multiprefix::RouteTemplateFactory::new(#template) #name #order
            ) as ::std::sync::Arc<dyn ::multiprefix::DirectRouteFactory>
        })
    }
}
