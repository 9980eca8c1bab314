use crate::args::RouteArgs;
use crate::http_methods::{is_http_method_attr, HTTP_METHODS};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, FnArg, ImplItem, ItemImpl};

#[derive(Clone)]
enum ParamKind {
    Body,
    Param,
    Query,
    Raw,
}

struct ParamInfo {
    ty: syn::Type,
    kind: ParamKind,
}

struct ActionInfo {
    method: String,
    fn_name: syn::Ident,
    routes: Vec<RouteArgs>,
    params: Vec<ParamInfo>,
}

pub fn actions_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    match generate_actions_impl(input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn generate_actions_impl(input: ItemImpl) -> syn::Result<TokenStream2> {
    let mut actions: Vec<ActionInfo> = Vec::new();
    let mut clean_items: Vec<ImplItem> = Vec::new();

    for item in input.items.iter() {
        if let ImplItem::Fn(method) = item {
            if let Some(action) = extract_action_info(method)? {
                actions.push(action);
                let mut clean_method = method.clone();
                clean_method.attrs.retain(|attr| !is_http_method_attr(attr));
                for input in clean_method.sig.inputs.iter_mut() {
                    if let FnArg::Typed(pat_type) = input {
                        pat_type.attrs.retain(|attr| !is_param_attr(attr));
                    }
                }
                clean_items.push(ImplItem::Fn(clean_method));
                continue;
            }
        }
        clean_items.push(item.clone());
    }

    let descriptors = actions.iter().map(|action| {
        let method_fn = format_ident!("{}", action.method.to_lowercase());
        let method_const = format_ident!("{}", action.method);
        let fn_name = &action.fn_name;
        let action_name = fn_name.to_string();

        let extractor_patterns: Vec<_> = action
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let temp_ident = format_ident!("__p_{}", i);
                let ty = &p.ty;
                match p.kind {
                    ParamKind::Body => quote! { ::multiprefix::axum::Json(#temp_ident): ::multiprefix::axum::Json<#ty> },
                    ParamKind::Param => quote! { ::multiprefix::axum::extract::Path(#temp_ident): ::multiprefix::axum::extract::Path<#ty> },
                    ParamKind::Query => quote! { ::multiprefix::axum::extract::Query(#temp_ident): ::multiprefix::axum::extract::Query<#ty> },
                    ParamKind::Raw => quote! { #temp_ident: #ty },
                }
            })
            .collect();

        let internal_args: Vec<_> = (0..action.params.len())
            .map(|i| format_ident!("__p_{}", i))
            .collect();

        let factories = action.routes.iter().filter_map(RouteArgs::factory_tokens);

        quote! {
            ::multiprefix::ActionDescriptor::new(
                ::std::sync::Arc::clone(descriptor),
                #action_name,
                ::multiprefix::axum::http::Method::#method_const,
            )
            #(.factory(#factories))*
            .endpoint(::multiprefix::axum::routing::#method_fn({
                let controller = ::std::sync::Arc::clone(&controller);
                move |#(#extractor_patterns),*| {
                    let controller = ::std::sync::Arc::clone(&controller);
                    async move {
                        use ::multiprefix::axum::response::IntoResponse;
                        controller.#fn_name(#(#internal_args),*).await.into_response()
                    }
                }
            }))
        }
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #self_ty #where_clause {
            #(#clean_items)*
        }

        impl #impl_generics ::multiprefix::Actions for #self_ty #where_clause {
            fn actions(
                controller: ::std::sync::Arc<Self>,
                descriptor: &::std::sync::Arc<::multiprefix::ControllerDescriptor>,
            ) -> ::std::vec::Vec<::multiprefix::ActionDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

fn extract_action_info(method: &syn::ImplItemFn) -> syn::Result<Option<ActionInfo>> {
    let mut http_method: Option<String> = None;
    let mut routes = Vec::new();

    for attr in &method.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let name = ident.to_string();
        if !HTTP_METHODS.contains(&name.as_str()) {
            continue;
        }
        let verb = name.to_uppercase();
        match &http_method {
            Some(existing) if *existing != verb => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "all route attributes of one action must use the same HTTP method",
                ));
            }
            _ => http_method = Some(verb),
        }
        let route = RouteArgs::from_attribute(attr)?;
        if route.template.is_none() && (route.name.is_some() || route.order.is_some()) {
            return Err(syn::Error::new_spanned(
                attr,
                "`name` and `order` need a route template",
            ));
        }
        routes.push(route);
    }
    let Some(http_method) = http_method else {
        return Ok(None);
    };

    let mut params = Vec::new();
    for input in method.sig.inputs.iter() {
        if let FnArg::Typed(pat_type) = input {
            let ty = (*pat_type.ty).clone();
            let kind = get_param_kind(&pat_type.attrs);
            params.push(ParamInfo { ty, kind });
        }
    }
    Ok(Some(ActionInfo {
        method: http_method,
        fn_name: method.sig.ident.clone(),
        routes,
        params,
    }))
}

fn get_param_kind(attrs: &[Attribute]) -> ParamKind {
    for attr in attrs {
        if let Some(ident) = attr.path().get_ident() {
            match ident.to_string().as_str() {
                "body" => return ParamKind::Body,
                "param" => return ParamKind::Param,
                "query" => return ParamKind::Query,
                _ => {}
            }
        }
    }
    ParamKind::Raw
}

fn is_param_attr(attr: &Attribute) -> bool {
    attr.path().get_ident().map_or(false, |ident| {
        ["body", "param", "query"].contains(&ident.to_string().as_str())
    })
}
