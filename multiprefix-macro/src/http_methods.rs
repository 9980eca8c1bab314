use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute};

pub const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

pub fn http_method_attribute(method: &str, _attr: TokenStream, item: TokenStream) -> TokenStream {
    // Only meaningful inside an #[actions] impl block, which strips it first
    let input = parse_macro_input!(item as syn::ImplItemFn);
    let message = format!("#[{method}] must be used on a method of an #[actions] impl block");
    TokenStream::from(quote! {
        ::core::compile_error!(#message);
        #input
    })
}

pub fn is_http_method_attr(attr: &Attribute) -> bool {
    attr.path()
        .get_ident()
        .map_or(false, |ident| HTTP_METHODS.contains(&ident.to_string().as_str()))
}
