use proc_macro::TokenStream;

mod actions;
mod args;
mod controller;
mod http_methods;

/// Attribute macro declaring a controller and its route prefixes
///
/// Any number of `#[route_prefix]` attributes may follow. Every route of
/// the controller is registered once per prefix. `#[route]` attributes
/// declare controller-level routes, which target the actions that have no
/// route of their own.
///
/// # Example
/// ```ignore
/// use multiprefix::prelude::*;
///
/// #[controller(base = "ApiController", name = "Orders")]
/// #[route_prefix("v1/orders")]
/// #[route_prefix("v2/orders", order = 1)]
/// pub struct OrdersController {
///     repository: Arc<OrderRepository>,
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_attribute(attr, item)
}

/// Attribute macro turning the routed methods of an impl block into actions
///
/// # Example
/// ```ignore
/// #[actions]
/// impl OrdersController {
///     #[get("{id:int}", name = "GetOrder")]
///     async fn get_order(&self, #[param] id: u32) -> Json<Order> {
///         // ...
///     }
///
///     #[post]
///     async fn create(&self, #[body] order: NewOrder) -> StatusCode {
///         // ...
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn actions(attr: TokenStream, item: TokenStream) -> TokenStream {
    actions::actions_attribute(attr, item)
}

/// Route prefix declaration, consumed by `#[controller]`
#[proc_macro_attribute]
pub fn route_prefix(_attr: TokenStream, item: TokenStream) -> TokenStream {
    compile_error_with(item, "#[route_prefix] must be placed below #[controller]")
}

/// Controller-level route template, consumed by `#[controller]`
#[proc_macro_attribute]
pub fn route(_attr: TokenStream, item: TokenStream) -> TokenStream {
    compile_error_with(item, "#[route] must be placed below #[controller]")
}

/// HTTP GET method attribute for controller methods
#[proc_macro_attribute]
pub fn get(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("get", attr, item)
}

/// HTTP POST method attribute for controller methods
#[proc_macro_attribute]
pub fn post(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("post", attr, item)
}

/// HTTP PUT method attribute for controller methods
#[proc_macro_attribute]
pub fn put(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("put", attr, item)
}

/// HTTP DELETE method attribute for controller methods
#[proc_macro_attribute]
pub fn delete(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("delete", attr, item)
}

/// HTTP PATCH method attribute for controller methods
#[proc_macro_attribute]
pub fn patch(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("patch", attr, item)
}

/// Parameter attribute for request body (JSON)
/// Wraps the parameter with axum::Json extractor
#[proc_macro_attribute]
pub fn body(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Pass-through, actual handling is done by #[actions] macro
    item
}

/// Parameter attribute for path parameters
/// Wraps the parameter with axum::extract::Path extractor
#[proc_macro_attribute]
pub fn param(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Pass-through, actual handling is done by #[actions] macro
    item
}

/// Parameter attribute for query string parameters
/// Wraps the parameter with axum::extract::Query extractor
#[proc_macro_attribute]
pub fn query(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Pass-through, actual handling is done by #[actions] macro
    item
}

fn compile_error_with(item: TokenStream, message: &str) -> TokenStream {
    let item = proc_macro2::TokenStream::from(item);
    TokenStream::from(quote::quote! {
        ::core::compile_error!(#message);
        #item
    })
}
