//! # Multiprefix
//!
//! Multiple route prefixes per controller for axum applications.
//!
//! A controller may declare any number of route prefixes. Every route of
//! the controller, whether declared on an action or on the controller
//! itself, is registered once per prefix. Malformed prefixes and
//! handler-bearing routes fail the route table build, never a request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multiprefix::prelude::*;
//!
//! #[controller]
//! #[route_prefix("v1/orders")]
//! #[route_prefix("v2/orders", order = 1)]
//! pub struct OrdersController;
//!
//! #[actions]
//! impl OrdersController {
//!     #[get("{id:int}", name = "GetOrder")]
//!     async fn get_order(&self, #[param] id: u32) -> String {
//!         format!("order {id}")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let table = RouteTable::builder()
//!         .config(RoutingConfig::from_env()?.allow_duplicate_names(true))
//!         .mount(Arc::new(OrdersController))
//!         .build()?;
//!
//!     // GET /v1/orders/{id} and GET /v2/orders/{id}
//!     let app: Router = table.into_router();
//!     // Serve your app...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod prefix;
pub mod provider;
pub mod route;
pub mod table;

// Re-export core types
pub use config::{ConfigService, RoutingConfig};
pub use controller::{ActionDescriptor, Actions, Controller, ControllerDescriptor};
pub use error::{Result, RoutingError};
pub use prefix::{RoutePrefix, collect_prefixes};
pub use provider::{
    DirectRouteProvider, MultiplePrefixDirectRouteProvider, expand_routes, validate_route_entry,
};
pub use route::{
    DirectRouteFactory, DirectRouteFactoryContext, InlineConstraintResolver, Route, RouteEntry,
    RouteTemplateFactory,
};
pub use table::{RouteTable, RouteTableBuilder};

// Re-export macros
pub use multiprefix_macro::{
    actions, body, controller, delete, get, param, patch, post, put, query, route, route_prefix,
};

pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use multiprefix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, RoutingConfig};
    pub use crate::controller::{ActionDescriptor, Actions, Controller, ControllerDescriptor};
    pub use crate::error::{Result, RoutingError};
    pub use crate::prefix::RoutePrefix;
    pub use crate::provider::{DirectRouteProvider, MultiplePrefixDirectRouteProvider};
    pub use crate::route::{
        DefaultInlineConstraintResolver, DirectRouteFactory, DirectRouteFactoryContext,
        InlineConstraintResolver, RouteEntry, RouteTemplateFactory,
    };
    pub use crate::table::{RouteTable, RouteTableBuilder};
    pub use crate::{
        actions, body, controller, delete, get, param, patch, post, put, query, route,
        route_prefix,
    };
    pub use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
