use super::ControllerDescriptor;
use crate::route::{DirectRouteFactory, RouteTemplateFactory};
use axum::http::Method;
use axum::routing::MethodRouter;
use std::fmt;
use std::sync::Arc;

/// One routed method of a controller
#[derive(Clone)]
pub struct ActionDescriptor {
    name: String,
    controller: Arc<ControllerDescriptor>,
    method: Method,
    factories: Vec<Arc<dyn DirectRouteFactory>>,
    endpoint: Option<MethodRouter>,
}

impl ActionDescriptor {
    pub fn new(controller: Arc<ControllerDescriptor>, name: impl Into<String>, method: Method) -> Self {
        Self {
            name: name.into(),
            controller,
            method,
            factories: Vec::new(),
            endpoint: None,
        }
    }

    /// Add an action-level route factory
    pub fn factory(mut self, factory: Arc<dyn DirectRouteFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn route(self, template: impl Into<String>) -> Self {
        self.factory(Arc::new(RouteTemplateFactory::new(template)))
    }

    /// The axum handler serving this action once its routes are mounted
    pub fn endpoint(mut self, endpoint: MethodRouter) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> &Arc<ControllerDescriptor> {
        &self.controller
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn route_factories(&self) -> &[Arc<dyn DirectRouteFactory>] {
        &self.factories
    }

    pub fn method_router(&self) -> Option<&MethodRouter> {
        self.endpoint.as_ref()
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("controller", &self.controller.type_name())
            .field("method", &self.method)
            .field("factories", &self.factories.len())
            .field("has_endpoint", &self.endpoint.is_some())
            .finish()
    }
}
