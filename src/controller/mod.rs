// Controllers are usually declared through macros:
// - #[controller] with stacked #[route_prefix("...")] and #[route("...")]
// - #[actions] on the impl block, with #[get], #[post], #[put], #[delete], #[patch]
//
// The macros generate:
// 1. Controller trait implementation carrying the prefix declarations
// 2. actions() method returning one ActionDescriptor per routed method

mod action;

pub use action::ActionDescriptor;

use crate::prefix::RoutePrefix;
use crate::route::{DirectRouteFactory, RouteTemplateFactory};
use std::fmt;
use std::sync::Arc;

/// Static metadata of a controller type: its identity, its prefix
/// declarations and the route factories declared on the controller itself.
#[derive(Clone)]
pub struct ControllerDescriptor {
    type_name: String,
    name: String,
    prefixes: Vec<RoutePrefix>,
    factories: Vec<Arc<dyn DirectRouteFactory>>,
}

impl ControllerDescriptor {
    /// `type_name` is the fully qualified type name. The controller name is
    /// its last path segment without a trailing `Controller`.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let name = controller_name(&type_name);
        Self {
            type_name,
            name,
            prefixes: Vec::new(),
            factories: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn prefix(mut self, prefix: RoutePrefix) -> Self {
        self.prefixes.push(prefix);
        self
    }

    pub fn prefixes<I>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = RoutePrefix>,
    {
        self.prefixes.extend(prefixes);
        self
    }

    /// Merge inherited declarations: the base's prefixes come first.
    pub fn inherit(mut self, base: &ControllerDescriptor) -> Self {
        let mut merged = base.prefixes.clone();
        merged.append(&mut self.prefixes);
        self.prefixes = merged;
        self
    }

    /// Add a controller-level route factory. Its routes target every action.
    pub fn factory(mut self, factory: Arc<dyn DirectRouteFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn route(self, template: impl Into<String>) -> Self {
        self.factory(Arc::new(RouteTemplateFactory::new(template)))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route_prefixes(&self) -> &[RoutePrefix] {
        &self.prefixes
    }

    pub fn route_factories(&self) -> &[Arc<dyn DirectRouteFactory>] {
        &self.factories
    }
}

impl fmt::Debug for ControllerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerDescriptor")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .field("prefixes", &self.prefixes)
            .field("factories", &self.factories.len())
            .finish()
    }
}

fn controller_name(type_name: &str) -> String {
    let simple = type_name.rsplit("::").next().unwrap_or(type_name);
    match simple.strip_suffix("Controller") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => simple.to_string(),
    }
}

/// Implemented by `#[controller]`.
///
/// The defaults describe a controller with no prefixes and no
/// controller-level routes.
pub trait Controller: Send + Sync + 'static {
    fn route_prefixes() -> Vec<RoutePrefix> {
        Vec::new()
    }

    fn route_factories() -> Vec<Arc<dyn DirectRouteFactory>> {
        Vec::new()
    }

    fn controller_name() -> Option<&'static str> {
        None
    }

    fn descriptor() -> ControllerDescriptor
    where
        Self: Sized,
    {
        let mut descriptor = ControllerDescriptor::new(std::any::type_name::<Self>())
            .prefixes(Self::route_prefixes());
        if let Some(name) = Self::controller_name() {
            descriptor = descriptor.with_name(name);
        }
        Self::route_factories()
            .into_iter()
            .fold(descriptor, |d, f| d.factory(f))
    }
}

/// Implemented by `#[actions]` on a controller's impl block
pub trait Actions: Controller + Sized {
    fn actions(
        controller: Arc<Self>,
        descriptor: &Arc<ControllerDescriptor>,
    ) -> Vec<ActionDescriptor>;
}
