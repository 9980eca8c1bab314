//! Route table construction.
//!
//! The builder is the explicit registration step: controllers are added
//! with their actions, then `build` asks the provider for every direct
//! route and merges the results into one table. Any error aborts the build.

mod router;

use crate::config::RoutingConfig;
use crate::controller::{ActionDescriptor, Actions, ControllerDescriptor};
use crate::error::{Result, RoutingError};
use crate::provider::{DirectRouteProvider, MultiplePrefixDirectRouteProvider};
use crate::route::{DefaultInlineConstraintResolver, InlineConstraintResolver, RouteEntry};
use std::collections::HashSet;
use std::sync::Arc;

/// The merged list of route entries, in registration order
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry registered under `name`
    pub fn find(&self, name: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|e| e.name.as_deref() == Some(name))
    }

    pub fn templates(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.template()).collect()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

struct ControllerRegistration {
    descriptor: Arc<ControllerDescriptor>,
    actions: Vec<Arc<ActionDescriptor>>,
}

/// Builder for [`RouteTable`]
///
/// # Example
/// ```rust,ignore
/// let table = RouteTable::builder()
///     .config(RoutingConfig::from_env()?)
///     .mount(Arc::new(OrdersController::new()))
///     .build()?;
///
/// let app = table.into_router();
/// ```
pub struct RouteTableBuilder {
    config: RoutingConfig,
    provider: Option<Arc<dyn DirectRouteProvider>>,
    constraint_resolver: Arc<dyn InlineConstraintResolver>,
    controllers: Vec<ControllerRegistration>,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self {
            config: RoutingConfig::default(),
            provider: None,
            constraint_resolver: Arc::new(DefaultInlineConstraintResolver),
            controllers: Vec::new(),
        }
    }

    pub fn config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default [`MultiplePrefixDirectRouteProvider`]
    pub fn provider(mut self, provider: Arc<dyn DirectRouteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn constraint_resolver(mut self, resolver: Arc<dyn InlineConstraintResolver>) -> Self {
        self.constraint_resolver = resolver;
        self
    }

    /// Register a controller and its actions
    pub fn controller<I>(mut self, descriptor: Arc<ControllerDescriptor>, actions: I) -> Self
    where
        I: IntoIterator<Item = ActionDescriptor>,
    {
        self.controllers.push(ControllerRegistration {
            descriptor,
            actions: actions.into_iter().map(Arc::new).collect(),
        });
        self
    }

    /// Register a controller generated by `#[controller]` and `#[actions]`
    pub fn mount<C: Actions>(self, controller: Arc<C>) -> Self {
        let descriptor = Arc::new(C::descriptor());
        let actions = C::actions(controller, &descriptor);
        self.controller(descriptor, actions)
    }

    pub fn build(self) -> Result<RouteTable> {
        let provider = self.provider.unwrap_or_else(|| {
            Arc::new(MultiplePrefixDirectRouteProvider::new(self.config)) as Arc<dyn DirectRouteProvider>
        });
        let resolver = self.constraint_resolver.as_ref();

        tracing::info!(
            "Building route table ({} controllers)",
            self.controllers.len()
        );

        let mut entries = Vec::new();
        for registration in &self.controllers {
            let descriptor = &registration.descriptor;
            let before = entries.len();

            let mut without_routes = Vec::new();
            for action in &registration.actions {
                if action.route_factories().is_empty() {
                    without_routes.push(action.clone());
                    continue;
                }
                let routes =
                    provider.action_direct_routes(action, action.route_factories(), resolver)?;
                entries.extend(routes);
            }

            // Controller-level routes only target actions without routes of their own
            if !descriptor.route_factories().is_empty() && !without_routes.is_empty() {
                let routes = provider.controller_direct_routes(
                    descriptor,
                    &without_routes,
                    descriptor.route_factories(),
                    resolver,
                )?;
                entries.extend(routes);
            }

            tracing::debug!(
                "Registered {} route(s) for {}",
                entries.len() - before,
                descriptor.type_name()
            );
        }

        if !self.config.allow_duplicate_names {
            check_unique_names(&entries)?;
        }
        check_path_conflicts(&entries)?;

        tracing::info!("Route table complete ({} routes)", entries.len());
        Ok(RouteTable { entries })
    }
}

fn check_unique_names(entries: &[RouteEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in entries.iter().filter_map(|e| e.name.as_deref()) {
        if !seen.insert(name) {
            tracing::error!("Route name '{}' registered twice", name);
            return Err(RoutingError::DuplicateRouteName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(PartialEq)]
enum PathToken<'a> {
    Char(char),
    Param(&'a str),
}

fn tokenize(path: &str) -> Vec<PathToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = path;
    while let Some(c) = rest.chars().next() {
        if c == '{' {
            if let Some(end) = rest.find('}') {
                tokens.push(PathToken::Param(&rest[1..end]));
                rest = &rest[end + 1..];
                continue;
            }
        }
        tokens.push(PathToken::Char(c));
        rest = &rest[c.len_utf8()..];
    }
    tokens
}

/// Two mounted paths that put differently named parameters at the same
/// position can not share axum's matcher. Identical paths are merged.
fn check_path_conflicts(entries: &[RouteEntry]) -> Result<()> {
    let mut paths: Vec<String> = Vec::new();
    for entry in entries {
        let path = entry.route.template().axum_path();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    let tokenized: Vec<_> = paths.iter().map(|p| tokenize(p)).collect();
    for (i, path) in tokenized.iter().enumerate() {
        for (j, existing) in tokenized[..i].iter().enumerate() {
            let diverge = path.iter().zip(existing).find(|(a, b)| a != b);
            if let Some((PathToken::Param(_), PathToken::Param(_))) = diverge {
                tracing::error!("Route '{}' conflicts with '{}'", paths[i], paths[j]);
                return Err(RoutingError::RouteConflict {
                    path: paths[i].clone(),
                    existing: paths[j].clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::RoutePrefix;
    use crate::route::RouteTemplateFactory;
    use axum::http::Method;

    fn orders() -> Arc<ControllerDescriptor> {
        Arc::new(
            ControllerDescriptor::new("shop::OrdersController")
                .prefix(RoutePrefix::new("v1/orders"))
                .prefix(RoutePrefix::new("v2/orders")),
        )
    }

    #[test]
    fn test_build_merges_action_routes() {
        let controller = orders();
        let table = RouteTable::builder()
            .controller(
                controller.clone(),
                [
                    ActionDescriptor::new(controller.clone(), "list", Method::GET).route(""),
                    ActionDescriptor::new(controller, "get", Method::GET).route("{id}"),
                ],
            )
            .build()
            .unwrap();

        assert_eq!(
            table.templates(),
            vec!["v1/orders", "v2/orders", "v1/orders/{id}", "v2/orders/{id}"]
        );
    }

    #[test]
    fn test_controller_routes_target_actions_without_routes() {
        let controller = Arc::new(
            ControllerDescriptor::new("HealthController")
                .prefix(RoutePrefix::new("health"))
                .route("{check}"),
        );
        let table = RouteTable::builder()
            .controller(
                controller.clone(),
                [
                    ActionDescriptor::new(controller.clone(), "check", Method::GET),
                    ActionDescriptor::new(controller, "live", Method::GET).route("live"),
                ],
            )
            .build()
            .unwrap();

        assert_eq!(table.templates(), vec!["health/live", "health/{check}"]);
        let controller_entry = &table.entries()[1];
        assert!(!controller_entry.route.target_is_action());
        assert_eq!(controller_entry.route.actions()[0].name(), "check");
    }

    #[test]
    fn test_invalid_prefix_registers_nothing() {
        let controller = Arc::new(
            ControllerDescriptor::new("OrdersController").prefix(RoutePrefix::new("orders/")),
        );
        let result = RouteTable::builder()
            .controller(
                controller.clone(),
                [ActionDescriptor::new(controller, "get", Method::GET).route("{id}")],
            )
            .build();
        assert!(matches!(result, Err(RoutingError::InvalidPrefix { .. })));
    }

    #[test]
    fn test_duplicate_names() {
        let controller = orders();
        let action = ActionDescriptor::new(controller.clone(), "get", Method::GET).factory(Arc::new(
            RouteTemplateFactory::new("{id}").name("GetOrder"),
        ));

        let result = RouteTable::builder()
            .controller(controller.clone(), [action.clone()])
            .build();
        assert!(matches!(
            result,
            Err(RoutingError::DuplicateRouteName { ref name }) if name == "GetOrder"
        ));

        let table = RouteTable::builder()
            .config(RoutingConfig::default().allow_duplicate_names(true))
            .controller(controller, [action])
            .build()
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.find("GetOrder").unwrap().template(), "v1/orders/{id}");
    }

    #[test]
    fn test_differently_named_parameters_conflict() {
        let controller = Arc::new(
            ControllerDescriptor::new("OrdersController").prefix(RoutePrefix::new("v1/orders")),
        );
        let result = RouteTable::builder()
            .controller(
                controller.clone(),
                [
                    ActionDescriptor::new(controller.clone(), "by_id", Method::GET)
                        .route("{id:int}"),
                    ActionDescriptor::new(controller, "by_slug", Method::GET)
                        .route("{slug:alpha}"),
                ],
            )
            .build();

        match result {
            Err(RoutingError::RouteConflict { path, existing }) => {
                assert_eq!(path, "/v1/orders/{slug}");
                assert_eq!(existing, "/v1/orders/{id}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_shared_and_static_paths_do_not_conflict() {
        let controller = orders();
        let table = RouteTable::builder()
            .controller(
                controller.clone(),
                [
                    ActionDescriptor::new(controller.clone(), "get", Method::GET).route("{id}"),
                    ActionDescriptor::new(controller.clone(), "delete", Method::DELETE)
                        .route("{id}"),
                    ActionDescriptor::new(controller.clone(), "new", Method::GET).route("new"),
                    ActionDescriptor::new(controller, "items", Method::GET).route("{id}/items"),
                ],
            )
            .build()
            .unwrap();

        let mut count = 0;
        for entry in &table {
            assert!(entry.template().starts_with("v"));
            count += 1;
        }
        assert_eq!(count, 8);
    }
}
