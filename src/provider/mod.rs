//! Direct route providers: the extension point that turns controller and
//! action metadata into route entries.

use crate::config::RoutingConfig;
use crate::controller::{ActionDescriptor, ControllerDescriptor};
use crate::error::{Result, RoutingError};
use crate::prefix::collect_prefixes;
use crate::route::{
    DirectRouteFactory, DirectRouteFactoryContext, InlineConstraintResolver, RouteEntry,
};
use std::sync::Arc;

/// Produces the direct routes of an action or a whole controller
pub trait DirectRouteProvider: Send + Sync {
    /// Routes declared on a single action
    fn action_direct_routes(
        &self,
        action: &Arc<ActionDescriptor>,
        factories: &[Arc<dyn DirectRouteFactory>],
        constraint_resolver: &dyn InlineConstraintResolver,
    ) -> Result<Vec<RouteEntry>>;

    /// Routes declared on the controller, targeting all of `actions`
    fn controller_direct_routes(
        &self,
        controller: &ControllerDescriptor,
        actions: &[Arc<ActionDescriptor>],
        factories: &[Arc<dyn DirectRouteFactory>],
        constraint_resolver: &dyn InlineConstraintResolver,
    ) -> Result<Vec<RouteEntry>>;
}

/// Registers every route of a controller once per declared prefix
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplePrefixDirectRouteProvider {
    config: RoutingConfig,
}

impl MultiplePrefixDirectRouteProvider {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn direct_routes(
        &self,
        controller: &ControllerDescriptor,
        actions: &[Arc<ActionDescriptor>],
        factories: &[Arc<dyn DirectRouteFactory>],
        constraint_resolver: &dyn InlineConstraintResolver,
        target_is_action: bool,
    ) -> Result<Vec<RouteEntry>> {
        let prefixes = collect_prefixes(controller, &self.config)?;
        expand_routes(
            &prefixes,
            factories,
            actions,
            constraint_resolver,
            target_is_action,
        )
    }
}

impl DirectRouteProvider for MultiplePrefixDirectRouteProvider {
    fn action_direct_routes(
        &self,
        action: &Arc<ActionDescriptor>,
        factories: &[Arc<dyn DirectRouteFactory>],
        constraint_resolver: &dyn InlineConstraintResolver,
    ) -> Result<Vec<RouteEntry>> {
        self.direct_routes(
            action.controller(),
            std::slice::from_ref(action),
            factories,
            constraint_resolver,
            true,
        )
    }

    fn controller_direct_routes(
        &self,
        controller: &ControllerDescriptor,
        actions: &[Arc<ActionDescriptor>],
        factories: &[Arc<dyn DirectRouteFactory>],
        constraint_resolver: &dyn InlineConstraintResolver,
    ) -> Result<Vec<RouteEntry>> {
        self.direct_routes(controller, actions, factories, constraint_resolver, false)
    }
}

/// Build one entry per (prefix, factory) pair, prefix-major.
///
/// The first invalid entry aborts the expansion and nothing is returned.
pub fn expand_routes(
    prefixes: &[Option<String>],
    factories: &[Arc<dyn DirectRouteFactory>],
    actions: &[Arc<ActionDescriptor>],
    constraint_resolver: &dyn InlineConstraintResolver,
    target_is_action: bool,
) -> Result<Vec<RouteEntry>> {
    let mut entries = Vec::with_capacity(prefixes.len() * factories.len());
    for prefix in prefixes {
        for factory in factories {
            let context = DirectRouteFactoryContext::new(
                prefix.as_deref(),
                actions,
                constraint_resolver,
                target_is_action,
            );
            let entry = factory.create_route(&context)?;
            entries.push(validate_route_entry(entry)?);
        }
    }
    Ok(entries)
}

/// Reject missing entries and entries whose route carries a custom handler
pub fn validate_route_entry(entry: Option<RouteEntry>) -> Result<RouteEntry> {
    let entry = entry.ok_or(RoutingError::NullRouteEntry)?;
    if entry.route.handler().is_some() {
        tracing::error!("Route '{}' carries a custom handler", entry.template());
        return Err(RoutingError::HandlerNotSupported {
            template: entry.template().to_string(),
        });
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::RoutePrefix;
    use crate::route::{
        DefaultInlineConstraintResolver, Route, RouteTemplate, RouteTemplateFactory,
    };
    use axum::http::Method;

    fn factories(templates: &[&str]) -> Vec<Arc<dyn DirectRouteFactory>> {
        templates
            .iter()
            .map(|t| Arc::new(RouteTemplateFactory::new(*t)) as Arc<dyn DirectRouteFactory>)
            .collect()
    }

    fn templates(entries: &[RouteEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.template()).collect()
    }

    fn null_factory(_: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        Ok(None)
    }

    fn handler_factory(context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        let route = context
            .build_route("special")?
            .with_handler(axum::routing::get(|| async { "custom" }));
        Ok(Some(RouteEntry::new(None, route)))
    }

    #[test]
    fn test_expand_is_prefix_major() {
        let prefixes = vec![Some("v1".to_string()), Some("v2".to_string())];
        let entries = expand_routes(
            &prefixes,
            &factories(&["a", "b", "c"]),
            &[],
            &DefaultInlineConstraintResolver,
            false,
        )
        .unwrap();
        assert_eq!(
            templates(&entries),
            vec!["v1/a", "v1/b", "v1/c", "v2/a", "v2/b", "v2/c"]
        );
    }

    #[test]
    fn test_expand_without_factories_is_empty() {
        let entries = expand_routes(
            &[None],
            &[],
            &[],
            &DefaultInlineConstraintResolver,
            true,
        )
        .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_null_entry_fails() {
        let factories: Vec<Arc<dyn DirectRouteFactory>> = vec![Arc::new(null_factory)];
        let err = expand_routes(&[None], &factories, &[], &DefaultInlineConstraintResolver, true)
            .unwrap_err();
        assert!(matches!(err, RoutingError::NullRouteEntry));
    }

    #[test]
    fn test_handler_aborts_whole_expansion() {
        let mut all = factories(&["{id}"]);
        all.push(Arc::new(handler_factory));
        let prefixes = vec![Some("v1".to_string()), Some("v2".to_string())];

        let result = expand_routes(&prefixes, &all, &[], &DefaultInlineConstraintResolver, true);
        match result {
            Err(RoutingError::HandlerNotSupported { template }) => assert_eq!(template, "v1/special"),
            other => panic!("expected HandlerNotSupported, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_route_entry_accepts_plain_route() {
        let route = Route::new(RouteTemplate::parse("orders").unwrap());
        let entry = validate_route_entry(Some(RouteEntry::new(Some("n".into()), route))).unwrap();
        assert_eq!(entry.name.as_deref(), Some("n"));
    }

    #[test]
    fn test_action_and_controller_call_sites() {
        let controller = Arc::new(
            ControllerDescriptor::new("OrdersController")
                .prefix(RoutePrefix::new("v1/orders"))
                .prefix(RoutePrefix::new("v2/orders")),
        );
        let action = Arc::new(ActionDescriptor::new(controller.clone(), "get", Method::GET));
        let provider = MultiplePrefixDirectRouteProvider::default();

        let entries = provider
            .action_direct_routes(&action, &factories(&["{id}"]), &DefaultInlineConstraintResolver)
            .unwrap();
        assert_eq!(templates(&entries), vec!["v1/orders/{id}", "v2/orders/{id}"]);
        assert!(entries.iter().all(|e| e.route.target_is_action()));
        assert!(entries.iter().all(|e| e.route.actions().len() == 1));

        let actions = vec![action.clone(), action];
        let entries = provider
            .controller_direct_routes(
                &controller,
                &actions,
                &factories(&[""]),
                &DefaultInlineConstraintResolver,
            )
            .unwrap();
        assert_eq!(templates(&entries), vec!["v1/orders", "v2/orders"]);
        assert!(entries.iter().all(|e| !e.route.target_is_action()));
        assert!(entries.iter().all(|e| e.route.actions().len() == 2));
    }
}
