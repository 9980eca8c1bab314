use super::constraint::InlineConstraintResolver;
use super::template::{RouteTemplate, compose};
use super::{Route, RouteEntry};
use crate::controller::ActionDescriptor;
use crate::error::{Result, RoutingError};
use std::sync::Arc;

/// Everything a factory gets to build one route for one prefix
pub struct DirectRouteFactoryContext<'a> {
    pub prefix: Option<&'a str>,
    pub actions: &'a [Arc<ActionDescriptor>],
    pub constraint_resolver: &'a dyn InlineConstraintResolver,
    pub target_is_action: bool,
}

impl<'a> DirectRouteFactoryContext<'a> {
    pub fn new(
        prefix: Option<&'a str>,
        actions: &'a [Arc<ActionDescriptor>],
        constraint_resolver: &'a dyn InlineConstraintResolver,
        target_is_action: bool,
    ) -> Self {
        Self {
            prefix,
            actions,
            constraint_resolver,
            target_is_action,
        }
    }

    /// Prefix `template`, parse it, resolve its constraints and attach the
    /// context's actions.
    pub fn build_route(&self, template: &str) -> Result<Route> {
        let composed = compose(self.prefix, template);
        let template = RouteTemplate::parse(&composed)?;
        let constraints = template.resolve_constraints(self.constraint_resolver);
        Ok(Route::new(template)
            .with_constraints(constraints)
            .with_actions(self.actions.to_vec(), self.target_is_action))
    }
}

/// Builds a route entry for one prefix.
///
/// `Ok(None)` means the factory produced nothing, which the provider
/// treats as an error.
pub trait DirectRouteFactory: Send + Sync {
    fn create_route(&self, context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>>;
}

impl<F> DirectRouteFactory for F
where
    F: Fn(&DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> + Send + Sync,
{
    fn create_route(&self, context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        self(context)
    }
}

/// Factory for a declared route template such as `#[get("{id}")]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplateFactory {
    template: String,
    name: Option<String>,
    order: i32,
}

impl RouteTemplateFactory {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: None,
            order: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl DirectRouteFactory for RouteTemplateFactory {
    fn create_route(&self, context: &DirectRouteFactoryContext<'_>) -> Result<Option<RouteEntry>> {
        if self.template.starts_with('/') {
            return Err(RoutingError::InvalidTemplate {
                template: self.template.clone(),
                reason: "a route template cannot start with '/'".to_string(),
            });
        }
        let route = context.build_route(&self.template)?.with_order(self.order);
        Ok(Some(RouteEntry::new(self.name.clone(), route)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::DefaultInlineConstraintResolver;

    #[test]
    fn test_template_factory_prefixes_template() {
        let factory = RouteTemplateFactory::new("{id:int}").name("GetOrder").order(3);
        let context =
            DirectRouteFactoryContext::new(Some("v1/orders"), &[], &DefaultInlineConstraintResolver, true);

        let entry = factory.create_route(&context).unwrap().unwrap();
        assert_eq!(entry.template(), "v1/orders/{id:int}");
        assert_eq!(entry.name.as_deref(), Some("GetOrder"));
        assert_eq!(entry.route.order(), 3);
        assert!(entry.route.target_is_action());
        assert!(entry.route.handler().is_none());
        assert_eq!(entry.route.constraints_for("id").count(), 1);
    }

    #[test]
    fn test_template_factory_rejects_leading_slash() {
        let factory = RouteTemplateFactory::new("/{id}");
        let context = DirectRouteFactoryContext::new(None, &[], &DefaultInlineConstraintResolver, false);
        assert!(matches!(
            factory.create_route(&context),
            Err(RoutingError::InvalidTemplate { .. })
        ));
    }
}
