//! Routes and route entries produced by direct route factories.

mod constraint;
mod factory;
mod template;

pub use constraint::{
    BuiltinConstraint, DefaultInlineConstraintResolver, InlineConstraintResolver, RouteConstraint,
};
pub use factory::{DirectRouteFactory, DirectRouteFactoryContext, RouteTemplateFactory};
pub use template::{ParameterConstraint, RouteTemplate, TemplateSegment};

use crate::controller::ActionDescriptor;
use axum::routing::MethodRouter;
use std::fmt;
use std::sync::Arc;

/// A concrete route: its template, its parameter constraints and the actions
/// it dispatches to.
#[derive(Clone, Default)]
pub struct Route {
    template: RouteTemplate,
    constraints: Vec<ParameterConstraint>,
    actions: Vec<Arc<ActionDescriptor>>,
    target_is_action: bool,
    order: i32,
    handler: Option<MethodRouter>,
}

impl Route {
    pub fn new(template: RouteTemplate) -> Self {
        Self {
            template,
            ..Default::default()
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<ParameterConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_actions(mut self, actions: Vec<Arc<ActionDescriptor>>, target_is_action: bool) -> Self {
        self.actions = actions;
        self.target_is_action = target_is_action;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Attach a custom handler that bypasses action selection.
    ///
    /// Routes with a handler are rejected by the multiple prefix provider.
    pub fn with_handler(mut self, handler: MethodRouter) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    pub fn constraints(&self) -> &[ParameterConstraint] {
        &self.constraints
    }

    /// Constraints attached to one parameter, in declaration order
    pub fn constraints_for<'a>(
        &'a self,
        parameter: &'a str,
    ) -> impl Iterator<Item = &'a ParameterConstraint> + 'a {
        self.constraints
            .iter()
            .filter(move |c| c.parameter == parameter)
    }

    pub fn actions(&self) -> &[Arc<ActionDescriptor>] {
        &self.actions
    }

    pub fn target_is_action(&self) -> bool {
        self.target_is_action
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn handler(&self) -> Option<&MethodRouter> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.template.as_str())
            .field("constraints", &self.constraints)
            .field(
                "actions",
                &self.actions.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("target_is_action", &self.target_is_action)
            .field("order", &self.order)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// A route plus its optional name, ready to be merged into a route table
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub name: Option<String>,
    pub route: Route,
}

impl RouteEntry {
    pub fn new(name: Option<String>, route: Route) -> Self {
        Self { name, route }
    }

    pub fn template(&self) -> &str {
        self.route.template.as_str()
    }
}
