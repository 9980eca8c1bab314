//! Prefix declarations and their collection.

use crate::config::RoutingConfig;
use crate::controller::ControllerDescriptor;
use crate::error::{Result, RoutingError};

/// A route prefix declared on a controller.
///
/// Any number of these can be attached to one controller. `order` is kept
/// for consumers that want a precedence among prefixes; expansion itself
/// keeps declaration order. Nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePrefix {
    prefix: Option<String>,
    order: i32,
}

impl RoutePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_order(prefix, 0)
    }

    pub fn with_order(prefix: impl Into<String>, order: i32) -> Self {
        Self {
            prefix: Some(prefix.into()),
            order,
        }
    }

    /// A declaration without a prefix value. Rejected at expansion time.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn order(&self) -> i32 {
        self.order
    }
}

/// Collect the prefixes a controller's routes are registered under.
///
/// No declarations yields `[None]`, i.e. the routes are registered
/// unprefixed. Declaration order is kept and duplicates are not removed.
pub fn collect_prefixes(
    controller: &ControllerDescriptor,
    config: &RoutingConfig,
) -> Result<Vec<Option<String>>> {
    let mut prefixes = Vec::with_capacity(controller.route_prefixes().len());
    for declaration in controller.route_prefixes() {
        let prefix = validate_prefix(declaration.prefix(), controller, config)?;
        prefixes.push(Some(prefix.to_string()));
    }
    if prefixes.is_empty() {
        prefixes.push(None);
    }
    tracing::debug!(
        "Collected {} prefix(es) for {}",
        prefixes.len(),
        controller.type_name()
    );
    Ok(prefixes)
}

/// Check a single declared prefix against `controller`'s rules
pub fn validate_prefix<'a>(
    prefix: Option<&'a str>,
    controller: &ControllerDescriptor,
    config: &RoutingConfig,
) -> Result<&'a str> {
    let Some(prefix) = prefix else {
        tracing::error!("Null route prefix on {}", controller.type_name());
        return Err(RoutingError::NullPrefix {
            controller: controller.type_name().to_string(),
        });
    };
    if prefix.ends_with('/') {
        tracing::error!("Invalid route prefix '{}' on {}", prefix, controller.name());
        return Err(RoutingError::InvalidPrefix {
            prefix: prefix.to_string(),
            controller: controller.name().to_string(),
        });
    }
    if prefix.is_empty() && config.reject_empty_prefixes {
        tracing::error!("Empty route prefix on {}", controller.name());
        return Err(RoutingError::EmptyPrefix {
            controller: controller.name().to_string(),
        });
    }
    Ok(prefix)
}
