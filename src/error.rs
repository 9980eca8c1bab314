use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoutingError>;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Prefix can not be null. Controller: {controller}")]
    NullPrefix { controller: String },

    #[error("Invalid prefix '{prefix}' in {controller}")]
    InvalidPrefix { prefix: String, controller: String },

    #[error("Empty prefix is not allowed in {controller}")]
    EmptyPrefix { controller: String },

    #[error("Direct route handler is not supported (route template: '{template}')")]
    HandlerNotSupported { template: String },

    #[error("Route factory returned no route entry")]
    NullRouteEntry,

    #[error("Invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Duplicate route name: {name}")]
    DuplicateRouteName { name: String },

    #[error("Route '{path}' conflicts with previously registered route '{existing}'")]
    RouteConflict { path: String, existing: String },

    #[error("Invalid configuration value for {key}: {value}")]
    Config { key: String, value: String },
}

impl RoutingError {
    /// A route factory produced nothing. Like every other variant this
    /// aborts the route table build; it only differs in origin.
    pub fn is_null_result(&self) -> bool {
        matches!(self, RoutingError::NullRouteEntry)
    }
}
