use std::fmt;
use std::sync::Arc;

/// A check applied to a single route parameter value
pub trait RouteConstraint: fmt::Debug + Send + Sync + 'static {
    fn matches(&self, value: &str) -> bool;
}

/// Turns the inline text after `:` in `{id:int}` into a [`RouteConstraint`].
///
/// The resolver is handed to every route factory untouched. Returning `None`
/// leaves the constraint to the host.
pub trait InlineConstraintResolver: Send + Sync {
    fn resolve_constraint(&self, inline: &str) -> Option<Arc<dyn RouteConstraint>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinConstraint {
    Int,
    Alpha,
    Bool,
    Guid,
    Min(i64),
    Max(i64),
    Length(usize),
}

impl RouteConstraint for BuiltinConstraint {
    fn matches(&self, value: &str) -> bool {
        match self {
            BuiltinConstraint::Int => value.parse::<i64>().is_ok(),
            BuiltinConstraint::Alpha => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
            }
            BuiltinConstraint::Bool => value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false"),
            BuiltinConstraint::Guid => is_guid(value),
            BuiltinConstraint::Min(min) => value.parse::<i64>().is_ok_and(|v| v >= *min),
            BuiltinConstraint::Max(max) => value.parse::<i64>().is_ok_and(|v| v <= *max),
            BuiltinConstraint::Length(len) => value.chars().count() == *len,
        }
    }
}

fn is_guid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    let lengths = [8, 4, 4, 4, 12];
    groups.len() == lengths.len()
        && groups
            .iter()
            .zip(lengths)
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Resolves `int`, `alpha`, `bool`, `guid`, `min(n)`, `max(n)` and `length(n)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInlineConstraintResolver;

impl InlineConstraintResolver for DefaultInlineConstraintResolver {
    fn resolve_constraint(&self, inline: &str) -> Option<Arc<dyn RouteConstraint>> {
        let inline = inline.trim();
        let (name, arg) = match inline.split_once('(') {
            Some((name, rest)) => (name, Some(rest.strip_suffix(')')?)),
            None => (inline, None),
        };

        let constraint = match (name, arg) {
            ("int", None) => BuiltinConstraint::Int,
            ("alpha", None) => BuiltinConstraint::Alpha,
            ("bool", None) => BuiltinConstraint::Bool,
            ("guid", None) => BuiltinConstraint::Guid,
            ("min", Some(arg)) => BuiltinConstraint::Min(arg.trim().parse().ok()?),
            ("max", Some(arg)) => BuiltinConstraint::Max(arg.trim().parse().ok()?),
            ("length", Some(arg)) => BuiltinConstraint::Length(arg.trim().parse().ok()?),
            _ => return None,
        };
        Some(Arc::new(constraint))
    }
}
