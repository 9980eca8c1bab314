use super::constraint::{InlineConstraintResolver, RouteConstraint};
use crate::error::{Result, RoutingError};
use std::sync::Arc;

/// One piece of a parsed route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Literal(String),
    Parameter {
        name: String,
        catch_all: bool,
        constraints: Vec<String>,
    },
}

/// A parsed route template such as `v1/orders/{id:int}`.
///
/// Templates never start with `/`; the leading slash is added when the
/// route is mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<TemplateSegment>,
}

/// A resolved (or unresolved) inline constraint on a template parameter
#[derive(Debug, Clone)]
pub struct ParameterConstraint {
    pub parameter: String,
    pub inline: String,
    pub constraint: Option<Arc<dyn RouteConstraint>>,
}

impl RouteTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| RoutingError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(invalid("nested '{'")),
                            Some(c) => body.push(c),
                            None => return Err(invalid("unclosed '{'")),
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_parameter(&body).ok_or_else(|| invalid("empty parameter name"))?);
                }
                '}' => return Err(invalid("unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        // Same restrictions as axum's matcher, reported here instead of as a panic at mount
        let mut in_segment = 0;
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                TemplateSegment::Literal(text) if text.contains('/') => in_segment = 0,
                TemplateSegment::Literal(_) => {}
                TemplateSegment::Parameter { catch_all, .. } => {
                    in_segment += 1;
                    if in_segment > 1 {
                        return Err(invalid("only one parameter is allowed per path segment"));
                    }
                    if *catch_all && i + 1 != segments.len() {
                        return Err(invalid("catch-all parameter must come last"));
                    }
                }
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            TemplateSegment::Parameter { name, .. } => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }

    /// Path in axum syntax: leading `/`, inline constraints removed
    pub fn axum_path(&self) -> String {
        let mut path = String::from("/");
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => path.push_str(text),
                TemplateSegment::Parameter {
                    name, catch_all, ..
                } => {
                    path.push('{');
                    if *catch_all {
                        path.push('*');
                    }
                    path.push_str(name);
                    path.push('}');
                }
            }
        }
        format!("/{}", path.trim_start_matches('/'))
    }

    /// Run every inline constraint through `resolver`
    pub fn resolve_constraints(
        &self,
        resolver: &dyn InlineConstraintResolver,
    ) -> Vec<ParameterConstraint> {
        let mut resolved = Vec::new();
        for segment in &self.segments {
            if let TemplateSegment::Parameter {
                name, constraints, ..
            } = segment
            {
                for inline in constraints {
                    let constraint = resolver.resolve_constraint(inline);
                    if constraint.is_none() {
                        tracing::debug!("Constraint '{}' on '{}' left to the host", inline, name);
                    }
                    resolved.push(ParameterConstraint {
                        parameter: name.clone(),
                        inline: inline.clone(),
                        constraint,
                    });
                }
            }
        }
        resolved
    }
}

fn parse_parameter(body: &str) -> Option<TemplateSegment> {
    let mut parts = body.split(':');
    let head = parts.next()?.trim();
    let (name, catch_all) = match head.strip_prefix('*') {
        Some(rest) => (rest, true),
        None => (head, false),
    };
    if name.is_empty() {
        return None;
    }
    Some(TemplateSegment::Parameter {
        name: name.to_string(),
        catch_all,
        constraints: parts.map(|c| c.trim().to_string()).collect(),
    })
}

/// Join a prefix and a template. A `~/` template ignores the prefix.
pub(crate) fn compose(prefix: Option<&str>, template: &str) -> String {
    if let Some(rooted) = template.strip_prefix("~/") {
        return rooted.to_string();
    }
    match prefix {
        None | Some("") => template.to_string(),
        Some(prefix) if template.is_empty() => prefix.to_string(),
        Some(prefix) => format!("{}/{}", prefix, template),
    }
}
