use super::RouteTable;
use crate::route::{ParameterConstraint, RouteConstraint};
use axum::Router;
use axum::extract::{RawPathParams, Request};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::MethodRouter;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

struct MountedPath {
    path: String,
    router: MethodRouter,
    methods: HashSet<Method>,
}

impl RouteTable {
    /// Mount every entry into an axum [`Router`].
    ///
    /// Entries sharing a path are merged into one method router. An action
    /// without an endpoint, or whose method is already bound on that path,
    /// is skipped with a warning. Resolved inline constraints are checked
    /// per request; a request that fails one gets `404 Not Found`.
    pub fn router(&self) -> Router {
        let mut mounted: Vec<MountedPath> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in &self.entries {
            let path = entry.route.template().axum_path();
            let slot = *index.entry(path.clone()).or_insert_with(|| {
                mounted.push(MountedPath {
                    path,
                    router: MethodRouter::new(),
                    methods: HashSet::new(),
                });
                mounted.len() - 1
            });
            let slot = &mut mounted[slot];

            for action in entry.route.actions() {
                let Some(endpoint) = action.method_router() else {
                    tracing::warn!(
                        "Action {} has no endpoint, skipping {}",
                        action.name(),
                        slot.path
                    );
                    continue;
                };
                if !slot.methods.insert(action.method().clone()) {
                    tracing::warn!(
                        "{} {} is already bound, skipping action {}",
                        action.method(),
                        slot.path,
                        action.name()
                    );
                    continue;
                }
                let router = std::mem::replace(&mut slot.router, MethodRouter::new());
                slot.router = router.merge(constrain(endpoint.clone(), entry.route.constraints()));
            }
        }

        mounted
            .into_iter()
            .filter(|m| !m.methods.is_empty())
            .fold(Router::new(), |app, m| {
                tracing::debug!("Mounting {} {:?}", m.path, m.methods);
                app.route(&m.path, m.router)
            })
    }

    pub fn into_router(self) -> Router {
        self.router()
    }
}

/// Guard `endpoint` with the constraints the resolver understood
fn constrain(endpoint: MethodRouter, constraints: &[ParameterConstraint]) -> MethodRouter {
    let enforced: Vec<(String, Arc<dyn RouteConstraint>)> = constraints
        .iter()
        .filter_map(|c| Some((c.parameter.clone(), c.constraint.clone()?)))
        .collect();
    if enforced.is_empty() {
        return endpoint;
    }
    let enforced = Arc::new(enforced);

    endpoint.route_layer(middleware::from_fn(
        move |params: RawPathParams, request: Request, next: Next| {
            let satisfied = enforced.iter().all(|(parameter, constraint)| {
                params
                    .iter()
                    .find(|(name, _)| *name == parameter.as_str())
                    .is_none_or(|(_, value)| constraint.matches(value))
            });
            async move {
                if satisfied {
                    next.run(request).await
                } else {
                    tracing::debug!("Constraint rejected {}", request.uri());
                    StatusCode::NOT_FOUND.into_response()
                }
            }
        },
    ))
}
