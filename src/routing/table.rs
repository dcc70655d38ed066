//! The route table.
//!
//! # Responsibilities
//! - Store registered routes in registration order
//! - Look up the matching route for a path
//!
//! # Design Decisions
//! - Built once at startup, then moved into the controller (no mutation
//!   after that point because the controller owns it by value)
//! - Routes are `Arc`ed so a match can outlive the lookup borrow

use std::future::Future;
use std::sync::Arc;

use crate::routing::matcher::{match_route, MatchResult};
use crate::routing::route::{AccessOptions, HandlerError, RouteDefinition};

/// Ordered collection of routes producing views of type `V`.
pub struct RouteTable<V> {
    routes: Vec<Arc<RouteDefinition<V>>>,
}

impl<V> RouteTable<V> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route. Earlier registrations take priority.
    pub fn add_route<F, Fut>(&mut self, pattern: &str, handler: F, options: AccessOptions) -> &mut Self
    where
        F: Fn(Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, HandlerError>> + Send + 'static,
    {
        tracing::debug!(pattern, ?options, "Route registered");
        self.routes
            .push(Arc::new(RouteDefinition::new(pattern, handler, options)));
        self
    }

    pub fn match_path(&self, path: &str) -> Option<MatchResult<V>> {
        match_route(&self.routes, path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDefinition<V>>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| r.pattern().as_str()))
            .finish()
    }
}
