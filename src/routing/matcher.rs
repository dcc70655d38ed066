//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route table in registration order
//! - Return the first route whose shape and literals agree with the path
//! - Collect parameter values positionally
//!
//! # Design Decisions
//! - Segment counts must be equal (no prefix matching)
//! - Parameter segments never block a match
//! - No match is an explicit `None`, never a silent default

use std::sync::Arc;

use crate::routing::pattern::split_segments;
use crate::routing::route::RouteDefinition;

/// A matched route with its parameter values in declaration order.
pub struct MatchResult<V> {
    pub route: Arc<RouteDefinition<V>>,
    pub params: Vec<String>,
}

impl<V> std::fmt::Debug for MatchResult<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchResult")
            .field("route", &self.route.pattern().as_str())
            .field("params", &self.params)
            .finish()
    }
}

/// Find the first route matching `path`.
pub fn match_route<V>(routes: &[Arc<RouteDefinition<V>>], path: &str) -> Option<MatchResult<V>> {
    let request = split_segments(path);

    routes.iter().find_map(|route| {
        route.pattern().capture(&request).map(|params| MatchResult {
            route: Arc::clone(route),
            params,
        })
    })
}
