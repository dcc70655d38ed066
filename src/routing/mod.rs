//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     add_route(pattern, handler, options)
//!     → pattern.rs (split into literal / parameter segments)
//!     → table.rs (append in registration order)
//!     → handed to the navigation controller, immutable from then on
//!
//! Lookup (per navigation):
//!     requested path
//!     → pattern.rs (strip query/fragment, split into segments)
//!     → matcher.rs (first structurally matching route)
//!     → Return: MatchResult { route, params } or None
//! ```
//!
//! # Design Decisions
//! - Registration order is match priority: first match wins
//! - Segment-exact matching only, no prefixes, no wildcards
//! - Params are positional (left to right), never keyed by name
//! - O(routes × segments) scan, fine for an application-sized table

pub mod matcher;
pub mod pattern;
pub mod route;
pub mod table;

pub use matcher::{match_route, MatchResult};
pub use pattern::{PathPattern, Segment};
pub use route::{AccessOptions, Handler, HandlerError, HandlerFuture, RouteDefinition};
pub use table::RouteTable;
