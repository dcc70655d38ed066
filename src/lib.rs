//! Client-side navigation router for the Flyhalf ticket tracker.
//!
//! Maps URL paths to view handlers, enforces access guards (authentication,
//! admin-only, guest-only, forced password change) before any handler runs,
//! and keeps session history in step with what is on screen.

pub mod auth;
pub mod config;
pub mod guard;
pub mod history;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use auth::{AuthProvider, AuthSnapshot, SessionStore};
pub use config::RouterConfig;
pub use history::{HistorySync, MemoryHistory, PlatformEvent};
pub use navigation::{NavigationError, NavigationOutcome, Router, ViewOutlet};
pub use routing::{AccessOptions, HandlerError, RouteTable};
