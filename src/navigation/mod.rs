//! Navigation controller.
//!
//! # Data Flow
//! ```text
//! navigate(Some(path))          navigate(None)
//!     → history.push(path)          │
//!     └──────────────┬──────────────┘
//!                    ▼
//!     Resolving: routing::match → guard::evaluate
//!          │ redirect (bounded)        │ no route
//!          ▼                           ▼
//!     Redirecting → Resolving     outlet.render_not_found → Idle
//!          │ allow
//!          ▼
//!     Rendering: handler(params).await
//!          → stale generation? drop result
//!          → outlet.render / render_error → Idle
//!          → RouteChanged broadcast
//! ```
//!
//! # Design Decisions
//! - Every navigation takes a generation number; only the newest may render
//! - Redirect chains are bounded and fail safe with an error view
//! - Handler failures (errors and panics) end in an error view, never in a
//!   stuck Resolving state

pub mod active_link;
pub mod controller;
pub mod outlet;
pub mod state;

pub use active_link::{is_active, NavBar, NavItem, NavLink};
pub use controller::{PendingNavigation, Router};
pub use outlet::ViewOutlet;
pub use state::{CurrentRoute, NavState, NavigationError, NavigationOutcome, RouteChanged};
