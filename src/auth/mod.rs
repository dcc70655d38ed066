//! Authentication state as seen by the router.
//!
//! # Data Flow
//! ```text
//! session.rs (SessionStore, updated by login/logout/refresh)
//!     → provider.rs (AuthProvider trait)
//!     → AuthSnapshot read at guard-evaluation time
//! ```
//!
//! # Design Decisions
//! - The router only reads auth state, it never signs anyone in or out
//! - Providers are injected, so several routers can run side by side in tests

pub mod provider;
pub mod session;

pub use provider::{AuthProvider, AuthSnapshot, Role, User};
pub use session::SessionStore;
