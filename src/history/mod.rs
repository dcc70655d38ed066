//! History synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! Host platform (browser, test harness)
//!     → NavigationEventSource (load / link activation / back-forward)
//!     → sync.rs (intercept decision, spawn navigation)
//!     → Router::navigate
//!
//! Router
//!     → platform.rs (History: location / push / replace)
//!     → memory.rs or the host's real session history
//! ```
//!
//! # Design Decisions
//! - The controller never talks to a concrete event system, only to the
//!   `History` and `NavigationEventSource` capabilities
//! - The interception decision is synchronous so the host can prevent the
//!   default action before any navigation work starts

pub mod memory;
pub mod platform;
pub mod sync;

pub use memory::MemoryHistory;
pub use platform::History;
pub use sync::{
    Disposition, HistorySync, LinkActivation, NavigationEventSource, NavigationTask, PlatformEvent,
};
