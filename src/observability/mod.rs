//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation controller produces:
//!     → logging.rs (structured tracing events per transition)
//!     → metrics.rs (navigation / redirect / stale-result counters)
//! ```
//!
//! # Design Decisions
//! - Logging goes through `tracing`; the binary installs the subscriber
//! - Metrics go through the `metrics` facade; with no recorder installed
//!   every update is a no-op

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
