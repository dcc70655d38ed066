//! Access-control guards.
//!
//! # Data Flow
//! ```text
//! matched route options + AuthSnapshot
//!     → pipeline.rs (fixed-order checks, first failure wins)
//!     → Return: Allow or Redirect { to, reason }
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no state, trivially testable
//! - Check order is part of the contract, not an implementation detail
//! - Denial is never an error, it is a redirect

pub mod pipeline;

pub use pipeline::{evaluate, GuardDecision, GuardFailure, GuardPaths};
