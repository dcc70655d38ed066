//! Navigation states, outcomes and notifications.

use serde::Serialize;
use thiserror::Error;

use crate::routing::HandlerError;

/// Controller phase.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    Idle = 0,
    Resolving = 1,
    Redirecting = 2,
    Rendering = 3,
}

impl From<u8> for NavState {
    fn from(val: u8) -> Self {
        match val {
            1 => NavState::Resolving,
            2 => NavState::Redirecting,
            3 => NavState::Rendering,
            _ => NavState::Idle,
        }
    }
}

/// How a navigation ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// A route handler settled and its view was rendered.
    Rendered {
        path: String,
        pattern: String,
        params: Vec<String>,
        redirects: usize,
    },
    /// Nothing matched; the not-found view was rendered.
    NotFound { path: String },
    /// A newer navigation started before this one settled; its result was dropped.
    Superseded { generation: u64 },
}

/// Navigation failures. The outlet has already shown an error view when
/// one of these is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect limit of {limit} exceeded while resolving '{path}'")]
    RedirectLimit { path: String, limit: usize },

    #[error("handler for '{path}' failed: {source}")]
    Handler {
        path: String,
        #[source]
        source: HandlerError,
    },
}

/// The last route that was selected for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentRoute {
    pub path: String,
    pub pattern: String,
    pub params: Vec<String>,
}

/// Broadcast after a view has been rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteChanged {
    pub generation: u64,
    pub path: String,
    pub pattern: String,
    pub params: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip_through_u8() {
        for state in [
            NavState::Idle,
            NavState::Resolving,
            NavState::Redirecting,
            NavState::Rendering,
        ] {
            assert_eq!(NavState::from(state as u8), state);
        }
        assert_eq!(NavState::from(42), NavState::Idle);
    }

    #[test]
    fn test_error_display() {
        let err = NavigationError::RedirectLimit {
            path: "/a".into(),
            limit: 5,
        };
        assert_eq!(err.to_string(), "redirect limit of 5 exceeded while resolving '/a'");

        let err = NavigationError::Handler {
            path: "/tickets/1".into(),
            source: HandlerError::load("404 from API"),
        };
        assert!(err.to_string().contains("404 from API"));
    }

    #[test]
    fn test_outcome_json() {
        let outcome = NavigationOutcome::NotFound { path: "/nope".into() };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "not_found");
        assert_eq!(json["path"], "/nope");
    }
}
