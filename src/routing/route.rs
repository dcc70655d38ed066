//! Route definitions and their access requirements.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::pattern::PathPattern;

/// Access requirements attached to a route. Every flag defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessOptions {
    /// Visitor must be signed in.
    pub require_auth: bool,
    /// Visitor must be signed in and hold the admin role.
    pub require_admin: bool,
    /// Visitor must NOT be signed in.
    pub guest_only: bool,
    /// Route stays reachable while a password change is pending.
    pub allow_password_change: bool,
}

impl AccessOptions {
    /// No requirements.
    pub const fn public() -> Self {
        Self {
            require_auth: false,
            require_admin: false,
            guest_only: false,
            allow_password_change: false,
        }
    }

    pub const fn authenticated() -> Self {
        Self {
            require_auth: true,
            ..Self::public()
        }
    }

    pub const fn admin() -> Self {
        Self {
            require_auth: true,
            require_admin: true,
            ..Self::public()
        }
    }

    pub const fn guest() -> Self {
        Self {
            guest_only: true,
            ..Self::public()
        }
    }

    /// Signed-in route that is exempt from the forced password change redirect.
    pub const fn password_change() -> Self {
        Self {
            require_auth: true,
            allow_password_change: true,
            ..Self::public()
        }
    }
}

/// Failure reported by a view handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The view's data load failed (REST call rejected, network down...).
    #[error("view load failed: {0}")]
    Load(String),

    /// The handler panicked while rendering.
    #[error("view handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }
}

/// Future returned by a view handler.
pub type HandlerFuture<V> = BoxFuture<'static, Result<V, HandlerError>>;

/// A view handler: receives positional params, resolves to the view to show.
pub type Handler<V> = Arc<dyn Fn(Vec<String>) -> HandlerFuture<V> + Send + Sync>;

/// A registered route.
pub struct RouteDefinition<V> {
    pattern: PathPattern,
    handler: Handler<V>,
    options: AccessOptions,
}

impl<V> RouteDefinition<V> {
    /// Create a route from any async handler.
    pub fn new<F, Fut>(pattern: &str, handler: F, options: AccessOptions) -> Self
    where
        F: Fn(Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, HandlerError>> + Send + 'static,
    {
        Self {
            pattern: PathPattern::parse(pattern),
            handler: Arc::new(move |params| handler(params).boxed()),
            options,
        }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn options(&self) -> &AccessOptions {
        &self.options
    }

    /// Start the handler for the given params.
    pub fn invoke(&self, params: Vec<String>) -> HandlerFuture<V> {
        (self.handler)(params)
    }
}

impl<V> fmt::Debug for RouteDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("pattern", &self.pattern.as_str())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
