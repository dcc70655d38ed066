//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::guard::GuardPaths;
use crate::routing::AccessOptions;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Redirect targets and the optional not-found route.
    pub paths: PathsConfig,

    /// Navigation controller settings.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route manifest. Only tooling builds a table from this; applications
    /// register handlers in code.
    pub routes: Vec<RouteConfig>,
}

/// Well-known paths the guards redirect to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where unauthenticated visitors are sent.
    pub login: String,

    /// Where non-admins and signed-in visitors on guest pages are sent.
    pub home: String,

    /// Where visitors with a pending password change are sent.
    pub password_change: String,

    /// Route resolved when nothing matches (e.g. "/404"). When unset or not
    /// registered the outlet's built-in not-found view is used.
    pub not_found: Option<String>,
}

impl PathsConfig {
    pub fn guard_paths(&self) -> GuardPaths {
        GuardPaths {
            login: self.login.clone(),
            home: self.home.clone(),
            password_change: self.password_change.clone(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let guards = GuardPaths::default();
        Self {
            login: guards.login,
            home: guards.home,
            password_change: guards.password_change,
            not_found: None,
        }
    }
}

/// Navigation controller settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Guard redirects allowed per navigation before it fails safe.
    pub max_redirects: usize,

    /// Buffered route-change notifications per subscriber.
    pub notification_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            notification_capacity: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Record navigation counters through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

/// One entry of the route manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/tickets/:id".
    pub pattern: String,

    /// Name of the view the route renders.
    pub view: String,

    /// Access requirements (`require_auth`, `require_admin`, ...).
    #[serde(flatten)]
    pub access: AccessOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.paths.login, "/login");
        assert_eq!(config.paths.home, "/");
        assert_eq!(config.paths.password_change, "/force-password-change");
        assert!(config.paths.not_found.is_none());
        assert_eq!(config.navigation.max_redirects, 5);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_route_manifest() {
        let config: RouterConfig = toml::from_str(
            r#"
            [paths]
            not_found = "/404"

            [[routes]]
            pattern = "/admin/users"
            view = "users_list"
            require_auth = true
            require_admin = true
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.not_found.as_deref(), Some("/404"));
        let route = &config.routes[0];
        assert_eq!(route.view, "users_list");
        assert_eq!(route.access, AccessOptions::admin());
    }
}
