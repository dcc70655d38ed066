//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject malformed patterns (relative, unnamed or duplicate parameters)
//! - Detect routes that can never match because an earlier route covers them
//! - Detect guard targets whose own guards would redirect again
//! - Require a guest-only login route and an exempt password-change route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure functions over (pattern, options) pairs, so the same checks run on
//!   a TOML manifest and on a route table built in code
//! - Redirect cycles are reported, never patched up

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{PathsConfig, RouterConfig};
use crate::routing::pattern::split_segments;
use crate::routing::{AccessOptions, PathPattern, Segment};

/// A single semantic problem in a configuration or route table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route pattern '{0}' must start with '/'")]
    RelativePattern(String),

    #[error("route pattern '{0}' has a parameter without a name")]
    UnnamedParameter(String),

    #[error("route pattern '{pattern}' declares parameter '{name}' more than once")]
    DuplicateParameter { pattern: String, name: String },

    #[error("route '{pattern}' can never match, '{shadowed_by}' is registered earlier")]
    ShadowedRoute { pattern: String, shadowed_by: String },

    #[error("{field} path '{path}' must start with '/'")]
    RelativeGuardPath { field: &'static str, path: String },

    #[error("{field} path '{path}' does not match any route")]
    UnroutedGuardPath { field: &'static str, path: String },

    #[error("{field} route '{pattern}' redirects again: {reason}")]
    RedirectCycle {
        field: &'static str,
        pattern: String,
        reason: &'static str,
    },

    #[error("{field} route '{pattern}' {requirement}")]
    MisguardedTarget {
        field: &'static str,
        pattern: String,
        requirement: &'static str,
    },

    #[error("navigation.max_redirects must be at least 1")]
    ZeroRedirectLimit,
}

/// Validate a whole configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirectLimit);
    }

    let routes: Vec<(&str, AccessOptions)> = config
        .routes
        .iter()
        .map(|r| (r.pattern.as_str(), r.access))
        .collect();
    errors.extend(check_routes(&routes, &config.paths));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check an ordered route list against the configured guard paths.
///
/// Guard targets are only resolved when `routes` is non-empty.
pub fn check_routes(routes: &[(&str, AccessOptions)], paths: &PathsConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let parsed: Vec<PathPattern> = routes.iter().map(|(p, _)| PathPattern::parse(*p)).collect();

    for pattern in &parsed {
        check_pattern(pattern, &mut errors);
    }

    for (idx, later) in parsed.iter().enumerate() {
        if let Some(earlier) = parsed[..idx].iter().find(|earlier| earlier.covers(later)) {
            errors.push(ValidationError::ShadowedRoute {
                pattern: later.as_str().to_string(),
                shadowed_by: earlier.as_str().to_string(),
            });
        }
    }

    let targets = [
        ("login", Some(&paths.login)),
        ("home", Some(&paths.home)),
        ("password_change", Some(&paths.password_change)),
        ("not_found", paths.not_found.as_ref()),
    ];

    for (field, path) in targets {
        let Some(path) = path else { continue };

        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeGuardPath {
                field,
                path: path.clone(),
            });
            continue;
        }

        if routes.is_empty() {
            continue;
        }

        let request = split_segments(path);
        let Some(idx) = parsed.iter().position(|p| p.capture(&request).is_some()) else {
            errors.push(ValidationError::UnroutedGuardPath {
                field,
                path: path.clone(),
            });
            continue;
        };

        let options = &routes[idx].1;
        if let Some(reason) = cycle_reason(field, options) {
            errors.push(ValidationError::RedirectCycle {
                field,
                pattern: parsed[idx].as_str().to_string(),
                reason,
            });
        } else if let Some(requirement) = missing_requirement(field, options) {
            errors.push(ValidationError::MisguardedTarget {
                field,
                pattern: parsed[idx].as_str().to_string(),
                requirement,
            });
        }
    }

    errors
}

fn check_pattern(pattern: &PathPattern, errors: &mut Vec<ValidationError>) {
    if !pattern.as_str().starts_with('/') {
        errors.push(ValidationError::RelativePattern(pattern.as_str().to_string()));
    }

    let mut seen = HashSet::new();
    for segment in pattern.segments() {
        let Segment::Param(name) = segment else { continue };
        if name.is_empty() {
            errors.push(ValidationError::UnnamedParameter(pattern.as_str().to_string()));
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateParameter {
                pattern: pattern.as_str().to_string(),
                name: name.clone(),
            });
        }
    }
}

/// Options on a guard target that would make the visitor fail the same
/// check that sent them there.
fn cycle_reason(field: &str, options: &AccessOptions) -> Option<&'static str> {
    match field {
        "login" if options.require_auth => Some("login route requires authentication"),
        "login" if options.require_admin => Some("login route requires admin"),
        "home" if options.guest_only => Some("home route is guest-only"),
        "home" if options.require_admin => Some("home route requires admin"),
        "password_change" if options.require_auth && !options.allow_password_change => {
            Some("password-change route is not exempt from the password-change redirect")
        }
        "password_change" if options.require_admin => Some("password-change route requires admin"),
        "password_change" if options.guest_only => Some("password-change route is guest-only"),
        _ => None,
    }
}

/// Access a guard target must declare so signed-in visitors stay off the
/// login page and pending password changes can actually be completed.
fn missing_requirement(field: &str, options: &AccessOptions) -> Option<&'static str> {
    match field {
        "login" if !options.guest_only => Some("must be guest-only"),
        "password_change" if !(options.require_auth && options.allow_password_change) => {
            Some("must require authentication and allow a pending password change")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn flyhalf_routes() -> Vec<(&'static str, AccessOptions)> {
        vec![
            ("/login", AccessOptions::guest()),
            ("/force-password-change", AccessOptions::password_change()),
            ("/", AccessOptions::authenticated()),
            ("/tickets", AccessOptions::authenticated()),
            ("/tickets/new", AccessOptions::authenticated()),
            ("/tickets/:id/edit", AccessOptions::authenticated()),
            ("/tickets/:id", AccessOptions::authenticated()),
            ("/admin/users", AccessOptions::admin()),
        ]
    }

    #[test]
    fn test_valid_table() {
        assert!(check_routes(&flyhalf_routes(), &PathsConfig::default()).is_empty());
    }

    #[test]
    fn test_bad_patterns() {
        let routes = [
            ("tickets", AccessOptions::public()),
            ("/a/:/b", AccessOptions::public()),
            ("/a/:id/b/:id", AccessOptions::public()),
        ];
        let errors = check_routes(&routes, &PathsConfig::default());

        assert!(errors.contains(&ValidationError::RelativePattern("tickets".into())));
        assert!(errors.contains(&ValidationError::UnnamedParameter("/a/:/b".into())));
        assert!(errors.contains(&ValidationError::DuplicateParameter {
            pattern: "/a/:id/b/:id".into(),
            name: "id".into(),
        }));
    }

    #[test]
    fn test_shadowed_route() {
        let routes = [
            ("/tickets/:id", AccessOptions::public()),
            ("/tickets/new", AccessOptions::public()),
        ];
        let errors = check_routes(&routes, &PathsConfig::default());
        assert!(errors.contains(&ValidationError::ShadowedRoute {
            pattern: "/tickets/new".into(),
            shadowed_by: "/tickets/:id".into(),
        }));
    }

    #[test]
    fn test_login_requiring_auth_is_a_cycle() {
        let mut routes = flyhalf_routes();
        routes[0].1 = AccessOptions::authenticated();

        let errors = check_routes(&routes, &PathsConfig::default());
        assert_eq!(
            errors,
            vec![ValidationError::RedirectCycle {
                field: "login",
                pattern: "/login".into(),
                reason: "login route requires authentication",
            }]
        );
    }

    #[test]
    fn test_password_change_route_must_be_exempt() {
        let mut routes = flyhalf_routes();
        routes[1].1 = AccessOptions::authenticated();

        let errors = check_routes(&routes, &PathsConfig::default());
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::RedirectCycle { field: "password_change", .. }]
        ));
    }

    #[test]
    fn test_public_guard_targets_are_rejected() {
        let routes = [
            ("/login", AccessOptions::public()),
            ("/force-password-change", AccessOptions::public()),
            ("/", AccessOptions::authenticated()),
        ];
        let errors = check_routes(&routes, &PathsConfig::default());

        assert_eq!(
            errors,
            vec![
                ValidationError::MisguardedTarget {
                    field: "login",
                    pattern: "/login".into(),
                    requirement: "must be guest-only",
                },
                ValidationError::MisguardedTarget {
                    field: "password_change",
                    pattern: "/force-password-change".into(),
                    requirement: "must require authentication and allow a pending password change",
                },
            ]
        );
    }

    #[test]
    fn test_password_change_route_needs_auth() {
        let mut routes = flyhalf_routes();
        routes[1].1 = AccessOptions {
            allow_password_change: true,
            ..AccessOptions::public()
        };

        let errors = check_routes(&routes, &PathsConfig::default());
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::MisguardedTarget { field: "password_change", .. }]
        ));
    }

    #[test]
    fn test_unrouted_targets() {
        let routes = [("/tickets", AccessOptions::authenticated())];
        let paths = PathsConfig {
            not_found: Some("/404".into()),
            ..PathsConfig::default()
        };
        let errors = check_routes(&routes, &paths);
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::UnroutedGuardPath { .. })));
    }

    #[test]
    fn test_relative_guard_path() {
        let paths = PathsConfig {
            login: "login".into(),
            ..PathsConfig::default()
        };
        let errors = check_routes(&[], &paths);
        assert_eq!(
            errors,
            vec![ValidationError::RelativeGuardPath {
                field: "login",
                path: "login".into(),
            }]
        );
    }

    #[test]
    fn test_validate_config() {
        let mut config = RouterConfig::default();
        assert!(validate_config(&config).is_ok());

        config.navigation.max_redirects = 0;
        config.routes.push(RouteConfig {
            pattern: "/login".into(),
            view: "login".into(),
            access: AccessOptions::guest(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroRedirectLimit));
        // home and password_change are not routed in this manifest.
        assert_eq!(errors.len(), 3);
    }
}
