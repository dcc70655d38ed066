//! Guard evaluation.

use serde::Serialize;

use crate::auth::AuthSnapshot;
use crate::routing::AccessOptions;

/// Where each kind of guard failure sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    /// Target for unauthenticated visitors.
    pub login: String,
    /// Target for non-admins and for signed-in visitors on guest pages.
    pub home: String,
    /// Target while a password change is pending.
    pub password_change: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            home: "/".to_string(),
            password_change: "/force-password-change".to_string(),
        }
    }
}

/// Which check rejected the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardFailure {
    Unauthenticated,
    PasswordChangeRequired,
    NotAdmin,
    GuestOnly,
}

impl GuardFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardFailure::Unauthenticated => "unauthenticated",
            GuardFailure::PasswordChangeRequired => "password_change_required",
            GuardFailure::NotAdmin => "not_admin",
            GuardFailure::GuestOnly => "guest_only",
        }
    }
}

/// Outcome of running the guards for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String, reason: GuardFailure },
}

/// Run the guards in their fixed order:
/// 1. auth required, not signed in → login
/// 2. auth required, password change pending, route not exempt → password change
/// 3. admin required, not admin → home
/// 4. guest only, signed in → home
pub fn evaluate(options: &AccessOptions, auth: &AuthSnapshot, paths: &GuardPaths) -> GuardDecision {
    let failure = if options.require_auth && !auth.is_authenticated {
        Some((GuardFailure::Unauthenticated, &paths.login))
    } else if options.require_auth
        && auth.must_change_password
        && !options.allow_password_change
    {
        Some((GuardFailure::PasswordChangeRequired, &paths.password_change))
    } else if options.require_admin && !auth.is_admin {
        Some((GuardFailure::NotAdmin, &paths.home))
    } else if options.guest_only && auth.is_authenticated {
        Some((GuardFailure::GuestOnly, &paths.home))
    } else {
        None
    };

    match failure {
        Some((reason, to)) => GuardDecision::Redirect {
            to: to.clone(),
            reason,
        },
        None => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(reason: GuardFailure, to: &str) -> GuardDecision {
        GuardDecision::Redirect {
            to: to.to_string(),
            reason,
        }
    }

    #[test]
    fn test_public_route_always_allowed() {
        let paths = GuardPaths::default();
        for auth in [AuthSnapshot::guest(), AuthSnapshot::member(), AuthSnapshot::admin()] {
            assert_eq!(evaluate(&AccessOptions::public(), &auth, &paths), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_require_auth_redirects_guest_to_login() {
        let decision = evaluate(
            &AccessOptions::authenticated(),
            &AuthSnapshot::guest(),
            &GuardPaths::default(),
        );
        assert_eq!(decision, redirect(GuardFailure::Unauthenticated, "/login"));
    }

    #[test]
    fn test_guest_only_redirects_member_home() {
        let decision = evaluate(
            &AccessOptions::guest(),
            &AuthSnapshot::member(),
            &GuardPaths::default(),
        );
        assert_eq!(decision, redirect(GuardFailure::GuestOnly, "/"));
        assert_eq!(
            evaluate(&AccessOptions::guest(), &AuthSnapshot::guest(), &GuardPaths::default()),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_pending_password_change() {
        let auth = AuthSnapshot {
            must_change_password: true,
            ..AuthSnapshot::member()
        };
        let paths = GuardPaths::default();

        assert_eq!(
            evaluate(&AccessOptions::authenticated(), &auth, &paths),
            redirect(GuardFailure::PasswordChangeRequired, "/force-password-change")
        );
        assert_eq!(
            evaluate(&AccessOptions::password_change(), &auth, &paths),
            GuardDecision::Allow
        );
        // Public routes are not subject to the password-change check.
        assert_eq!(evaluate(&AccessOptions::public(), &auth, &paths), GuardDecision::Allow);
    }

    #[test]
    fn test_require_admin() {
        let paths = GuardPaths::default();
        assert_eq!(
            evaluate(&AccessOptions::admin(), &AuthSnapshot::member(), &paths),
            redirect(GuardFailure::NotAdmin, "/")
        );
        assert_eq!(
            evaluate(&AccessOptions::admin(), &AuthSnapshot::admin(), &paths),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let paths = GuardPaths::default();

        // Unauthenticated beats not-admin.
        assert_eq!(
            evaluate(&AccessOptions::admin(), &AuthSnapshot::guest(), &paths),
            redirect(GuardFailure::Unauthenticated, "/login")
        );

        // Password change beats not-admin.
        let auth = AuthSnapshot {
            must_change_password: true,
            ..AuthSnapshot::member()
        };
        assert_eq!(
            evaluate(&AccessOptions::admin(), &auth, &paths),
            redirect(GuardFailure::PasswordChangeRequired, "/force-password-change")
        );

        // Admin-only without require_auth still sends a guest home, not to login.
        let admin_only = AccessOptions {
            require_admin: true,
            ..AccessOptions::public()
        };
        assert_eq!(
            evaluate(&admin_only, &AuthSnapshot::guest(), &paths),
            redirect(GuardFailure::NotAdmin, "/")
        );
    }

    #[test]
    fn test_custom_paths() {
        let paths = GuardPaths {
            login: "/signin".into(),
            home: "/dashboard".into(),
            password_change: "/settings/password".into(),
        };
        assert_eq!(
            evaluate(&AccessOptions::authenticated(), &AuthSnapshot::guest(), &paths),
            redirect(GuardFailure::Unauthenticated, "/signin")
        );
        assert_eq!(
            evaluate(&AccessOptions::guest(), &AuthSnapshot::admin(), &paths),
            redirect(GuardFailure::GuestOnly, "/dashboard")
        );
    }
}
