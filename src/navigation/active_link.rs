//! Navigation bar state: which links are shown and which one is active.
//!
//! The nav bar re-evaluates this on every [`RouteChanged`] notification and
//! whenever the session changes.
//!
//! [`RouteChanged`]: crate::navigation::RouteChanged

use serde::Serialize;

use crate::auth::AuthSnapshot;
use crate::routing::pattern::split_segments;

/// A link in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub admin_only: bool,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            admin_only: false,
        }
    }

    pub fn admin(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            admin_only: true,
            ..Self::new(href, label)
        }
    }
}

/// A link as rendered for the current visitor and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// Whether `href` should be highlighted while `pathname` is shown.
///
/// The root link is only active on the root itself; any other link is active
/// on its own path and on every path below it (segment-wise, so `/tickets`
/// is not active on `/ticketsarchive`).
pub fn is_active(href: &str, pathname: &str) -> bool {
    let link = split_segments(href);
    let current = split_segments(pathname);

    if link.is_empty() {
        return current.is_empty();
    }
    current.starts_with(&link)
}

/// The navigation bar's link set.
#[derive(Debug, Clone)]
pub struct NavBar {
    links: Vec<NavLink>,
}

impl NavBar {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    /// Links of the ticket tracker's main navigation.
    pub fn flyhalf() -> Self {
        Self::new(vec![
            NavLink::new("/tickets", "Tickets"),
            NavLink::new("/sprints", "Sprints"),
            NavLink::new("/projects", "Projects"),
            NavLink::admin("/admin/users", "Users"),
            NavLink::admin("/admin/teams", "Teams"),
            NavLink::admin("/admin/leagues", "Leagues"),
            NavLink::new("/settings", "Settings"),
        ])
    }

    /// Items to render. Guests get an empty bar; admin-only links are
    /// hidden from non-admins.
    pub fn items(&self, auth: &AuthSnapshot, pathname: &str) -> Vec<NavItem> {
        if !auth.is_authenticated {
            return Vec::new();
        }

        self.links
            .iter()
            .filter(|link| !link.admin_only || auth.is_admin)
            .map(|link| NavItem {
                href: link.href.clone(),
                label: link.label.clone(),
                active: is_active(&link.href, pathname),
            })
            .collect()
    }
}
