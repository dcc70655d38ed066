//! The single view-output region handlers render into.

use crate::navigation::state::NavigationError;

/// Where resolved views end up. Implemented by the host (DOM container,
/// terminal, test recorder...).
pub trait ViewOutlet: Send + Sync + 'static {
    /// What a route handler produces.
    type View: Send + 'static;

    fn render(&self, view: Self::View);

    /// Terminal state for paths no route matches.
    fn render_not_found(&self, path: &str);

    /// Generic failure state (handler error, redirect limit).
    fn render_error(&self, error: &NavigationError);
}
