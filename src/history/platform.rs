//! Browser history capability.

/// The host's session history (browser `History` + `Location`, or an
/// in-memory stand-in).
pub trait History: Send + Sync {
    /// Path of the current entry, e.g. "/tickets/42".
    fn location(&self) -> String;

    /// Add a new entry and make it current.
    fn push(&self, path: &str);

    /// Overwrite the current entry.
    fn replace(&self, path: &str);
}
