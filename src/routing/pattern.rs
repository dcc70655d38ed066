//! Path pattern parsing.
//!
//! # Responsibilities
//! - Split patterns and request paths into non-empty segments
//! - Classify pattern segments as literal or parameter
//! - Decide structural compatibility between a pattern and a path
//!
//! # Design Decisions
//! - Leading, trailing and repeated slashes carry no meaning
//! - A segment starting with `:` is a parameter and matches any value
//! - Query strings and fragments never take part in matching

use std::fmt;

/// Marker that turns a pattern segment into a parameter.
pub const PARAM_MARKER: char = ':';

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Captures the request segment. Holds the name without the marker.
    Param(String),
}

/// A parsed route pattern such as `/tickets/:id/edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Parsing never fails; [`crate::config::validation`]
    /// reports malformed patterns separately.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = split_segments(&raw)
            .into_iter()
            .map(|s| match s.strip_prefix(PARAM_MARKER) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { raw, segments }
    }

    /// The pattern exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of parameter segments, i.e. the length of every param list
    /// this pattern produces.
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Compare against already-split request segments. Returns the captured
    /// parameter values in left-to-right order, or `None` on any mismatch.
    pub fn capture(&self, request: &[&str]) -> Option<Vec<String>> {
        if self.segments.len() != request.len() {
            return None;
        }

        let mut params = Vec::with_capacity(self.param_count());
        for (segment, value) in self.segments.iter().zip(request) {
            match segment {
                Segment::Param(_) => params.push((*value).to_string()),
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(params)
    }

    /// True if every path this pattern's `other` could match is already
    /// matched by `self`. A later route covered by an earlier one can never win.
    pub fn covers(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(mine, theirs)| match (mine, theirs) {
                    (Segment::Param(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Param(_)) => false,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Drop any `?query` or `#fragment` suffix.
pub fn strip_suffix(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Split a path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    strip_suffix(path).split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/sprints/:id/board");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("sprints".into()),
                Segment::Param("id".into()),
                Segment::Literal("board".into()),
            ]
        );
        assert_eq!(pattern.param_count(), 1);
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_root_has_no_segments() {
        assert!(PathPattern::parse("/").segments().is_empty());
        assert!(split_segments("").is_empty());
        assert!(split_segments("//").is_empty());
    }

    #[test]
    fn test_split_ignores_extra_slashes_and_suffix() {
        assert_eq!(split_segments("//tickets///42/"), vec!["tickets", "42"]);
        assert_eq!(split_segments("/tickets?status=open"), vec!["tickets"]);
        assert_eq!(split_segments("/tickets/7#comments"), vec!["tickets", "7"]);
    }

    #[test]
    fn test_capture_is_case_sensitive() {
        let pattern = PathPattern::parse("/tickets");
        assert!(pattern.capture(&["tickets"]).is_some());
        assert!(pattern.capture(&["Tickets"]).is_none());
    }

    #[test]
    fn test_covers() {
        let param = PathPattern::parse("/tickets/:id");
        let literal = PathPattern::parse("/tickets/new");

        assert!(param.covers(&literal));
        assert!(!literal.covers(&param));
        assert!(param.covers(&PathPattern::parse("/tickets/:other")));
        assert!(!param.covers(&PathPattern::parse("/tickets/:id/edit")));
    }
}
