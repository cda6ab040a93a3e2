//! Route strings and request paths, decomposed into `/`-separated segments.
//!
//! A pattern segment beginning with `:` is a named parameter that captures
//! exactly one segment of a request path; every other segment must match
//! literally:
//! ```ignore
//!  Pattern: /blog/:category/:post
//!
//!   /blog/rust/request-routers            match: category="rust", post="request-routers"
//!   /blog/rust/                           no match
//!   /blog/rust/request-routers/comments   no match
//! ```
//!
//! Unless the router is strict, a single trailing slash is ignored on both
//! patterns and request paths, so `/blog/` and `/blog` are the same route.
use std::fmt;

use thiserror::Error;

/// One unit of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Literal(String),
    Parameter(String),
}

/// Reasons a route string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("path must not be empty")]
    Empty,
    #[error("expected path beginning with '/', found: '{0}'")]
    MissingRoot(String),
    #[error("segment {0} is empty")]
    EmptySegment(usize),
    #[error("parameter in segment {0} has no name")]
    UnnamedParameter(usize),
    #[error("parameter `:{0}` is declared more than once")]
    DuplicateParameter(String),
}

/// A parsed route string.
///
/// ```rust
/// use micro_http_router::path::{PathPattern, Segment};
///
/// let pattern = PathPattern::parse("/user/:id/", false).unwrap();
/// assert_eq!(
///     pattern.segments(),
///     &[Segment::Literal("user".into()), Segment::Parameter("id".into())]
/// );
/// assert_eq!(pattern.to_string(), "/user/:id");
///
/// let strict = PathPattern::parse("/user/:id/", true).unwrap();
/// assert_eq!(strict.to_string(), "/user/:id/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(route: &str, strict: bool) -> Result<Self, PatternError> {
        if route.is_empty() {
            return Err(PatternError::Empty);
        }

        if !route.starts_with('/') {
            return Err(PatternError::MissingRoot(route.to_owned()));
        }

        let parts = split(route, strict);
        let last = parts.len().saturating_sub(1);

        let mut segments = Vec::new();
        for (i, part) in parts.into_iter().enumerate() {
            // only a strict trailing slash may leave an empty segment
            if part.is_empty() && !(strict && i == last && i > 0) {
                return Err(PatternError::EmptySegment(i));
            }

            match part.strip_prefix(':') {
                Some("") => return Err(PatternError::UnnamedParameter(i)),
                Some(name) => {
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Parameter(n) if n == name));
                    if taken {
                        return Err(PatternError::DuplicateParameter(name.to_owned()));
                    }
                    segments.push(Segment::Parameter(name.to_owned()));
                }
                None => segments.push(Segment::Literal(part.to_owned())),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Parameter(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "/{}", text)?,
                Segment::Parameter(name) => write!(f, "/:{}", name)?,
            }
        }

        Ok(())
    }
}

/// Splits a path into its segments. The root splits into nothing; without
/// `strict`, a trailing empty segment is dropped.
pub(crate) fn split(path: &str, strict: bool) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = path.split('/').collect();
    if !strict && segments.last() == Some(&"") {
        segments.pop();
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_paths() {
        let tests: Vec<(&str, bool, Vec<&str>)> = vec![
            ("/", false, vec![]),
            ("/", true, vec![]),
            ("", false, vec![]),
            ("/abc", false, vec!["abc"]),
            ("/abc/", false, vec!["abc"]),
            ("/abc/", true, vec!["abc", ""]),
            ("/a/b/c", true, vec!["a", "b", "c"]),
            ("/a//b", false, vec!["a", "", "b"]),
            ("/abc//", false, vec!["abc", ""]),
        ];

        for (path, strict, want) in tests {
            assert_eq!(split(path, strict), want, "path: {} strict: {}", path, strict);
        }
    }

    #[test]
    fn parse_patterns() {
        let pattern = PathPattern::parse("/:first/:second", false).unwrap();
        assert_eq!(pattern.parameters().collect::<Vec<_>>(), vec!["first", "second"]);

        let root = PathPattern::parse("/", false).unwrap();
        assert!(root.segments().is_empty());
        assert_eq!(root.to_string(), "/");
        assert_eq!(PathPattern::parse("/", true).unwrap(), root);
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(PathPattern::parse("", false), Err(PatternError::Empty));
        assert_eq!(
            PathPattern::parse("user/:id", false),
            Err(PatternError::MissingRoot("user/:id".into()))
        );
        assert_eq!(
            PathPattern::parse("/user/:", false),
            Err(PatternError::UnnamedParameter(1))
        );
        assert_eq!(
            PathPattern::parse("/:id/posts/:id", false),
            Err(PatternError::DuplicateParameter("id".into()))
        );
    }

    #[test]
    fn reject_empty_segments() {
        let tests: Vec<(&str, bool, usize)> = vec![
            ("//", false, 0),
            ("//", true, 0),
            ("/a//b", false, 1),
            ("/a//", true, 1),
            ("/a///", false, 1),
        ];

        for (route, strict, at) in tests {
            assert_eq!(
                PathPattern::parse(route, strict),
                Err(PatternError::EmptySegment(at)),
                "route: {} strict: {}",
                route,
                strict
            );
        }

        assert!(PathPattern::parse("/a/", true).is_ok());
        assert!(PathPattern::parse("/a/", false).is_ok());
    }

    #[test]
    fn trailing_slash() {
        let loose = PathPattern::parse("/users/", false).unwrap();
        assert_eq!(loose, PathPattern::parse("/users", false).unwrap());

        let strict = PathPattern::parse("/users/", true).unwrap();
        assert_ne!(strict, PathPattern::parse("/users", true).unwrap());
        assert_eq!(strict.to_string(), "/users/");
    }
}
