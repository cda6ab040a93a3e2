//! A segment trie holding one value per registered [`PathPattern`].
//!
//! Every node has any number of literal children and at most one parameter
//! child. Lookups try the literal child first and fall back to the parameter
//! child, so the more specific route wins while both stay reachable:
//! ```ignore
//!  Routes: /user/new, /user/:id/posts
//!
//!   /user/new          match: /user/new
//!   /user/new/posts    match: /user/:id/posts, id="new"
//!   /user/42           no match
//! ```
use std::collections::HashMap;

use crate::params::Params;
use crate::path::{split, PathPattern, Segment};

pub(crate) struct RouteTrie<T> {
    root: Node<T>,
    strict: bool,
}

struct Node<T> {
    literals: HashMap<String, Node<T>>,
    param: Option<Box<Node<T>>>,
    route: Option<(PathPattern, T)>,
}

/// A successful lookup.
pub(crate) struct Match<'n, T> {
    pub(crate) pattern: &'n PathPattern,
    pub(crate) value: &'n T,
    pub(crate) params: Params,
}

/// The node addressed by a pattern already holds a route declaring
/// different parameter names.
#[derive(Debug)]
pub(crate) struct Conflict(pub(crate) PathPattern);

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            param: None,
            route: None,
        }
    }
}

impl<T> RouteTrie<T> {
    pub(crate) fn new(strict: bool) -> Self {
        Self {
            root: Node::default(),
            strict,
        }
    }

    pub(crate) fn strict(&self) -> bool {
        self.strict
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the value stored for `pattern`, creating the node and a
    /// default value when the pattern is new.
    pub(crate) fn insert(&mut self, pattern: &PathPattern) -> Result<&mut T, Conflict>
    where
        T: Default,
    {
        let mut node = &mut self.root;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literals.entry(text.clone()).or_default(),
                Segment::Parameter(_) => &mut **node.param.get_or_insert_with(Box::default),
            };
        }

        if let Some((existing, _)) = &node.route {
            if existing != pattern {
                return Err(Conflict(existing.clone()));
            }
        }

        let (_, value) = node
            .route
            .get_or_insert_with(|| (pattern.clone(), T::default()));
        Ok(value)
    }

    /// Returns the value registered for exactly this pattern. Parameter
    /// segments address the parameter child; nothing is matched.
    pub(crate) fn get_mut(&mut self, pattern: &PathPattern) -> Option<&mut T> {
        let mut node = &mut self.root;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literals.get_mut(text.as_str())?,
                Segment::Parameter(_) => node.param.as_deref_mut()?,
            };
        }

        match &mut node.route {
            Some((existing, value)) if existing == pattern => Some(value),
            _ => None,
        }
    }

    /// Removes the route registered for exactly this pattern, pruning nodes
    /// left without routes or children.
    pub(crate) fn remove(&mut self, pattern: &PathPattern) -> Option<T> {
        self.root.remove(pattern.segments(), pattern)
    }

    /// Resolves a request path, extracting the parameters declared by the
    /// matched pattern.
    pub(crate) fn at(&self, path: &str) -> Option<Match<'_, T>> {
        let segments = split(path, self.strict);
        let mut values = Vec::new();
        let node = self.root.find(&segments, &mut values)?;
        let (pattern, value) = node.route.as_ref()?;

        Some(Match {
            pattern,
            value,
            params: Params::from_pairs(pattern.parameters().zip(values)),
        })
    }
}

impl<T> Node<T> {
    fn is_empty(&self) -> bool {
        self.route.is_none() && self.literals.is_empty() && self.param.is_none()
    }

    fn find<'n, 'p>(&'n self, segments: &[&'p str], values: &mut Vec<&'p str>) -> Option<&'n Node<T>> {
        let (first, rest) = match segments.split_first() {
            Some(split) => split,
            None => return self.route.as_ref().map(|_| self),
        };

        if let Some(child) = self.literals.get(*first) {
            if let Some(found) = child.find(rest, values) {
                return Some(found);
            }
        }

        // parameters never capture an empty segment
        if first.is_empty() {
            return None;
        }

        let child = self.param.as_deref()?;
        values.push(*first);
        match child.find(rest, values) {
            Some(found) => Some(found),
            None => {
                values.pop();
                None
            }
        }
    }

    fn remove(&mut self, segments: &[Segment], pattern: &PathPattern) -> Option<T> {
        match segments.split_first() {
            None => {
                let registered = matches!(&self.route, Some((existing, _)) if existing == pattern);
                if registered {
                    self.route.take().map(|(_, value)| value)
                } else {
                    None
                }
            }
            Some((Segment::Literal(text), rest)) => {
                let child = self.literals.get_mut(text.as_str())?;
                let value = child.remove(rest, pattern)?;
                if child.is_empty() {
                    self.literals.remove(text.as_str());
                }
                Some(value)
            }
            Some((Segment::Parameter(_), rest)) => {
                let child = self.param.as_deref_mut()?;
                let value = child.remove(rest, pattern)?;
                if child.is_empty() {
                    self.param = None;
                }
                Some(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(route: &str) -> PathPattern {
        PathPattern::parse(route, false).unwrap()
    }

    fn trie(routes: &[&str]) -> RouteTrie<String> {
        let mut trie = RouteTrie::new(false);
        for route in routes {
            *trie.insert(&pattern(route)).unwrap() = route.to_string();
        }
        trie
    }

    #[test]
    fn lookup_with_params() {
        let trie = trie(&["/", "/user/:id", "/:a/:b", "/src/:file/raw"]);

        let tests = vec![
            ("/", "/", vec![]),
            ("/user/42", "/user/:id", vec![("id", "42")]),
            ("/x/y", "/:a/:b", vec![("a", "x"), ("b", "y")]),
            ("/src/main.rs/raw", "/src/:file/raw", vec![("file", "main.rs")]),
        ];

        for (path, route, params) in tests {
            let matched = trie.at(path).unwrap();
            assert_eq!(matched.value, route, "path: {}", path);
            assert_eq!(matched.pattern.to_string(), route);
            assert_eq!(matched.params, Params::from_pairs(params));
        }

        assert!(trie.at("/user/42/posts").is_none());
        assert!(trie.at("/a/b/c").is_none());
    }

    #[test]
    fn literal_beats_parameter() {
        let trie = trie(&["/user/new", "/user/:id", "/user/:id/posts"]);

        let matched = trie.at("/user/new").unwrap();
        assert_eq!(matched.value, "/user/new");
        assert!(matched.params.is_empty());

        let matched = trie.at("/user/7").unwrap();
        assert_eq!(matched.value, "/user/:id");

        let matched = trie.at("/user/new/posts").unwrap();
        assert_eq!(matched.value, "/user/:id/posts");
        assert_eq!(matched.params.get("id"), Some("new"));
    }

    #[test]
    fn trailing_slash() {
        let loose = trie(&["/users"]);
        assert!(loose.at("/users").is_some());
        assert!(loose.at("/users/").is_some());

        let mut strict = RouteTrie::new(true);
        *strict.insert(&PathPattern::parse("/users/", true).unwrap()).unwrap() = 1;
        assert!(strict.at("/users/").is_some());
        assert!(strict.at("/users").is_none());

        let mut strict = RouteTrie::new(true);
        *strict.insert(&PathPattern::parse("/user/:id", true).unwrap()).unwrap() = 1;
        assert!(strict.at("/user/").is_none());
    }

    #[test]
    fn conflicting_parameter_names() {
        let mut trie = trie(&["/user/:id"]);
        let err = trie.insert(&pattern("/user/:name")).unwrap_err();
        assert_eq!(err.0, pattern("/user/:id"));
        assert!(trie.insert(&pattern("/user/:id/")).is_ok());
    }

    #[test]
    fn remove_prunes() {
        let mut trie = trie(&["/a/b/c", "/a/:x", "/d"]);

        assert!(trie.get_mut(&pattern("/a/b")).is_none());
        assert!(trie.remove(&pattern("/a/b")).is_none());
        assert!(trie.remove(&pattern("/a/:y")).is_none());

        assert_eq!(trie.remove(&pattern("/a/b/c")).as_deref(), Some("/a/b/c"));
        assert!(trie.at("/a/b/c").is_none());
        assert_eq!(trie.at("/a/b").unwrap().value, "/a/:x");

        assert_eq!(trie.remove(&pattern("/a/:x")).as_deref(), Some("/a/:x"));
        assert_eq!(trie.remove(&pattern("/d")).as_deref(), Some("/d"));
        assert!(trie.is_empty());
    }
}
