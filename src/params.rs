//! Request-scoped data the router attaches to a request's extensions before
//! the before-hook and handler run.
//!
//! There are two ways to retrieve the value of a path parameter:
//!  1) by the name of the parameter
//! ```rust
//!  # use micro_http_router::Params;
//!  # let params = Params::default();
//!  let user = params.get("user"); // defined by :user
//! ```
//!  2) by the index of the parameter, in the order it was declared in the
//!  route. This way you can also get the name (key)
//! ```rust,no_run
//!  # use micro_http_router::Params;
//!  # let params = Params::default();
//!  let third_key = &params[2].key;   // the name of the 3rd parameter
//!  let third_value = &params[2].value; // the value of the 3rd parameter
//! ```
use std::ops::Index;

/// A single path parameter, consisting of a key and a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Path parameters extracted by a route match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(Vec<Param>);

impl Params {
    pub(crate) fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Params(
            pairs
                .into_iter()
                .map(|(key, value)| Param {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        )
    }

    /// Returns the value of the first parameter registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.0
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }

    /// Returns the value of the parameter declared at position `i`.
    pub fn get_index(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(|param| param.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, i: usize) -> &Param {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parsed query string of a request. Keys may repeat.
///
/// ```rust
/// use micro_http_router::Query;
///
/// let query = Query::parse("hello=world&tag=a&tag=b&greeting=good+day");
/// assert_eq!(query.get("hello"), Some("world"));
/// assert_eq!(query.get_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(query.get("greeting"), Some("good day"));
/// assert_eq!(query.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn parse(query: &str) -> Self {
        Query(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// Returns the first value given for `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value given for `key`, in request order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

static NO_PARAMS: Params = Params(Vec::new());
static NO_QUERY: Query = Query(Vec::new());

/// Access to the data a route match attached to a request.
/// ```rust
/// use micro_http_router::RequestExt;
/// use hyper::{Body, Request};
///
/// let req = Request::new(Body::empty());
/// assert!(req.params().is_empty());
/// assert_eq!(req.query().get("hello"), None);
/// ```
pub trait RequestExt {
    /// Path parameters, empty if the request was not routed.
    fn params(&self) -> &Params;

    /// Query parameters, empty if the request was not routed.
    fn query(&self) -> &Query;
}

impl<B> RequestExt for hyper::Request<B> {
    fn params(&self) -> &Params {
        self.extensions().get::<Params>().unwrap_or(&NO_PARAMS)
    }

    fn query(&self) -> &Query {
        self.extensions().get::<Query>().unwrap_or(&NO_QUERY)
    }
}
