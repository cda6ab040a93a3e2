//! The closed set of HTTP verbs a route can be bound to, and the fixed-size
//! per-node table keyed by them.
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use hyper::Method;
use thiserror::Error;

/// One of the HTTP methods a handler can be registered for.
///
/// Extension methods are not routable. Parsing, and conversion from
/// [`Method`], is case-insensitive:
/// ```rust
/// use micro_http_router::Verb;
///
/// assert_eq!("get".parse::<Verb>(), Ok(Verb::Get));
/// assert_eq!("PATCH".parse::<Verb>(), Ok(Verb::Patch));
/// assert!("BREW".parse::<Verb>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Verb {
    /// Every supported verb, in table order.
    pub const ALL: [Verb; 9] = [
        Verb::Get,
        Verb::Head,
        Verb::Post,
        Verb::Put,
        Verb::Delete,
        Verb::Connect,
        Verb::Options,
        Verb::Trace,
        Verb::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Connect => "CONNECT",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Patch => "PATCH",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string or `Method` names a verb outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method `{0}`")]
pub struct UnsupportedMethod(pub String);

impl FromStr for Verb {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .iter()
            .copied()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedMethod(s.to_owned()))
    }
}

impl<'a> TryFrom<&'a Method> for Verb {
    type Error = UnsupportedMethod;

    fn try_from(method: &'a Method) -> Result<Self, Self::Error> {
        Ok(match *method {
            Method::GET => Verb::Get,
            Method::HEAD => Verb::Head,
            Method::POST => Verb::Post,
            Method::PUT => Verb::Put,
            Method::DELETE => Verb::Delete,
            Method::CONNECT => Verb::Connect,
            Method::OPTIONS => Verb::Options,
            Method::TRACE => Verb::Trace,
            Method::PATCH => Verb::Patch,
            // extension methods spelled in another case, like `get`
            _ => return method.as_str().parse(),
        })
    }
}

impl TryFrom<Method> for Verb {
    type Error = UnsupportedMethod;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        Verb::try_from(&method)
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Method {
        match verb {
            Verb::Get => Method::GET,
            Verb::Head => Method::HEAD,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Connect => Method::CONNECT,
            Verb::Options => Method::OPTIONS,
            Verb::Trace => Method::TRACE,
            Verb::Patch => Method::PATCH,
        }
    }
}

/// A fixed-size mapping from [`Verb`] to `T`.
pub(crate) struct MethodTable<T> {
    slots: [Option<T>; 9],
}

impl<T> Default for MethodTable<T> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
        }
    }
}

impl<T> MethodTable<T> {
    pub(crate) fn get(&self, verb: Verb) -> Option<&T> {
        self.slots[verb.index()].as_ref()
    }

    /// Sets the slot for `verb`, returning the value it replaced.
    pub(crate) fn insert(&mut self, verb: Verb, value: T) -> Option<T> {
        self.slots[verb.index()].replace(value)
    }

    pub(crate) fn remove(&mut self, verb: Verb) -> Option<T> {
        self.slots[verb.index()].take()
    }

    pub(crate) fn verbs(&self) -> impl Iterator<Item = Verb> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| Verb::ALL[i])
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
