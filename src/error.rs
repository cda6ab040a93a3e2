//! Failures of the router.
//!
//! [`RouteError`]s are raised while configuring routes and are returned to
//! the caller. [`DispatchError`]s are raised while serving a request and are
//! turned into a response by [`DispatchError::into_response`]; a request
//! never fails the serving process.
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use hyper::{header, Body, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::method::Verb;
use crate::path::PatternError;

/// The error type handlers and before-hooks may fail with.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors returned by the route registration API.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A malformed registration: bad path, unsupported verb, missing handler,
    /// or a pattern clashing with the parameter names already bound at the
    /// same position.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `remove_route` named a path or verb with no binding.
    #[error("no {method} route registered at `{path}`")]
    UnrouteNotFound { path: String, method: String },
}

impl From<PatternError> for RouteError {
    fn from(err: PatternError) -> Self {
        RouteError::InvalidArgument(err.to_string())
    }
}

/// Which step of a matched route failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Before,
    Handler,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Before => f.write_str("before hook"),
            Stage::Handler => f.write_str("handler"),
        }
    }
}

/// Errors raised while dispatching a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route matches the path, or the matched route has no binding for
    /// the request's verb.
    #[error("route not found")]
    RouteNotFound,
    /// The path matched but the verb is not bound. Only raised when the
    /// router is configured to distinguish it from `RouteNotFound`.
    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Verb> },
    /// The before-hook or handler failed or panicked. `origin` names the
    /// type the error was raised as, or `panic`.
    #[error("{stage} failed: {source}")]
    HandlerFailure {
        stage: Stage,
        origin: &'static str,
        #[source]
        source: BoxError,
    },
    /// The cancellation signal fired before the handler finished.
    #[error("request cancelled")]
    Cancelled,
    /// The configured timeout elapsed before the handler finished.
    #[error("handler timed out after {0:?}")]
    TimedOut(Duration),
}

/// A handler or before-hook panicked.
#[derive(Debug, Error)]
#[error("panicked: {0}")]
pub struct Panicked(pub String);

/// An error returned by a handler or before-hook, tagged with its type
/// until the dispatcher unwraps it.
#[derive(Debug)]
pub(crate) struct Raised {
    origin: &'static str,
    source: BoxError,
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl StdError for Raised {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.source()
    }
}

pub(crate) fn raised<E>(err: E) -> BoxError
where
    E: Into<BoxError> + 'static,
{
    Box::new(Raised {
        origin: std::any::type_name::<E>(),
        source: err.into(),
    })
}

#[derive(Serialize)]
struct Diagnostics {
    kind: &'static str,
    stage: Stage,
    origin: &'static str,
    message: String,
    trace: Vec<String>,
}

impl DispatchError {
    pub(crate) fn failure(stage: Stage, err: BoxError) -> Self {
        let (origin, source) = match err.downcast::<Raised>() {
            Ok(raised) => (raised.origin, raised.source),
            Err(err) if err.is::<Panicked>() => ("panic", err),
            Err(err) => ("unknown", err),
        };

        DispatchError::HandlerFailure {
            stage,
            origin,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::HandlerFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            DispatchError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Converts the error into the response sent to the client. With `debug`
    /// set, handler failures carry their kind, origin, message and source
    /// chain as a JSON body; otherwise the body is empty.
    pub fn into_response(self, debug: bool) -> Response<Body> {
        let status = self.status();
        let mut builder = Response::builder().status(status);

        let body = match self {
            DispatchError::RouteNotFound => Body::from("Route not found."),
            DispatchError::MethodNotAllowed { allowed } => {
                let allow = allowed
                    .iter()
                    .map(|verb| verb.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                builder = builder.header(header::ALLOW, allow);
                Body::empty()
            }
            DispatchError::HandlerFailure {
                stage,
                origin,
                source,
            } if debug => {
                let kind = if source.is::<Panicked>() {
                    "Panic"
                } else {
                    "HandlerFailure"
                };
                let diagnostics = Diagnostics {
                    kind,
                    stage,
                    origin,
                    message: source.to_string(),
                    trace: trace(&*source),
                };
                match serde_json::to_vec(&diagnostics) {
                    Ok(json) => {
                        builder = builder.header(header::CONTENT_TYPE, "application/json");
                        Body::from(json)
                    }
                    Err(_) => Body::empty(),
                }
            }
            DispatchError::HandlerFailure { .. }
            | DispatchError::Cancelled
            | DispatchError::TimedOut(_) => Body::empty(),
        };

        builder.body(body).unwrap_or_else(|_| {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = status;
            response
        })
    }
}

/// The chain of underlying causes, outermost first.
fn trace(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut trace = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push(cause.to_string());
        source = cause.source();
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("query failed")]
    struct QueryFailed(#[source] std::io::Error);

    async fn body(response: Response<Body>) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn failure() -> DispatchError {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        DispatchError::failure(Stage::Handler, raised(QueryFailed(io)))
    }

    #[test]
    fn failures_keep_their_origin() {
        match failure() {
            DispatchError::HandlerFailure { origin, source, .. } => {
                assert!(origin.ends_with("QueryFailed"), "origin: {}", origin);
                assert!(source.is::<QueryFailed>());
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let panicked = DispatchError::failure(Stage::Before, Panicked("boom".into()).into());
        assert!(matches!(
            panicked,
            DispatchError::HandlerFailure { origin: "panic", stage: Stage::Before, .. }
        ));

        let bare = DispatchError::failure(Stage::Handler, "bare".into());
        assert!(matches!(bare, DispatchError::HandlerFailure { origin: "unknown", .. }));
    }

    #[test]
    fn status_codes() {
        assert_eq!(DispatchError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(failure().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(DispatchError::Cancelled.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            DispatchError::TimedOut(Duration::from_millis(5)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[tokio::test]
    async fn failure_body_hidden_without_debug() {
        let response = failure().into_response(false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await, "");
    }

    #[tokio::test]
    async fn failure_body_with_debug() {
        let response = failure().into_response(true);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let json: serde_json::Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(json["kind"], "HandlerFailure");
        assert_eq!(json["stage"], "handler");
        assert!(json["origin"].as_str().unwrap().ends_with("QueryFailed"));
        assert_eq!(json["message"], "query failed");
        assert_eq!(json["trace"][0], "connection reset");
    }

    #[tokio::test]
    async fn panic_body_with_debug() {
        let err = DispatchError::failure(Stage::Handler, Panicked("index out of bounds".into()).into());
        let response = err.into_response(true);

        let json: serde_json::Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(json["kind"], "Panic");
        assert_eq!(json["origin"], "panic");
        assert_eq!(json["message"], "panicked: index out of bounds");
    }

    #[tokio::test]
    async fn method_not_allowed_lists_verbs() {
        let err = DispatchError::MethodNotAllowed {
            allowed: vec![Verb::Get, Verb::Post],
        };
        let response = err.into_response(false);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
    }

    #[tokio::test]
    async fn not_found_body() {
        let response = DispatchError::RouteNotFound.into_response(true);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, "Route not found.");
    }
}
