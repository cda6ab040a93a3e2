//! # micro-http-router
//!
//! A small path-based HTTP request router for [hyper](https://hyper.rs).
//!
//! Routes are `(path pattern, method)` pairs bound to asynchronous handlers.
//! The router resolves an inbound request to the matching route, extracts
//! the named parameters of its path, runs an optional before-hook and the
//! handler, and turns the outcome into a response:
//!
//! ```ignore
//!  Outcome                                 Status
//!  handler returned Ok(body)               200, body
//!  no route matches the path               404
//!  path matches, method not bound          404 (405 with `Config::method_not_allowed`)
//!  before-hook or handler failed/panicked  500
//!  cancellation signal fired               503
//!  `Config::timeout` elapsed               504
//! ```
//!
//! ## Features
//!
//! **Literal segments beat parameters:** `/user/new` and `/user/:id` can be
//! registered side by side. A request for `/user/new` is served by the
//! literal route, every other `/user/...` by the parameterized one.
//!
//! **Runtime route mutation:** routes can be added and removed through a
//! shared reference at any time, also while requests are being served. The
//! route table sits behind a readers-writer lock, so dispatch never observes
//! a half-applied change.
//!
//! **Before-hooks:** a route can run a synchronous hook ahead of its handler
//! that prepares request-scoped state, such as the authenticated user.
//!
//! **Failures stay contained:** an error or a panic in a hook or handler
//! becomes a `500` response. With [`Config::debug`] the body carries the
//! failure's kind, the type it was raised as, its message and source chain
//! as JSON.
//!
//! ## Usage
//!
//! Here is a simple example:
//!
//! ```rust,no_run
//! use micro_http_router::{RequestExt, Router};
//! use hyper::{Body, Request};
//! use std::convert::Infallible;
//!
//! async fn index(_: Request<Body>) -> Result<&'static str, Infallible> {
//!     Ok("Hello, world")
//! }
//!
//! async fn hello(req: Request<Body>) -> Result<String, Infallible> {
//!     Ok(format!("Hello, {}", req.params().get("user").unwrap_or("stranger")))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router = Router::default();
//!     router.get("/", index)?.get("/hello/:user", hello)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ### Named parameters
//!
//! As you can see, `:user` is a *named parameter*. The values are accessible
//! via [`RequestExt::params`], by name or by their position in the pattern.
//!
//! Named parameters only match a single, non-empty path segment:
//!
//! ```ignore
//! Pattern: /user/:user
//!
//!  /user/gordon              match
//!  /user/you                 match
//!  /user/gordon/profile      no match
//!  /user/                    no match
//! ```
//!
//! ### Query strings
//!
//! The query string never takes part in matching. It is parsed separately
//! and available via [`RequestExt::query`]:
//!
//! ```rust
//! use micro_http_router::{RequestExt, Router};
//! use hyper::{Body, Request};
//! use std::convert::Infallible;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let router = Router::default();
//! router
//!     .get("/", |req: Request<Body>| async move {
//!         Ok::<_, Infallible>(req.query().get("hello").unwrap_or_default().to_owned())
//!     })
//!     .unwrap();
//!
//! let req = Request::get("/?hello=world").body(Body::empty()).unwrap();
//! let res = router.handle(req).await;
//! let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
//! assert_eq!(body, "world");
//! # }
//! ```
//!
//! ### Before-hooks
//!
//! ```rust
//! use micro_http_router::Router;
//! use hyper::{Body, Request};
//! use std::convert::Infallible;
//!
//! #[derive(Clone)]
//! struct User(String);
//!
//! let router = Router::default();
//! router
//!     .get_with(
//!         "/",
//!         |req: &mut Request<Body>| {
//!             req.extensions_mut().insert(User("John Doe".into()));
//!             Ok::<_, Infallible>(())
//!         },
//!         |req: Request<Body>| async move {
//!             let user = req.extensions().get::<User>().cloned();
//!             Ok::<_, Infallible>(format!("Hello, {}", user.map(|u| u.0).unwrap_or_default()))
//!         },
//!     )
//!     .unwrap();
//! ```
//!
//! ### Trailing slashes
//!
//! By default `/users/` and `/users` are the same route. With
//! [`Config::strict`] they are distinct:
//!
//! ```rust
//! use micro_http_router::{Config, Router, Verb};
//! use hyper::{Body, Request};
//! use std::convert::Infallible;
//!
//! let router = Router::new(Config::default().strict(true));
//! router.get("/users/", |_: Request<Body>| async { Ok::<_, Infallible>("") }).unwrap();
//!
//! assert!(router.lookup(Verb::Get, "/users/").is_some());
//! assert!(router.lookup(Verb::Get, "/users").is_none());
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod method;
pub mod params;
pub mod path;

#[doc(hidden)]
pub mod router;

pub(crate) mod tree;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use error::{BoxError, DispatchError, RouteError};

#[doc(inline)]
pub use method::Verb;

#[doc(inline)]
pub use params::{Param, Params, Query, RequestExt};

#[doc(inline)]
pub use router::{BeforeHook, Handler, Route, Router};

// test the code examples in README.md
#[cfg(doctest)]
mod test_readme {
    macro_rules! doc_comment {
        ($x:expr) => {
            #[doc = $x]
            extern "C" {}
        };
    }

    doc_comment!(include_str!("../README.md"));
}
