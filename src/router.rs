//! [`Router`](crate::Router) maps `(path pattern, verb)` pairs to handlers and
//! dispatches requests to them.
//!
//! Routes can be added and removed at any time, including while the router
//! is serving: the route table sits behind a readers-writer lock, so lookups
//! run concurrently and a mutation is never observed half-applied.
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
//! async fn user(req: Request<Body>) -> Result<String, Infallible> {
//!     Ok(format!("user {}", req.params().get("id").unwrap_or_default()))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router = Router::default();
//!     router.get("/", index)?.get("/user/:id", user)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! A matched route runs in three steps: the path parameters and the parsed
//! query string are stored in the request's extensions, the optional
//! before-hook runs synchronously with mutable access to the request, and
//! the handler's future is awaited. Its output becomes the body of a `200`
//! response. See [`DispatchError`] for the other outcomes.
use crate::config::Config;
use crate::error::{raised, BoxError, DispatchError, Panicked, RouteError, Stage};
use crate::method::{MethodTable, Verb};
use crate::params::{Params, Query};
use crate::path::PathPattern;
use crate::tree::{Conflict, RouteTrie};

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::convert::{Infallible, TryFrom};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::{self, BoxFuture, Either, FutureExt};
use hyper::service::Service;
use hyper::{Body, Method, Request, Response};
use parking_lot::RwLock;
use tracing::Instrument;

macro_rules! verb_routes {
    ($($verb:ident, $with:ident => $method:ident;)*) => {
        $(
            #[doc = concat!("Register a handler for `", stringify!($method), "` requests.")]
            pub fn $verb(&self, path: &str, handler: impl Handler) -> Result<&Self, RouteError> {
                self.add_route(path, Method::$method, handler)
            }

            #[doc = concat!(
                "Register a handler for `", stringify!($method),
                "` requests, running `before` ahead of it."
            )]
            pub fn $with(
                &self,
                path: &str,
                before: impl BeforeHook,
                handler: impl Handler,
            ) -> Result<&Self, RouteError> {
                self.add_route_with(path, Method::$method, before, handler)
            }
        )*
    };
}

/// Router dispatches requests to different handlers via configurable routes.
pub struct Router {
    routes: RwLock<Routes>,
    config: Config,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The route trie and the path index, always mutated together.
struct Routes {
    trie: RouteTrie<MethodTable<Binding>>,
    index: BTreeMap<PathPattern, BTreeSet<Verb>>,
}

#[derive(Clone)]
struct Binding {
    handler: Arc<dyn Handler>,
    before: Option<Arc<dyn BeforeHook>>,
}

impl Router {
    pub fn new(config: Config) -> Self {
        Self {
            routes: RwLock::new(Routes {
                trie: RouteTrie::new(config.strict),
                index: BTreeMap::new(),
            }),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers the route described by `route`. A later registration for
    /// the same path and method replaces the earlier one.
    /// ```rust
    /// use micro_http_router::{Route, Router};
    /// use hyper::{Body, Method, Request};
    /// use std::convert::Infallible;
    ///
    /// struct User(&'static str);
    ///
    /// let router = Router::default();
    /// router.route(
    ///     Route::new("/", Method::GET)
    ///         .before(|req: &mut Request<Body>| {
    ///             req.extensions_mut().insert(User("John Doe"));
    ///             Ok::<_, Infallible>(())
    ///         })
    ///         .handler(|req: Request<Body>| async move {
    ///             let name = req.extensions().get::<User>().map_or("nobody", |user| user.0);
    ///             Ok::<_, Infallible>(format!("Hello, {}", name))
    ///         }),
    /// ).unwrap();
    /// ```
    pub fn route(&self, route: Route) -> Result<&Self, RouteError> {
        let Route {
            path,
            method,
            handler,
            before,
        } = route;

        let handler = handler.ok_or_else(|| {
            RouteError::InvalidArgument(format!("route `{}` has no handler", path))
        })?;

        self.bind(&path, &method, Binding { handler, before })
    }

    /// Insert a handler into the router for a specific path at the specified method.
    /// ```rust
    /// use micro_http_router::Router;
    /// use hyper::{Body, Method, Request};
    /// use std::convert::Infallible;
    ///
    /// let router = Router::default();
    /// router
    ///     .add_route("/teapot", Method::GET, |_: Request<Body>| async {
    ///         Ok::<_, Infallible>("I am a teapot!")
    ///     })
    ///     .unwrap();
    ///
    /// let brew = Method::from_bytes(b"BREW").unwrap();
    /// let teapot = |_: Request<Body>| async { Ok::<_, Infallible>("") };
    /// assert!(router.add_route("/teapot", brew, teapot).is_err());
    /// ```
    pub fn add_route(
        &self,
        path: &str,
        method: Method,
        handler: impl Handler,
    ) -> Result<&Self, RouteError> {
        self.bind(
            path,
            &method,
            Binding {
                handler: Arc::new(handler),
                before: None,
            },
        )
    }

    /// Like [`add_route`](Router::add_route), running `before` ahead of the handler.
    pub fn add_route_with(
        &self,
        path: &str,
        method: Method,
        before: impl BeforeHook,
        handler: impl Handler,
    ) -> Result<&Self, RouteError> {
        self.bind(
            path,
            &method,
            Binding {
                handler: Arc::new(handler),
                before: Some(Arc::new(before)),
            },
        )
    }

    fn bind(&self, path: &str, method: &Method, binding: Binding) -> Result<&Self, RouteError> {
        let verb =
            Verb::try_from(method).map_err(|err| RouteError::InvalidArgument(err.to_string()))?;

        let mut routes = self.routes.write();
        let pattern = PathPattern::parse(path, routes.trie.strict())?;
        let replaced = routes.add(&pattern, verb, binding)?;

        tracing::debug!(path = %pattern, method = %verb, replaced, "route registered");
        Ok(self)
    }

    verb_routes! {
        get, get_with => GET;
        head, head_with => HEAD;
        post, post_with => POST;
        put, put_with => PUT;
        delete, delete_with => DELETE;
        connect, connect_with => CONNECT;
        options, options_with => OPTIONS;
        trace, trace_with => TRACE;
        patch, patch_with => PATCH;
    }

    /// Removes the handler bound to `method` at `path`. The path is addressed
    /// as it was registered, so `/user/:id` removes the parameterized route
    /// while `/user/42` does not. Other methods at the path stay routable.
    /// ```rust
    /// use micro_http_router::{Router, Verb};
    /// use hyper::{Body, Method, Request};
    /// use std::convert::Infallible;
    ///
    /// let router = Router::default();
    /// router
    ///     .get("/user/:id", |_: Request<Body>| async { Ok::<_, Infallible>("get") }).unwrap()
    ///     .delete("/user/:id", |_: Request<Body>| async { Ok::<_, Infallible>("delete") }).unwrap();
    ///
    /// assert!(router.remove_route("/user/42", Method::GET).is_err());
    /// router.remove_route("/user/:id", Method::GET).unwrap();
    /// assert_eq!(router.allowed("/user/42"), vec![Verb::Delete]);
    /// ```
    pub fn remove_route(&self, path: &str, method: Method) -> Result<&Self, RouteError> {
        let not_found = || RouteError::UnrouteNotFound {
            path: path.to_owned(),
            method: method.to_string(),
        };

        let verb = Verb::try_from(&method).map_err(|_| not_found())?;
        let mut routes = self.routes.write();
        let pattern = PathPattern::parse(path, routes.trie.strict()).map_err(|_| not_found())?;
        routes.remove(&pattern, verb)?;

        tracing::debug!(path = %pattern, method = %verb, "route removed");
        Ok(self)
    }

    /// Removes every route. Afterwards no request matches.
    pub fn remove_all_routes(&self) -> Result<&Self, RouteError> {
        let mut routes = self.routes.write();

        let bound = routes
            .index
            .iter()
            .flat_map(|(pattern, verbs)| verbs.iter().map(move |verb| (pattern.clone(), *verb)))
            .collect::<Vec<_>>();

        for (pattern, verb) in &bound {
            routes.remove(pattern, *verb)?;
        }

        tracing::debug!(removed = bound.len(), "all routes removed");
        Ok(self)
    }

    /// Every registered pattern with the methods bound at it, ordered by
    /// pattern: literals before parameters at each position.
    /// ```rust
    /// use micro_http_router::{Router, Verb};
    /// use hyper::{Body, Request};
    /// use std::convert::Infallible;
    ///
    /// let router = Router::default();
    /// router
    ///     .post("/home", |_: Request<Body>| async { Ok::<_, Infallible>("") }).unwrap()
    ///     .get("/home/", |_: Request<Body>| async { Ok::<_, Infallible>("") }).unwrap();
    ///
    /// assert_eq!(router.routes(), vec![("/home".to_string(), vec![Verb::Get, Verb::Post])]);
    /// ```
    pub fn routes(&self) -> Vec<(String, Vec<Verb>)> {
        self.routes
            .read()
            .index
            .iter()
            .map(|(pattern, verbs)| (pattern.to_string(), verbs.iter().copied().collect()))
            .collect()
    }

    /// Returns the methods bound at the route a concrete request path matches.
    pub fn allowed(&self, path: &str) -> Vec<Verb> {
        self.routes
            .read()
            .trie
            .at(path)
            .map(|matched| matched.value.verbs().collect())
            .unwrap_or_default()
    }

    /// Lookup allows the manual lookup of a route for a specific method and
    /// path, returning the parameters it would extract.
    /// ```rust
    /// use micro_http_router::{Router, Verb};
    /// use hyper::{Body, Request};
    /// use std::convert::Infallible;
    ///
    /// let router = Router::default();
    /// router.get("/:first/:second", |_: Request<Body>| async { Ok::<_, Infallible>("") }).unwrap();
    ///
    /// let params = router.lookup(Verb::Get, "/x/y").unwrap();
    /// assert_eq!(params.get("first"), Some("x"));
    /// assert_eq!(params.get_index(1), Some("y"));
    /// assert!(router.lookup(Verb::Post, "/x/y").is_none());
    /// ```
    pub fn lookup(&self, verb: Verb, path: &str) -> Option<Params> {
        let routes = self.routes.read();
        let matched = routes.trie.at(path)?;
        matched.value.get(verb)?;
        Some(matched.params)
    }

    /// Dispatches a request and converts any failure into its response. This
    /// is what the transport layer calls for every inbound request.
    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        self.handle_with_cancel(req, future::pending()).await
    }

    /// Like [`handle`](Router::handle), abandoning the request with
    /// `503 Service Unavailable` if `cancel` completes first.
    pub async fn handle_with_cancel<C>(&self, req: Request<Body>, cancel: C) -> Response<Body>
    where
        C: Future<Output = ()>,
    {
        let span = tracing::debug_span!(
            "request",
            method = %req.method(),
            path = %req.uri().path(),
        );

        async move {
            match self.dispatch_with_cancel(req, cancel).await {
                Ok(response) => {
                    tracing::debug!(status = response.status().as_u16(), "request handled");
                    response
                }
                Err(err) => {
                    match &err {
                        DispatchError::RouteNotFound | DispatchError::MethodNotAllowed { .. } => {
                            tracing::trace!(error = %err, "no route matched")
                        }
                        DispatchError::HandlerFailure { .. } => {
                            tracing::error!(error = %err, "request failed")
                        }
                        DispatchError::Cancelled | DispatchError::TimedOut(_) => {
                            tracing::warn!(error = %err, "request abandoned")
                        }
                    }
                    err.into_response(self.config.debug)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Dispatches a request, returning failures as a typed error rather than
    /// a response.
    pub async fn dispatch(&self, req: Request<Body>) -> Result<Response<Body>, DispatchError> {
        self.dispatch_with_cancel(req, future::pending()).await
    }

    pub async fn dispatch_with_cancel<C>(
        &self,
        mut req: Request<Body>,
        cancel: C,
    ) -> Result<Response<Body>, DispatchError>
    where
        C: Future<Output = ()>,
    {
        let binding = self.resolve(&mut req)?;

        let run = binding.run(req);
        let run = match self.config.deadline() {
            Some(deadline) => Either::Left(async move {
                tokio::time::timeout(deadline, run)
                    .await
                    .unwrap_or_else(|_| Err(DispatchError::TimedOut(deadline)))
            }),
            None => Either::Right(run),
        };

        futures_util::pin_mut!(run);
        futures_util::pin_mut!(cancel);

        match future::select(run, cancel).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(DispatchError::Cancelled),
        }
    }

    /// Finds the binding for a request and stores its path parameters and
    /// query in the request's extensions. The lock is released on return.
    fn resolve(&self, req: &mut Request<Body>) -> Result<Binding, DispatchError> {
        let routes = self.routes.read();
        let matched = routes
            .trie
            .at(req.uri().path())
            .ok_or(DispatchError::RouteNotFound)?;
        tracing::trace!(route = %matched.pattern, "route matched");

        let bound = Verb::try_from(req.method())
            .ok()
            .and_then(|verb| matched.value.get(verb));

        let binding = match bound {
            Some(binding) => binding.clone(),
            None if self.config.method_not_allowed => {
                return Err(DispatchError::MethodNotAllowed {
                    allowed: matched.value.verbs().collect(),
                })
            }
            None => return Err(DispatchError::RouteNotFound),
        };

        let query = req.uri().query().map(Query::parse).unwrap_or_default();
        req.extensions_mut().insert(matched.params);
        req.extensions_mut().insert(query);

        Ok(binding)
    }
}

/// The default router configuration: trailing slashes ignored, failure
/// details hidden, unbound methods answered with 404.
impl Default for Router {
    fn default() -> Self {
        Router::new(Config::default())
    }
}

impl Routes {
    /// Binds `verb` at `pattern`, returning whether an earlier binding was
    /// replaced.
    fn add(&mut self, pattern: &PathPattern, verb: Verb, binding: Binding) -> Result<bool, RouteError> {
        let table = self.trie.insert(pattern).map_err(|Conflict(existing)| {
            RouteError::InvalidArgument(format!(
                "`{}` conflicts with the parameter names of registered route `{}`",
                pattern, existing
            ))
        })?;
        let replaced = table.insert(verb, binding).is_some();

        self.index
            .entry(pattern.clone())
            .or_default()
            .insert(verb);

        Ok(replaced)
    }

    fn remove(&mut self, pattern: &PathPattern, verb: Verb) -> Result<(), RouteError> {
        let not_found = || RouteError::UnrouteNotFound {
            path: pattern.to_string(),
            method: verb.to_string(),
        };

        let table = self.trie.get_mut(pattern).ok_or_else(not_found)?;
        table.remove(verb).ok_or_else(not_found)?;
        let emptied = table.is_empty();

        if emptied {
            self.trie.remove(pattern);
            self.index.remove(pattern);
        } else if let Some(verbs) = self.index.get_mut(pattern) {
            verbs.remove(&verb);
        }

        Ok(())
    }
}

impl Binding {
    async fn run(self, mut req: Request<Body>) -> Result<Response<Body>, DispatchError> {
        if let Some(before) = &self.before {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| before.before(&mut req)))
                .unwrap_or_else(|payload| Err(Panicked(panic_message(payload)).into()));

            if let Err(err) = outcome {
                return Err(DispatchError::failure(Stage::Before, err));
            }
        }

        let handler = self.handler;
        let outcome = AssertUnwindSafe(async move { handler.handle(req).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(Panicked(panic_message(payload)).into()));

        match outcome {
            Ok(body) => Ok(Response::new(body)),
            Err(err) => Err(DispatchError::failure(Stage::Handler, err)),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }

    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => "unknown panic payload".to_owned(),
    }
}

/// The options-object form of a registration, for [`Router::route`].
pub struct Route {
    path: String,
    method: Method,
    handler: Option<Arc<dyn Handler>>,
    before: Option<Arc<dyn BeforeHook>>,
}

impl Route {
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            handler: None,
            before: None,
        }
    }

    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn before(mut self, before: impl BeforeHook) -> Self {
        self.before = Some(Arc::new(before));
        self
    }
}

/// Represents a HTTP handler function.
/// This trait is implemented for asynchronous functions that take a `Request` and return a
/// `Result` whose success value converts into a response `Body`.
/// ```rust
/// # use micro_http_router::Handler;
/// # use hyper::{Request, Body};
/// async fn hello(_: Request<Body>) -> Result<String, std::io::Error> {
///     Ok("Hello, world".to_string())
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Result<Body, BoxError>>;
}

impl<F, R, B, E> Handler for F
where
    F: Fn(Request<Body>) -> R + Send + Sync + 'static,
    R: Future<Output = Result<B, E>> + Send + 'static,
    B: Into<Body> + 'static,
    E: Into<BoxError> + 'static,
{
    fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Result<Body, BoxError>> {
        let fut = self(req);
        Box::pin(async move { fut.await.map(Into::into).map_err(raised) })
    }
}

/// Runs synchronously before a handler, with mutable access to the request.
/// Values it inserts into the request's extensions are visible to the handler;
/// an error aborts the request with a handler failure.
pub trait BeforeHook: Send + Sync + 'static {
    fn before(&self, req: &mut Request<Body>) -> Result<(), BoxError>;
}

impl<F, E> BeforeHook for F
where
    F: Fn(&mut Request<Body>) -> Result<(), E> + Send + Sync + 'static,
    E: Into<BoxError> + 'static,
{
    fn before(&self, req: &mut Request<Body>) -> Result<(), BoxError> {
        self(req).map_err(raised)
    }
}

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = Infallible;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let service = self.0.clone();
        future::ok(service)
    }
}

impl From<Arc<Router>> for MakeRouterService {
    fn from(router: Arc<Router>) -> Self {
        MakeRouterService(RouterService(router))
    }
}

/// A hyper `Service` answering requests with a shared [`Router`].
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl From<Arc<Router>> for RouterService {
    fn from(router: Arc<Router>) -> Self {
        RouterService(router)
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let router = self.0.clone();
        Box::pin(async move { Ok(router.handle(req).await) })
    }
}

impl Router {
    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    /// To keep mutating routes while serving, share the router instead:
    /// ```rust,no_run
    /// # use micro_http_router::Router;
    /// # use micro_http_router::router::MakeRouterService;
    /// # use std::sync::Arc;
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let router = Arc::new(Router::default());
    /// let service = MakeRouterService::from(router.clone());
    ///
    /// hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(service)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_service(self) -> MakeRouterService {
        MakeRouterService::from(Arc::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &'static str) -> impl Handler {
        move |_: Request<Body>| async move { Ok::<_, Infallible>(body) }
    }

    fn index(router: &Router) -> Vec<(String, Vec<Verb>)> {
        router.routes()
    }

    #[test]
    fn index_tracks_trie() {
        let router = Router::default();
        router
            .get("/a", ok("a"))
            .unwrap()
            .post("/a", ok("a"))
            .unwrap()
            .get("/b/:id", ok("b"))
            .unwrap();

        assert_eq!(
            index(&router),
            vec![
                ("/a".to_string(), vec![Verb::Get, Verb::Post]),
                ("/b/:id".to_string(), vec![Verb::Get]),
            ]
        );

        router.remove_route("/a", Method::GET).unwrap();
        assert_eq!(index(&router)[0], ("/a".to_string(), vec![Verb::Post]));
        assert_eq!(router.allowed("/a"), vec![Verb::Post]);

        router.remove_route("/a", Method::POST).unwrap();
        assert_eq!(index(&router), vec![("/b/:id".to_string(), vec![Verb::Get])]);
        assert!(router.allowed("/a").is_empty());

        router.remove_all_routes().unwrap();
        assert!(index(&router).is_empty());
        assert!(router.routes.read().trie.is_empty());
    }

    #[test]
    fn empty_segments_never_alias_the_root() {
        let router = Router::default();
        router.get("/", ok("root")).unwrap();

        assert!(matches!(
            router.post("//", ok("")),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            router.remove_route("//", Method::POST),
            Err(RouteError::UnrouteNotFound { .. })
        ));
        assert_eq!(index(&router), vec![("/".to_string(), vec![Verb::Get])]);

        router.remove_all_routes().unwrap();
        assert!(router.lookup(Verb::Get, "/").is_none());
        assert!(router.routes.read().trie.is_empty());
    }

    #[test]
    fn strict_index_keeps_trailing_slash_apart() {
        let router = Router::new(Config::default().strict(true));
        router
            .get("/users", ok(""))
            .unwrap()
            .get("/users/", ok(""))
            .unwrap();

        router.remove_route("/users/", Method::GET).unwrap();
        assert_eq!(index(&router), vec![("/users".to_string(), vec![Verb::Get])]);
        assert!(router.lookup(Verb::Get, "/users").is_some());
        assert!(router.lookup(Verb::Get, "/users/").is_none());

        router.remove_all_routes().unwrap();
        assert!(router.lookup(Verb::Get, "/users").is_none());
        assert!(router.routes.read().trie.is_empty());
    }

    #[test]
    fn replacing_keeps_one_index_entry() {
        let router = Router::default();
        router.get("/", ok("first")).unwrap().get("/", ok("second")).unwrap();
        assert_eq!(index(&router), vec![("/".to_string(), vec![Verb::Get])]);
    }

    #[test]
    fn invalid_registrations() {
        let router = Router::default();

        assert!(matches!(
            router.get("", ok("")),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            router.get("user", ok("")),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            router.route(Route::new("/", Method::GET)),
            Err(RouteError::InvalidArgument(_))
        ));

        router.get("/user/:id", ok("")).unwrap();
        assert!(matches!(
            router.post("/user/:name", ok("")),
            Err(RouteError::InvalidArgument(_))
        ));

        assert_eq!(index(&router), vec![("/user/:id".to_string(), vec![Verb::Get])]);
    }

    #[test]
    fn unroute_not_found() {
        let router = Router::default();
        router.get("/a", ok("a")).unwrap();

        let err = router.remove_route("/b", Method::GET).unwrap_err();
        assert!(matches!(err, RouteError::UnrouteNotFound { .. }));
        assert_eq!(err.to_string(), "no GET route registered at `/b`");

        assert!(matches!(
            router.remove_route("/a", Method::PUT),
            Err(RouteError::UnrouteNotFound { .. })
        ));
        assert!(matches!(
            router.remove_route("/a", Method::from_bytes(b"BREW").unwrap()),
            Err(RouteError::UnrouteNotFound { .. })
        ));
    }

    #[test]
    fn panic_messages() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(7)), "unknown panic payload");
    }
}
