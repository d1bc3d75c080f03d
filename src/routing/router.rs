//! Ordered route table mapping method + path to a handler.

use crate::http::{CalcRequest, CalcResponse, Method, StatusCode};
use crate::ops::{
    CalcHandler, FactorialHandler, FibonacciHandler, MeanHandler, RequestContext,
};
use std::sync::Arc;
use tracing::debug;

/// Path-matching rule for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Match the path exactly.
    Exact(String),
    /// Match any path starting with this prefix.
    Prefix(String),
}

impl RoutePattern {
    /// Check if this pattern matches the given path.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(p) => p == path,
            RoutePattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// A route entry pairing an HTTP method with a path pattern.
#[derive(Debug, Clone)]
pub struct Route {
    /// HTTP method for this route.
    pub method: Method,
    /// Path pattern for this route.
    pub pattern: RoutePattern,
}

impl Route {
    /// Create a GET route with an exact path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            pattern: RoutePattern::Exact(path.into()),
        }
    }

    /// Create a GET route matching a path prefix.
    pub fn get_prefix(prefix: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            pattern: RoutePattern::Prefix(prefix.into()),
        }
    }

    /// Check if this route matches the given method and path.
    pub fn matches(&self, method: Method, path: &str) -> bool {
        self.method == method && self.pattern.matches(path)
    }
}

/// Router dispatching requests to the first matching route.
///
/// The table is fixed at construction time and evaluated in registration
/// order; there is no priority, no mutation after startup and therefore
/// no locking.
pub struct Router {
    routes: Vec<(Route, Arc<dyn CalcHandler>)>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Create a router with the calcd endpoint table, in dispatch order.
    pub fn standard() -> Self {
        Self::new()
            .route(Route::get("/factorial"), Arc::new(FactorialHandler))
            .route(Route::get_prefix("/fibonacci"), Arc::new(FibonacciHandler))
            .route(Route::get("/mean"), Arc::new(MeanHandler))
    }

    /// Register a route. Earlier registrations win on overlap.
    pub fn route(mut self, route: Route, handler: Arc<dyn CalcHandler>) -> Self {
        self.routes.push((route, handler));
        self
    }

    /// Find the handler for the given method and path.
    fn find(&self, method: Method, path: &str) -> Option<&Arc<dyn CalcHandler>> {
        self.routes
            .iter()
            .find(|(route, _)| route.matches(method, path))
            .map(|(_, handler)| handler)
    }

    /// Dispatch a request to the first matching handler.
    ///
    /// Unmatched requests get the fixed 404 response, and handler errors
    /// are converted into their plain-text response form here; dispatch
    /// itself never fails.
    pub async fn dispatch(&self, request: CalcRequest, ctx: &RequestContext) -> CalcResponse {
        let Some(handler) = self.find(request.method, &request.path) else {
            debug!("No route for {} {} [{}]", request.method, request.path, ctx.request_id);
            return CalcResponse::error(StatusCode::NOT_FOUND, "Not Found");
        };

        debug!(
            "Dispatching {} {} to '{}' [{}]",
            request.method,
            request.path,
            handler.name(),
            ctx.request_id
        );

        match handler.handle(request, ctx).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Handler '{}' rejected request: {} [{}]", handler.name(), e, ctx.request_id);
                e.into()
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern_match() {
        let route = Route::get("/factorial");

        assert!(route.matches(Method::Get, "/factorial"));
        assert!(!route.matches(Method::Post, "/factorial"));
        assert!(!route.matches(Method::Get, "/factorial/2"));
        assert!(!route.matches(Method::Get, "/"));
    }

    #[test]
    fn test_prefix_pattern_match() {
        let route = Route::get_prefix("/fibonacci");

        assert!(route.matches(Method::Get, "/fibonacci"));
        assert!(route.matches(Method::Get, "/fibonacci/10"));
        assert!(route.matches(Method::Get, "/fibonacci/10/extra"));
        assert!(!route.matches(Method::Get, "/fib"));
        assert!(!route.matches(Method::Post, "/fibonacci/10"));
    }

    #[tokio::test]
    async fn test_unmatched_request_is_not_found() {
        let router = Router::standard();
        let ctx = RequestContext::default();

        let response = router
            .dispatch(CalcRequest::new(Method::Get, "/"), &ctx)
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.text_body(), Some("Not Found".to_string()));
        assert_eq!(
            response.headers.get("content-type"),
            Some(&"text/plain".to_string())
        );
    }

    #[tokio::test]
    async fn test_dispatch_order_is_registration_order() {
        let router = Router::standard();
        let ctx = RequestContext::default();

        // Exact /factorial is registered before the /fibonacci prefix and
        // must keep winning for its own path.
        let response = router
            .dispatch(
                CalcRequest::new(Method::Get, "/factorial").query_param("n", "0"),
                &ctx,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_handler_error_becomes_response() {
        let router = Router::standard();
        let ctx = RequestContext::default();

        let response = router
            .dispatch(CalcRequest::new(Method::Get, "/factorial"), &ctx)
            .await;

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.text_body(), Some("Unprocessable Entity".to_string()));
    }
}
