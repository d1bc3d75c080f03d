//! Calcd HTTP server implementation.

use crate::http::{CalcRequest, CalcResponse, Method, StatusCode};
use crate::ops::RequestContext;
use crate::routing::Router;
use crate::runtime::CalcConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Calcd HTTP server.
///
/// Accepts connections, buffers each request into a [`CalcRequest`]
/// (single read with a size cap, replacing any chunk-by-chunk
/// accumulation) and dispatches it through the router. One tokio task per
/// connection; handlers share no mutable state.
pub struct CalcServer {
    /// Server configuration.
    config: CalcConfig,
    /// Route table.
    router: Arc<Router>,
}

impl CalcServer {
    /// Create a new calcd server.
    pub fn new(config: CalcConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Create a server with default configuration and the standard
    /// endpoint table.
    pub fn with_defaults() -> Self {
        Self::new(CalcConfig::default(), Router::standard())
    }

    /// Get the route table.
    pub fn router(&self) -> Arc<Router> {
        self.router.clone()
    }

    /// Start the HTTP server.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("calcd listening on {}", addr);

        let router = self.router.clone();
        let config = self.config.clone();

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let router = router.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let router = router.clone();
                    let config = config.clone();
                    async move { handle_request(req, router, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    router: Arc<Router>,
    config: CalcConfig,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        method, path, remote_addr, request_id
    );

    let ctx = RequestContext::new(&request_id);
    let serve = async {
        let calc_request = match convert_request(req, &config).await {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to buffer request: {} [{}]", e, request_id);
                return build_response(CalcResponse::error(
                    StatusCode::BAD_REQUEST,
                    e.to_string(),
                ));
            }
        };

        build_response(router.dispatch(calc_request, &ctx).await)
    };

    match tokio::time::timeout(Duration::from_secs(config.request_timeout), serve).await {
        Ok(response) => Ok(response),
        Err(_) => {
            warn!("Request timed out after {}s [{}]", config.request_timeout, request_id);
            Ok(build_response(CalcResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Request timed out",
            )))
        }
    }
}

/// Convert a hyper Request into a CalcRequest, buffering the full body.
async fn convert_request(
    req: Request<Incoming>,
    config: &CalcConfig,
) -> Result<CalcRequest, Box<dyn std::error::Error + Send + Sync>> {
    let method = Method::from(req.method());
    let path = req.uri().path().to_string();
    let raw_query = req.uri().query().unwrap_or("").to_string();

    let body_bytes = req.collect().await?.to_bytes();
    if body_bytes.len() > config.max_body_size {
        return Err("Request body too large".into());
    }

    let mut request = CalcRequest::new(method, path).query_string(&raw_query);
    if !body_bytes.is_empty() {
        request = request.body(body_bytes);
    }

    Ok(request)
}

/// Build a hyper Response from a CalcResponse.
fn build_response(calc_response: CalcResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(calc_response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            calc_response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);

    for (name, value) in calc_response.headers {
        builder = builder.header(name, value);
    }

    let body = calc_response.body.unwrap_or_default();
    builder.body(Full::new(body)).unwrap()
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}", timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_response_maps_status_and_headers() {
        let response = build_response(CalcResponse::error(StatusCode::NOT_FOUND, "Not Found"));

        assert_eq!(response.status(), hyper::StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_build_response_invalid_status_falls_back() {
        let response = build_response(CalcResponse::new(1000u16));

        assert_eq!(response.status(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
