//! Calcd handler trait, per-request context and error type.

use crate::http::{CalcRequest, CalcResponse};
use async_trait::async_trait;
use num_bigint::BigUint;

/// Per-request context passed to handlers.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request ID for tracing.
    pub request_id: String,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Trait for calcd request handlers.
///
/// Handlers are stateless: they own no mutable state, hold no locks, and
/// every invocation is independent of every other. A handler either
/// produces a response or a `CalcError`, which the router converts into
/// its fixed plain-text response form.
#[async_trait]
pub trait CalcHandler: Send + Sync {
    /// Handle a validated, fully buffered request.
    async fn handle(
        &self,
        request: CalcRequest,
        ctx: &RequestContext,
    ) -> Result<CalcResponse, CalcError>;

    /// Get the handler name, used in log lines.
    fn name(&self) -> &str;
}

/// Calcd handler error type.
///
/// Carries the status code and the exact plain-text body the client sees.
#[derive(Debug, Clone)]
pub struct CalcError {
    /// Error message, sent verbatim as the response body.
    pub message: String,
    /// HTTP status code.
    pub code: u16,
}

impl CalcError {
    /// Create a new internal error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 500,
        }
    }

    /// Create a CalcError with a specific code.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(404, message)
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(400, message)
    }

    /// Create the generic unprocessable entity error (malformed or
    /// missing input).
    pub fn unprocessable_entity() -> Self {
        Self::with_code(422, "Unprocessable Entity")
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CalcError {}

impl From<CalcError> for CalcResponse {
    fn from(err: CalcError) -> Self {
        CalcResponse::error(err.code, err.message)
    }
}

impl From<std::io::Error> for CalcError {
    fn from(err: std::io::Error) -> Self {
        CalcError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::internal(err.to_string())
    }
}

/// Encode an exact integer result as `{"result": <value>}`.
///
/// Routed through `serde_json::Number` so the value lands on the wire as
/// a JSON number, not a string, even past the u64 range (the crate
/// enables serde_json's `arbitrary_precision` feature for this).
pub(crate) fn exact_result(value: &BigUint) -> Result<CalcResponse, CalcError> {
    let number: serde_json::Number = serde_json::from_str(&value.to_string())?;
    let response = CalcResponse::json(&serde_json::json!({ "result": number }))?;
    Ok(response)
}
