//! Mean endpoint: `GET /mean` with a JSON array body.

use crate::http::{CalcRequest, CalcResponse};
use crate::ops::handler::{CalcError, CalcHandler, RequestContext};
use async_trait::async_trait;

/// Handler computing the arithmetic mean of a JSON array of numbers.
pub struct MeanHandler;

#[async_trait]
impl CalcHandler for MeanHandler {
    async fn handle(
        &self,
        request: CalcRequest,
        ctx: &RequestContext,
    ) -> Result<CalcResponse, CalcError> {
        let body = request.text().unwrap_or_default();

        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| CalcError::unprocessable_entity())?;
        let values = data
            .as_array()
            .ok_or_else(CalcError::unprocessable_entity)?;

        // Every element must be a JSON number; booleans and strings are
        // rejected, not coerced.
        let mut sum = 0.0f64;
        for value in values {
            sum += value
                .as_f64()
                .ok_or_else(CalcError::unprocessable_entity)?;
        }

        if values.is_empty() {
            return Err(CalcError::bad_request(
                "Invalid value for body, must be non-empty array of floats",
            ));
        }

        let mean = sum / values.len() as f64;
        tracing::debug!("Computed mean of {} values [{}]", values.len(), ctx.request_id);
        let response = CalcResponse::json(&serde_json::json!({ "result": mean }))?;
        Ok(response)
    }

    fn name(&self) -> &str {
        "mean"
    }
}
