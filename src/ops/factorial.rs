//! Factorial endpoint: `GET /factorial?n=<int>`.

use crate::http::{CalcRequest, CalcResponse};
use crate::ops::handler::{exact_result, CalcError, CalcHandler, RequestContext};
use async_trait::async_trait;
use num_bigint::BigUint;

/// Handler computing `n!` from the `n` query parameter.
pub struct FactorialHandler;

#[async_trait]
impl CalcHandler for FactorialHandler {
    async fn handle(
        &self,
        request: CalcRequest,
        ctx: &RequestContext,
    ) -> Result<CalcResponse, CalcError> {
        // First value wins if the parameter is repeated.
        let raw = request
            .query_first("n")
            .ok_or_else(CalcError::unprocessable_entity)?;

        let n: i64 = raw
            .parse()
            .map_err(|_| CalcError::unprocessable_entity())?;

        if n < 0 {
            return Err(CalcError::bad_request(
                "Invalid value for n, must be non-negative",
            ));
        }

        let result = factorial(n as u64);
        tracing::debug!("Computed factorial({}) [{}]", n, ctx.request_id);
        exact_result(&result)
    }

    fn name(&self) -> &str {
        "factorial"
    }
}

/// Compute `n!` exactly.
fn factorial(n: u64) -> BigUint {
    let mut result = BigUint::from(1u32);
    for i in 2..=n {
        result *= i;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    fn request(query: &str) -> CalcRequest {
        CalcRequest::new(Method::Get, "/factorial").query_string(query)
    }

    #[test]
    fn test_factorial_values() {
        assert_eq!(factorial(0), BigUint::from(1u32));
        assert_eq!(factorial(1), BigUint::from(1u32));
        assert_eq!(factorial(5), BigUint::from(120u32));
        assert_eq!(factorial(10), BigUint::from(3_628_800u32));
    }

    #[test]
    fn test_factorial_exceeds_machine_integers() {
        // 30! does not fit in u64.
        assert_eq!(
            factorial(30).to_string(),
            "265252859812191058636308480000000"
        );
    }

    #[tokio::test]
    async fn test_missing_n_is_unprocessable() {
        let ctx = RequestContext::default();
        let err = FactorialHandler
            .handle(request("x=kek"), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, 422);
    }

    #[tokio::test]
    async fn test_non_numeric_n_is_unprocessable() {
        let ctx = RequestContext::default();
        for query in ["n=lol", "n=", "n=1.5"] {
            let err = FactorialHandler
                .handle(request(query), &ctx)
                .await
                .unwrap_err();
            assert_eq!(err.code, 422, "query {:?}", query);
        }
    }

    #[tokio::test]
    async fn test_negative_n_is_bad_request() {
        let ctx = RequestContext::default();
        let err = FactorialHandler
            .handle(request("n=-1"), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "Invalid value for n, must be non-negative");
    }

    #[tokio::test]
    async fn test_repeated_n_uses_first_value() {
        let ctx = RequestContext::default();
        let response = FactorialHandler
            .handle(request("n=3&n=5"), &ctx)
            .await
            .unwrap();
        let body: serde_json::Value = response.json_body().unwrap().unwrap();
        assert_eq!(body["result"], serde_json::json!(6));
    }
}
