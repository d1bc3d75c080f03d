//! Fibonacci endpoint: `GET /fibonacci/<int>`.

use crate::http::{CalcRequest, CalcResponse};
use crate::ops::handler::{exact_result, CalcError, CalcHandler, RequestContext};
use async_trait::async_trait;
use num_bigint::BigUint;

/// Handler computing a Fibonacci number from the path segment after
/// `/fibonacci/`.
pub struct FibonacciHandler;

#[async_trait]
impl CalcHandler for FibonacciHandler {
    async fn handle(
        &self,
        request: CalcRequest,
        ctx: &RequestContext,
    ) -> Result<CalcResponse, CalcError> {
        // Splitting "/fibonacci/<n>" on '/' yields ["", "fibonacci…", "<n>"].
        let parts: Vec<&str> = request.path.split('/').collect();
        let segment = parts.get(2).ok_or_else(CalcError::unprocessable_entity)?;

        let n: i64 = segment
            .parse()
            .map_err(|_| CalcError::unprocessable_entity())?;

        if n < 0 {
            return Err(CalcError::bad_request(
                "Invalid value for n, must be non-negative",
            ));
        }

        let result = fibonacci(n as u64);
        tracing::debug!("Computed fibonacci({}) [{}]", n, ctx.request_id);
        exact_result(&result)
    }

    fn name(&self) -> &str {
        "fibonacci"
    }
}

/// Run the recurrence `(a, b) = (b, a + b)` n times from `(0, 1)` and
/// return `b`.
///
/// This indexing is part of the endpoint's contract: n=0 yields 1 and
/// n=10 yields 89. Callers relying on these values exist, so the off-by-one
/// relative to the textbook 0-indexed sequence stays.
fn fibonacci(n: u64) -> BigUint {
    let mut a = BigUint::from(0u32);
    let mut b = BigUint::from(1u32);
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    b
}
