use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use super::domain::{LoanApplicationSubmission, RateQuoteRequest};
use super::rate_limit::{RateLimitDecision, RateLimiter};
use super::service::{LendingError, LendingService};
use super::validation::ValidationIssue;

const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_CLIENT: &str = "unknown";

/// Router exposing the loan endpoints. Only the POST handlers count against a
/// client's rate limit; method fallbacks and catalog reads do not.
pub fn lending_router<L>(service: Arc<LendingService<L>>) -> Router
where
    L: RateLimiter + 'static,
{
    let rate_limit = middleware::from_fn_with_state(service.clone(), enforce_rate_limit::<L>);

    Router::new()
        .route(
            "/api/loans/calculate-rate",
            post(calculate_rate_handler::<L>)
                .route_layer(rate_limit.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/api/loans/eligibility",
            post(eligibility_handler::<L>)
                .route_layer(rate_limit)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/loans/products",
            get(products_handler::<L>).fallback(method_not_allowed),
        )
        .route(
            "/api/loans/validation-rules",
            get(validation_rules_handler::<L>).fallback(method_not_allowed),
        )
        .with_state(service)
}

#[derive(Serialize)]
struct Success<T> {
    success: bool,
    data: T,
}

fn success<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(Success {
            success: true,
            data,
        }),
    )
        .into_response()
}

fn invalid_request(details: &[ValidationIssue]) -> Response {
    let payload = json!({
        "error": "Invalid request body",
        "details": details,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    debug!(reason = %rejection.body_text(), "rejected malformed body");
    invalid_request(&[ValidationIssue {
        field: "body".to_string(),
        message: rejection.body_text(),
    }])
}

fn lending_error(error: LendingError) -> Response {
    match error {
        LendingError::Validation(errors) => {
            debug!(issues = errors.issues.len(), "request failed validation");
            invalid_request(&errors.issues)
        }
        LendingError::Calculation(error) => {
            warn!(%error, "calculation rejected validated input");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn calculate_rate_handler<L>(
    State(service): State<Arc<LendingService<L>>>,
    payload: Result<Json<RateQuoteRequest>, JsonRejection>,
) -> Response
where
    L: RateLimiter + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.quote(&request) {
        Ok(quote) => success(quote),
        Err(error) => lending_error(error),
    }
}

pub(crate) async fn eligibility_handler<L>(
    State(service): State<Arc<LendingService<L>>>,
    payload: Result<Json<LoanApplicationSubmission>, JsonRejection>,
) -> Response
where
    L: RateLimiter + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.check_eligibility(&submission) {
        Ok(report) => success(report),
        Err(error) => lending_error(error),
    }
}

pub(crate) async fn products_handler<L>(State(service): State<Arc<LendingService<L>>>) -> Response
where
    L: RateLimiter + 'static,
{
    success(service.products())
}

pub(crate) async fn validation_rules_handler<L>(
    State(service): State<Arc<LendingService<L>>>,
) -> Response
where
    L: RateLimiter + 'static,
{
    success(service.validation_rules())
}

async fn method_not_allowed() -> Response {
    let payload = json!({
        "error": "Method not allowed",
    });
    (StatusCode::METHOD_NOT_ALLOWED, Json(payload)).into_response()
}

async fn enforce_rate_limit<L>(
    State(service): State<Arc<LendingService<L>>>,
    request: Request,
    next: Next,
) -> Response
where
    L: RateLimiter + 'static,
{
    let client = client_key(request.headers());
    match service.admit(&client, Utc::now()) {
        RateLimitDecision::Allowed { .. } => next.run(request).await,
        RateLimitDecision::Limited { retry_after_secs } => {
            warn!(%client, retry_after_secs, "rate limit exceeded");
            let payload = json!({
                "error": "Too many requests. Please try again later.",
            });
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(payload),
            )
                .into_response()
        }
    }
}

/// First hop of `x-forwarded-for`, or a shared bucket when the header is absent.
pub(crate) fn client_key(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
