//! HTTP handlers and the JSON bodies they produce.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use calculator_core::{evaluate_request, ApiError, OperationRequest, OperationResult, Operator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

use crate::AppState;

/// Plain text body served on `/`.
pub const GREETING: &str = "This is my first docker web app";

/// Largest integer a JSON consumer can hold in a double without losing precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Body of a successful arithmetic request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub result: Value,
}

impl From<OperationResult> for OperationResponse {
    fn from(result: OperationResult) -> Self {
        Self {
            result: json_number(result.value()),
        }
    }
}

/// Body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Render a result as a JSON number.
///
/// Integral values in the safe integer range become JSON integers (`7`
/// rather than `7.0`). Non-finite values have no JSON literal and become
/// `null`.
pub fn json_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Maps an [`ApiError`] onto its status code and `{"error": ...}` body.
#[derive(Debug)]
pub struct ErrorResponse(pub ApiError);

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            log::error!("{}", self.0);
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.message().to_string(),
            }),
        )
            .into_response()
    }
}

/// Handler for `GET /`.
pub async fn root_handler() -> &'static str {
    GREETING
}

/// Handler shared by every arithmetic endpoint; `operator` is bound at
/// route registration.
pub async fn operation_handler(
    operator: Operator,
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let request = match query {
        Ok(Query(pairs)) => OperationRequest::from_pairs(pairs),
        Err(rejection) => {
            log::debug!("Discarding malformed query for {}: {}", operator, rejection);
            OperationRequest::default()
        }
    };

    match evaluate_request(operator, &request, &*state.logger) {
        Ok(result) => (StatusCode::OK, Json(OperationResponse::from(result))).into_response(),
        Err(err) => ErrorResponse::from(err).into_response(),
    }
}

/// Turns a panic inside a handler into the generic 500 response.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ErrorResponse(ApiError::internal(format!("handler panicked: {}", detail))).into_response()
}
