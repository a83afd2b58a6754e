use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use opea_core::DomainError;
use opea_infra::HandlerError;

use super::dto::FieldError;

pub fn handler_error_to_response(err: HandlerError) -> axum::response::Response {
    if err.is_timeout() {
        tracing::warn!(error = %err, "request timed out");
        return json_error(StatusCode::REQUEST_TIMEOUT, "timeout", "request timed out");
    }

    match err {
        HandlerError::Invalid(DomainError::Unauthorized) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        HandlerError::Invalid(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        HandlerError::Invalid(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        HandlerError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "cliente not found"),
        other => {
            // Details stay in the log; clients get a generic body.
            tracing::error!(error = %other, "unhandled error");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "an internal error occurred",
            )
        }
    }
}

pub fn validation_errors(errors: Vec<FieldError>) -> axum::response::Response {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": message,
            "errors": errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
