//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error HTTP-agnostic while giving every handler the same
//! `{"error": "..."}` body, status mapping, and `trace-id` header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    #[schema(example = "Coffee not found")]
    pub error: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::OperationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        REDACTED_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorBody {
            error: client_message(self).to_owned(),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_of(response: HttpResponse) -> ErrorBody {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("error body deserialises")
    }

    #[rstest]
    #[case(Error::invalid_request("Missing fields"), StatusCode::BAD_REQUEST)]
    #[case(Error::operation_failed("Error deleting coffee"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("Coffee not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = Error::internal("connection string leaked").with_trace_id(TRACE_ID);

        let response = ResponseError::error_response(&error);
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = body_of(response).await;

        assert_eq!(header.as_deref(), Some(TRACE_ID));
        assert_eq!(body.error, "Internal server error");
    }

    #[rstest]
    #[actix_web::test]
    async fn client_errors_keep_their_message_without_trace_header() {
        let error = Error::not_found("Coffee not found");

        let response = ResponseError::error_response(&error);
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
        let body = body_of(response).await;

        assert_eq!(
            body,
            ErrorBody {
                error: "Coffee not found".to_owned()
            }
        );
    }

    #[rstest]
    fn from_actix_error_is_redacted_internal_error() {
        let err: Error = actix_web::error::ErrorBadRequest("boom").into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
    }
}
