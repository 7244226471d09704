//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! return it directly. Failures render as an HTML error page with a status
//! matching the error code.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use chrono::Datelike;
use mockable::{Clock, DefaultClock};
use tracing::error;

use super::views::ErrorPage;
use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = %self.message(), "request failed");
        }

        let shown = redact_if_internal(self);
        let page = ErrorPage {
            current_year: DefaultClock.utc().year(),
            status: status.as_u16(),
            title: shown.code().title(),
            message: shown.message().to_owned(),
            trace_id: shown.trace_id().map(str::to_owned),
        };

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        match page.render() {
            Ok(body) => builder.content_type(ContentType::html()).body(body),
            Err(err) => {
                error!(error = %err, "error page rendering failed");
                builder
                    .content_type(ContentType::plaintext())
                    .body(shown.message().to_owned())
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
