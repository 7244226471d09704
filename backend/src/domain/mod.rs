//! Domain primitives, ports and services.
//!
//! Purpose: define the cafe directory's strongly typed entities, the form
//! validation rules that guard them, and the ports through which inbound and
//! outbound adapters reach them. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Cafe / NewCafe / CafeId / HttpsUrl / SeatingCapacity: the cafe record.
//! - CafeForm / CafeField / FormErrors: raw submission and its validation.
//! - AdminGate: shared-secret check for administrative pages.
//! - CafeDirectoryService: implements the cafe driving ports.

pub mod admin;
pub mod cafe;
pub mod cafe_directory_service;
pub mod cafe_form;
pub mod error;
pub mod ports;
pub mod trace_id;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::admin::{AdminGate, AdminGateError};
pub use self::cafe::{
    Cafe, CafeId, HttpsUrl, HttpsUrlError, NewCafe, SeatingCapacity, flag_code, flag_from_code,
};
pub use self::cafe_directory_service::CafeDirectoryService;
pub use self::cafe_form::{
    CafeField, CafeForm, DUPLICATE_NAME_MESSAGE, FormErrors, INVALID_CHOICE_MESSAGE,
    REQUIRED_MESSAGE,
};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;

/// Convenient handler result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use cafes::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
