//! HTTP inbound adapter serving the cafe directory pages.

pub mod cafes;
pub mod error;
pub mod health;
pub mod pages;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::Error;

fn rejected_path(err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "path parameter rejected");
    Error::not_found("No such page.").into()
}

fn rejected_input(err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "request input rejected");
    Error::invalid_request(format!("Malformed request: {err}")).into()
}

/// Register the page routes and extractor error handlers.
///
/// The session middleware must wrap the app; health probes are registered
/// separately because they need no session.
///
/// # Examples
///
/// ```rust,no_run
/// use actix_web::App;
/// use cafes::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(rejected_path))
        .app_data(web::QueryConfig::default().error_handler(rejected_input))
        .app_data(web::FormConfig::default().error_handler(rejected_input))
        .service(pages::home)
        .service(pages::about)
        .service(cafes::list_cafes)
        .service(cafes::show_cafe)
        .service(cafes::add_cafe_form)
        .service(cafes::add_cafe_submit)
        .service(cafes::delete_cafe);
}
