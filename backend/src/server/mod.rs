//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{
    SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

use cafes::Trace;
use cafes::domain::{ApiResult, Error};
use cafes::inbound::http::configure;
use cafes::inbound::http::health::{HealthState, live, ready};
use cafes::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

async fn page_not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found("No such page."))
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build();

    let pages = web::scope("")
        .wrap(session)
        .configure(configure)
        .default_service(web::to(page_not_found));

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(pages)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("cafes")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}

/// Construct an Actix HTTP server from the shared states and configuration.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or building the
/// metrics middleware fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics = make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
