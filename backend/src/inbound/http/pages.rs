//! Static pages: landing and about.

use actix_web::{HttpResponse, get, web};

use super::state::HttpState;
use super::views::{AboutPage, HomePage, render};
use crate::domain::ApiResult;

/// Landing page.
#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render(&HomePage {
        current_year: state.current_year(),
    })
}

/// About page.
#[get("/about")]
pub async fn about(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render(&AboutPage {
        current_year: state.current_year(),
    })
}
