//! Cafe directory handlers.
//!
//! ```text
//! GET  /all-cafes?key=         list, admin affordances with a valid key
//! GET  /cafe/{id}              detail
//! GET  /add-cafe               blank form
//! POST /add-cafe               validate and store, 303 to /all-cafes
//! GET  /delete-cafe/{id}?key=  admin only, 303 to /all-cafes?key=
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{info, warn};

use super::session::{CSRF_EXPIRED_MESSAGE, SessionContext};
use super::state::HttpState;
use super::views::{AddCafePage, CafeDetailPage, CafeListPage, CafeView, render, with_key};
use crate::domain::ports::AddCafeOutcome;
use crate::domain::{ApiResult, CafeForm, CafeId, Error, FormErrors};

/// Optional admin token carried in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct AdminKeyQuery {
    pub key: Option<String>,
}

/// Add-cafe submission: the hidden CSRF token plus the cafe fields.
#[derive(Debug, Default, Deserialize)]
pub struct AddCafeRequest {
    pub csrf_token: Option<String>,
    #[serde(flatten)]
    pub form: CafeForm,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn render_form(
    state: &HttpState,
    session: &SessionContext,
    form: &CafeForm,
    errors: &FormErrors,
) -> ApiResult<HttpResponse> {
    let page = AddCafePage::new(state.current_year(), session.csrf_token()?, form, errors);
    render(&page)
}

/// List every cafe.
#[get("/all-cafes")]
pub async fn list_cafes(
    state: web::Data<HttpState>,
    query: web::Query<AdminKeyQuery>,
) -> ApiResult<HttpResponse> {
    let key = query.key.as_deref();
    let is_admin = state.admin.is_admin(key);
    let admin_key = key.filter(|_| is_admin);

    let cafes = state.cafes.list_cafes().await?;
    render(&CafeListPage {
        current_year: state.current_year(),
        cafes: cafes
            .iter()
            .map(|cafe| CafeView::new(cafe, admin_key))
            .collect(),
        is_admin,
    })
}

/// Show one cafe.
#[get("/cafe/{id}")]
pub async fn show_cafe(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let cafe = state.cafes.get_cafe(CafeId::new(path.into_inner())).await?;
    render(&CafeDetailPage {
        current_year: state.current_year(),
        cafe: CafeView::new(&cafe, None),
    })
}

/// Blank add-cafe form.
#[get("/add-cafe")]
pub async fn add_cafe_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    render_form(&state, &session, &CafeForm::default(), &FormErrors::default())
}

/// Validate and store a submitted cafe.
///
/// Rejected submissions re-render the form with `200 OK`, echoing the
/// submitted values next to their errors.
#[post("/add-cafe")]
pub async fn add_cafe_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Form<AddCafeRequest>,
) -> ApiResult<HttpResponse> {
    let AddCafeRequest { csrf_token, form } = payload.into_inner();

    if !session.verify_csrf(csrf_token.as_deref())? {
        warn!("add-cafe submission failed CSRF check");
        let mut errors = FormErrors::default();
        errors.add_form_error(CSRF_EXPIRED_MESSAGE);
        return render_form(&state, &session, &form, &errors);
    }

    match state.cafes_command.add_cafe(&form).await? {
        AddCafeOutcome::Added(cafe) => {
            info!(cafe_id = %cafe.id(), "add-cafe submission stored");
            Ok(see_other("/all-cafes"))
        }
        AddCafeOutcome::Rejected(errors) => render_form(&state, &session, &form, &errors),
    }
}

/// Delete one cafe; requires the admin key.
#[get("/delete-cafe/{id}")]
pub async fn delete_cafe(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<AdminKeyQuery>,
) -> ApiResult<HttpResponse> {
    let id = CafeId::new(path.into_inner());
    let Some(key) = query.key.as_deref().filter(|key| state.admin.is_admin(Some(key))) else {
        warn!(cafe_id = %id, "delete refused without a valid admin key");
        return Err(Error::forbidden("A valid admin key is required to delete cafes."));
    };

    state.cafes_command.delete_cafe(id).await?;
    Ok(see_other(&with_key("/all-cafes", key)))
}

#[cfg(test)]
#[path = "cafes_tests.rs"]
mod tests;
