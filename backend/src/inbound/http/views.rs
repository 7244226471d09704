//! HTML page models rendered with askama templates.
//!
//! Templates live in `backend/templates` and auto-escape every interpolated
//! value. View structs hold display-ready strings so templates stay free of
//! domain logic.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;
use tracing::error;
use url::form_urlencoded;

use crate::domain::{
    Cafe, CafeField, CafeForm, Error, FormErrors, SeatingCapacity, flag_code,
};

/// Landing page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub current_year: i32,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub current_year: i32,
}

/// Every cafe, with delete links and the add link for admins.
#[derive(Template)]
#[template(path = "all_cafes.html")]
pub struct CafeListPage {
    pub current_year: i32,
    pub cafes: Vec<CafeView>,
    pub is_admin: bool,
}

/// One cafe.
#[derive(Template)]
#[template(path = "cafe.html")]
pub struct CafeDetailPage {
    pub current_year: i32,
    pub cafe: CafeView,
}

/// Add-cafe form, blank or annotated with validation errors.
#[derive(Template)]
#[template(path = "add_cafe.html")]
pub struct AddCafePage {
    pub current_year: i32,
    pub csrf_token: String,
    pub form_errors: Vec<String>,
    pub fields: Vec<FormFieldView>,
}

/// Error page for 4xx/5xx responses.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub current_year: i32,
    pub status: u16,
    pub title: &'static str,
    pub message: String,
    pub trace_id: Option<String>,
}

/// Display-ready cafe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeView {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub map_url: String,
    pub img_url: String,
    pub has_sockets: &'static str,
    pub has_toilet: &'static str,
    pub has_wifi: &'static str,
    pub can_take_calls: &'static str,
    pub seats: &'static str,
    pub coffee_price: String,
    pub detail_href: String,
    /// Present only when the viewer passed the admin gate.
    pub delete_href: Option<String>,
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl CafeView {
    /// Build a view; `admin_key` is the verified key to embed in delete links.
    #[must_use]
    pub fn new(cafe: &Cafe, admin_key: Option<&str>) -> Self {
        let id = cafe.id();
        let details = cafe.details();
        Self {
            id: id.get(),
            name: details.name.clone(),
            location: details.location.clone(),
            map_url: details.map_url.to_string(),
            img_url: details.img_url.to_string(),
            has_sockets: yes_no(details.has_sockets),
            has_toilet: yes_no(details.has_toilet),
            has_wifi: yes_no(details.has_wifi),
            can_take_calls: yes_no(details.can_take_calls),
            seats: details.seats.label(),
            coffee_price: details.coffee_price.clone(),
            detail_href: format!("/cafe/{id}"),
            delete_href: admin_key.map(|key| with_key(&format!("/delete-cafe/{id}"), key)),
        }
    }
}

/// Append `?key=<key>` to `path`, percent-encoding the key.
#[must_use]
pub fn with_key(path: &str, key: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("key", key)
        .finish();
    format!("{path}?{query}")
}

/// One form control with its submitted value and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub errors: Vec<String>,
    /// Empty for free-text inputs.
    pub choices: Vec<ChoiceView>,
}

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn choices_for(field: CafeField) -> Vec<(&'static str, &'static str)> {
    let placeholder = ("", "Choose...");
    match field {
        CafeField::HasSockets
        | CafeField::HasToilet
        | CafeField::HasWifi
        | CafeField::CanTakeCalls => vec![
            placeholder,
            (flag_code(true), "Yes"),
            (flag_code(false), "No"),
        ],
        CafeField::Seats => std::iter::once(placeholder)
            .chain(
                SeatingCapacity::ALL
                    .into_iter()
                    .map(|bucket| (bucket.code(), bucket.label())),
            )
            .collect(),
        CafeField::Name | CafeField::Location | CafeField::MapUrl | CafeField::ImgUrl
        | CafeField::CoffeePrice => Vec::new(),
    }
}

impl FormFieldView {
    fn new(field: CafeField, form: &CafeForm, errors: &FormErrors) -> Self {
        let value = form.value(field).unwrap_or_default();
        let choices = choices_for(field)
            .into_iter()
            .map(|(code, label)| ChoiceView {
                value: code,
                label,
                selected: code == value,
            })
            .collect();
        let input_type = match field {
            CafeField::MapUrl | CafeField::ImgUrl => "url",
            _ => "text",
        };
        Self {
            name: field.name(),
            label: field.label(),
            input_type,
            value: value.to_owned(),
            errors: errors.for_field(field).to_vec(),
            choices,
        }
    }
}

impl AddCafePage {
    /// Form page echoing `form` and annotated with `errors`.
    #[must_use]
    pub fn new(
        current_year: i32,
        csrf_token: String,
        form: &CafeForm,
        errors: &FormErrors,
    ) -> Self {
        Self {
            current_year,
            csrf_token,
            form_errors: errors.form_errors().to_vec(),
            fields: CafeField::ALL
                .into_iter()
                .map(|field| FormFieldView::new(field, form, errors))
                .collect(),
        }
    }
}

/// Render `page` as an HTML response with `status`.
pub fn render_with_status<T: Template>(page: &T, status: StatusCode) -> Result<HttpResponse, Error> {
    let body = page.render().map_err(|err| {
        error!(error = %err, "template rendering failed");
        Error::internal(format!("template rendering failed: {err}"))
    })?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// Render `page` as a `200 OK` HTML response.
pub fn render<T: Template>(page: &T) -> Result<HttpResponse, Error> {
    render_with_status(page, StatusCode::OK)
}
