//! Tests for the cafe directory handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, FromRequest, test, web};
use rstest::rstest;

use super::AddCafeRequest;
use crate::domain::{CafeForm, NewCafe};
use crate::domain::test_fixtures::new_cafe;
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{
    ADMIN_KEY, http_state_with, session_cookie, test_session_middleware,
};

type Response = ServiceResponse;

async fn app_with(
    cafes: Vec<NewCafe>,
) -> (
    impl Service<actix_http::Request, Response = Response, Error = actix_web::Error>,
    web::Data<HttpState>,
) {
    let state = web::Data::new(http_state_with(cafes));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(test_session_middleware())
            .configure(configure),
    )
    .await;
    (app, state)
}

async fn body_of(res: Response) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn location(res: &Response) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Fetch the blank form and return its session cookie and CSRF token.
async fn open_form(
    app: &impl Service<actix_http::Request, Response = Response, Error = actix_web::Error>,
) -> (Cookie<'static>, String) {
    let res = test::call_service(app, test::TestRequest::get().uri("/add-cafe").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie set");
    let body = body_of(res).await;
    let marker = r#"name="csrf_token" value=""#;
    let start = body.find(marker).expect("csrf field rendered") + marker.len();
    let end = start + body[start..].find('"').expect("closing quote");
    (cookie, body[start..end].to_owned())
}

fn blue_bottle_fields(csrf: &str) -> Vec<(&'static str, String)> {
    vec![
        ("csrf_token", csrf.to_owned()),
        ("name", "Blue Bottle".into()),
        ("location", "Shoreditch".into()),
        ("map_url", "https://maps.example/blue".into()),
        ("img_url", "https://img.example/blue.jpg".into()),
        ("has_sockets", "1".into()),
        ("has_toilet", "0".into()),
        ("has_wifi", "1".into()),
        ("can_take_calls", "0".into()),
        ("seats", "1".into()),
        ("coffee_price", "£2.80".into()),
    ]
}

fn with_field(
    mut fields: Vec<(&'static str, String)>,
    name: &str,
    value: &str,
) -> Vec<(&'static str, String)> {
    for (field, current) in &mut fields {
        if *field == name {
            *current = value.to_owned();
        }
    }
    fields
}

async fn stored_names(state: &HttpState) -> Vec<String> {
    state
        .cafes
        .list_cafes()
        .await
        .expect("list cafes")
        .iter()
        .map(|cafe| cafe.name().to_owned())
        .collect()
}

#[actix_web::test]
async fn list_hides_admin_links_without_key() {
    let (app, _) = app_with(vec![new_cafe("Monmouth")]).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/all-cafes").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_of(res).await;
    assert!(body.contains("Monmouth"));
    assert!(!body.contains("delete-cafe"));
    assert!(!body.contains("Add a cafe"));
}

#[rstest]
#[case("/all-cafes?key=wrong")]
#[case("/all-cafes?key=")]
#[actix_web::test]
async fn list_hides_admin_links_with_wrong_key(#[case] uri: &str) {
    let (app, _) = app_with(vec![new_cafe("Monmouth")]).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(!body_of(res).await.contains("delete-cafe"));
}

#[actix_web::test]
async fn list_shows_admin_links_with_key() {
    let (app, _) = app_with(vec![new_cafe("Monmouth")]).await;

    let uri = format!("/all-cafes?key={ADMIN_KEY}");
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_of(res).await;
    assert!(body.contains("delete-cafe"));
    assert!(body.contains(&format!("1?key={ADMIN_KEY}")));
    assert!(body.contains("Add a cafe"));
}

#[actix_web::test]
async fn list_renders_empty_store() {
    let (app, _) = app_with(Vec::new()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/all-cafes").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_of(res).await.contains("No cafes yet."));
}

#[actix_web::test]
async fn show_renders_cafe() {
    let (app, _) = app_with(vec![new_cafe("Monmouth")]).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/cafe/1").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_of(res).await;
    assert!(body.contains("Monmouth"));
    assert!(body.contains("10 - 20"));
}

#[rstest]
#[case("/cafe/99")]
#[case("/cafe/not-a-number")]
#[actix_web::test]
async fn show_unknown_cafe_is_not_found(#[case] uri: &str) {
    let (app, _) = app_with(vec![new_cafe("Monmouth")]).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_of(res).await.contains("Not found"));
}

#[actix_web::test]
async fn add_form_renders_blank_fields_and_token() {
    let (app, _) = app_with(Vec::new()).await;

    let (_, token) = open_form(&app).await;

    assert!(!token.is_empty());
}

#[actix_web::test]
async fn add_valid_cafe_redirects_and_stores() {
    let (app, state) = app_with(Vec::new()).await;
    let (cookie, token) = open_form(&app).await;

    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .cookie(cookie)
        .set_form(blue_bottle_fields(&token))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/all-cafes"));
    assert_eq!(stored_names(&state).await, ["Blue Bottle"]);
}

#[actix_web::test]
async fn add_stores_free_text_price_verbatim() {
    let (app, state) = app_with(Vec::new()).await;
    let (cookie, token) = open_form(&app).await;

    let fields = with_field(
        blue_bottle_fields(&token),
        "coffee_price",
        "$3.50 small, $4.20 large",
    );
    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .cookie(cookie)
        .set_form(fields)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let cafes = state.cafes.list_cafes().await.expect("list cafes");
    assert_eq!(cafes.len(), 1);
    assert_eq!(cafes[0].details().coffee_price, "$3.50 small, $4.20 large");
}

#[actix_web::test]
async fn submission_separates_token_from_cafe_fields() {
    let (req, mut payload) = test::TestRequest::post()
        .set_form(vec![
            ("csrf_token", "token-1"),
            ("name", "Blue Bottle"),
            ("seats", "3"),
        ])
        .to_http_parts();

    let web::Form(AddCafeRequest { csrf_token, form }) =
        web::Form::<AddCafeRequest>::from_request(&req, &mut payload)
            .await
            .expect("form should parse");

    assert_eq!(csrf_token.as_deref(), Some("token-1"));
    assert_eq!(
        form,
        CafeForm {
            name: Some("Blue Bottle".into()),
            seats: Some("3".into()),
            ..CafeForm::default()
        }
    );
}

#[actix_web::test]
async fn add_http_url_rerenders_with_prefix_error() {
    let (app, state) = app_with(Vec::new()).await;
    let (cookie, token) = open_form(&app).await;

    let fields = with_field(
        blue_bottle_fields(&token),
        "map_url",
        "http://maps.example/blue",
    );
    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .cookie(cookie)
        .set_form(fields)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_of(res).await;
    assert!(body.contains("URL must begin with https"));
    assert!(body.contains("Blue Bottle"));
    assert!(stored_names(&state).await.is_empty());
}

#[actix_web::test]
async fn add_duplicate_name_reports_name_error() {
    let (app, state) = app_with(vec![new_cafe("Blue Bottle")]).await;
    let (cookie, token) = open_form(&app).await;

    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .cookie(cookie)
        .set_form(blue_bottle_fields(&token))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        body_of(res)
            .await
            .contains("A cafe with this name already exists.")
    );
    assert_eq!(stored_names(&state).await, ["Blue Bottle"]);
}

#[rstest]
#[case(Some("forged"))]
#[case(None)]
#[actix_web::test]
async fn add_without_valid_token_stores_nothing(#[case] token: Option<&str>) {
    let (app, state) = app_with(Vec::new()).await;
    let (cookie, _) = open_form(&app).await;

    let mut fields = blue_bottle_fields(token.unwrap_or_default());
    if token.is_none() {
        fields.retain(|(name, _)| *name != "csrf_token");
    }
    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .cookie(cookie)
        .set_form(fields)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        body_of(res)
            .await
            .contains("The form has expired. Please submit it again.")
    );
    assert!(stored_names(&state).await.is_empty());
}

#[actix_web::test]
async fn add_without_session_stores_nothing() {
    let (app, state) = app_with(Vec::new()).await;

    let req = test::TestRequest::post()
        .uri("/add-cafe")
        .set_form(blue_bottle_fields("guessed"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(stored_names(&state).await.is_empty());
}

#[actix_web::test]
async fn delete_with_key_removes_and_redirects() {
    let (app, state) = app_with(vec![new_cafe("Blue Bottle"), new_cafe("Monmouth")]).await;

    let uri = format!("/delete-cafe/1?key={ADMIN_KEY}");
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let expected = format!("/all-cafes?key={ADMIN_KEY}");
    assert_eq!(location(&res), Some(expected.as_str()));
    assert_eq!(stored_names(&state).await, ["Monmouth"]);
}

#[rstest]
#[case("/delete-cafe/1")]
#[case("/delete-cafe/1?key=wrong")]
#[actix_web::test]
async fn delete_without_valid_key_is_forbidden(#[case] uri: &str) {
    let (app, state) = app_with(vec![new_cafe("Blue Bottle")]).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(stored_names(&state).await, ["Blue Bottle"]);
}

#[actix_web::test]
async fn delete_unknown_id_is_not_found() {
    let (app, state) = app_with(vec![new_cafe("Blue Bottle")]).await;

    let uri = format!("/delete-cafe/99?key={ADMIN_KEY}");
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(stored_names(&state).await, ["Blue Bottle"]);
}
