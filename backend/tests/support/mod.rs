//! Shared harness for HTTP integration tests.
//!
//! Runs the real application wiring (middleware, routes, path normalisation)
//! over the in-memory repository adapters.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::{Value, json};

use orgbook::inbound::http::health::HealthState;
use orgbook::server::{build_app, in_memory_http_state};

/// Build the full application over fresh in-memory repositories.
pub async fn test_app()
-> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(build_app(
        web::Data::new(HealthState::new()),
        web::Data::new(in_memory_http_state()),
    ))
    .await
}

/// Issue a request and return status plus parsed JSON body.
pub async fn call<S>(app: &S, req: Request) -> (actix_web::http::StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

/// Sign up a user and return its wire representation.
pub async fn signup<S>(app: &S, name: &str, email: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({ "name": name, "email": email }))
        .to_request();
    let (status, body) = call(app, req).await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED, "signup: {body}");
    body
}

/// Create an organization and return its wire representation.
pub async fn create_organization<S>(app: &S, name: &str, created_by: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/organizations/")
        .set_json(json!({ "name": name, "created_by": created_by }))
        .to_request();
    let (status, body) = call(app, req).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "create organization: {body}"
    );
    body
}

/// Extract a string field, panicking with context when absent.
pub fn field<'a>(value: &'a Value, name: &str) -> &'a str {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("field {name} missing from {value}"))
}
