//! Integration tests for the user endpoints over the in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use serde_json::{Value, json};

use support::{call, field, signup, test_app};

#[actix_web::test]
async fn signup_returns_the_created_user() {
    let app = test_app().await;
    let user = signup(&app, "Jane", "jane@x.com").await;

    assert_eq!(user["name"], "Jane");
    assert_eq!(user["email"], "jane@x.com");
    assert_eq!(user["organizations"], json!([]));
    assert!(!field(&user, "id").is_empty());
}

#[actix_web::test]
async fn the_collection_path_accepts_both_slash_forms() {
    let app = test_app().await;
    for (uri, email) in [("/users", "a@x.com"), ("/users/", "b@x.com")] {
        let req = TestRequest::post()
            .uri(uri)
            .set_json(json!({ "name": "Jane", "email": email }))
            .to_request();
        let (status, _) = call(&app, req).await;
        assert_eq!(status, StatusCode::CREATED, "uri {uri}");
    }
}

#[actix_web::test]
async fn duplicate_emails_are_rejected() {
    let app = test_app().await;
    signup(&app, "Jane", "jane@x.com").await;

    let req = TestRequest::post()
        .uri("/users/")
        .set_json(json!({ "name": "Janet", "email": "jane@x.com" }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "duplicate_user");
}

#[actix_web::test]
async fn empty_fields_fail_validation() {
    let app = test_app().await;
    let req = TestRequest::post()
        .uri("/users/")
        .set_json(json!({ "name": "", "email": "jane@x.com" }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[actix_web::test]
async fn users_are_fetched_by_id_or_email() {
    let app = test_app().await;
    let user = signup(&app, "Jane", "jane@x.com").await;
    let id = field(&user, "id");

    let (status, by_id) = call(
        &app,
        TestRequest::get().uri(&format!("/users/{id}")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["email"], "jane@x.com");

    let (status, by_email) = call(
        &app,
        TestRequest::get().uri("/users/jane@x.com").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&by_email, "id"), id);
}

#[actix_web::test]
async fn missing_users_are_a_404() {
    let app = test_app().await;
    let (status, body) = call(
        &app,
        TestRequest::get().uri("/users/ghost@x.com").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "user_not_found");
}

#[actix_web::test]
async fn listing_filters_by_case_insensitive_substring() {
    let app = test_app().await;
    signup(&app, "Jane Doe", "jane@x.com").await;
    signup(&app, "janet", "janet@x.com").await;
    signup(&app, "Bob", "bob@x.com").await;

    let (status, body) = call(
        &app,
        TestRequest::get().uri("/users/?name=JAN").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    let names: Vec<&str> = body["users"]
        .as_array()
        .expect("users array")
        .iter()
        .map(|user| field(user, "name"))
        .collect();
    assert_eq!(names, vec!["Jane Doe", "janet"]);
}

#[actix_web::test]
async fn windows_are_disjoint_and_share_the_total() {
    let app = test_app().await;
    for (name, email) in [
        ("One", "one@x.com"),
        ("Two", "two@x.com"),
        ("Three", "three@x.com"),
    ] {
        signup(&app, name, email).await;
    }

    let (_, first) = call(
        &app,
        TestRequest::get()
            .uri("/users/?limit=2&offset=0")
            .to_request(),
    )
    .await;
    let (_, second) = call(
        &app,
        TestRequest::get()
            .uri("/users/?limit=2&offset=2")
            .to_request(),
    )
    .await;

    assert_eq!(first["total_count"], 3);
    assert_eq!(second["total_count"], 3);
    let collect_ids = |body: &Value| -> Vec<String> {
        body["users"]
            .as_array()
            .expect("users array")
            .iter()
            .map(|user| field(user, "id").to_owned())
            .collect()
    };
    let first_ids = collect_ids(&first);
    let second_ids = collect_ids(&second);
    assert_eq!(first_ids.len(), 2);
    assert_eq!(second_ids.len(), 1);
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}

#[actix_web::test]
async fn zero_limits_fail_validation() {
    let app = test_app().await;
    let (status, body) = call(
        &app,
        TestRequest::get().uri("/users/?limit=0").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[actix_web::test]
async fn every_response_carries_a_trace_id_header() {
    let app = test_app().await;
    let res = actix_web::test::call_service(
        &app,
        TestRequest::get().uri("/users/ghost@x.com").to_request(),
    )
    .await;
    assert!(res.headers().contains_key("trace-id"));
}
