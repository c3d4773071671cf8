// Integration tests for the Tutor Booking API
// Run with: cargo test -p tutor-booking-api --test integration_test
// Drives the full router against in-memory storage; no database required

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tutor_booking_api::{
    auth::{AuthConfig, AuthState, JwtService},
    build_app,
    storage::StorageBackend,
};
use tutor_booking_core::IdentityClaim;

const SECRET: &str = "integration-test-secret";

fn test_app() -> Router {
    build_app(
        Arc::new(StorageBackend::in_memory()),
        AuthState::new(AuthConfig::new(SECRET, false)),
        &["http://localhost:5173".to_string()],
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn set_cookie(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .unwrap()
        .to_string()
}

/// Log in through POST /jwt and return the `token=...` pair to send back
async fn login(app: &Router, email: &str) -> String {
    let (status, headers, body) =
        send(app, json_request("POST", "/jwt", json!({ "email": email }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let cookie = set_cookie(&headers);
    cookie.split(';').next().unwrap().trim().to_string()
}

fn token_of(cookie_pair: &str) -> &str {
    cookie_pair.strip_prefix("token=").unwrap()
}

#[tokio::test]
async fn test_issue_token_sets_session_cookie() {
    let app = test_app();

    let (status, headers, body) = send(
        &app,
        json_request("POST", "/jwt", json!({ "email": "a@x.com", "name": "Ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let cookie = set_cookie(&headers);
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));

    // The credential never appears in the body
    let token = token_of(cookie.split(';').next().unwrap());
    assert!(!body.to_string().contains(token));
}

#[tokio::test]
async fn test_issue_token_requires_email() {
    let app = test_app();

    let (status, headers, body) =
        send(&app, json_request("POST", "/jwt", json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(headers.get(header::SET_COOKIE).is_none());
    assert!(body["error"].is_string());

    let (status, _, _) = send(
        &app,
        json_request("POST", "/jwt", json!({ "email": "a@x.com", "exp": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guarded_route_without_cookie_is_unauthorized() {
    let app = test_app();

    let (status, _, body) = send(&app, get("/tutors/a@x.com", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _, _) = send(&app, get("/bookedTutors/a@x.com", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owner_check() {
    let app = test_app();
    let cookie = login(&app, "a@x.com").await;

    // Another user's resources
    let (status, _, body) = send(&app, get("/tutors/b@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _, _) = send(&app, get("/bookedTutors/b@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The caller's own resources
    let (status, _, body) = send(&app, get("/tutors/a@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _, body) = send(&app, get("/bookedTutors/a@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = test_app();
    let cookie = login(&app, "a@x.com").await;
    let token = token_of(&cookie);

    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut chars: Vec<char> = signature.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("token={}.{}", head, chars.into_iter().collect::<String>());

    let (status, _, body) = send(&app, get("/tutors/a@x.com", Some(&tampered))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = test_app();
    let jwt = JwtService::new(AuthConfig::new(SECRET, false).jwt);
    let token = jwt
        .issue_at(&IdentityClaim::new("a@x.com"), Utc::now() - Duration::days(8))
        .unwrap();

    let (status, _, body) = send(
        &app,
        get("/tutors/a@x.com", Some(&format!("token={}", token))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session expired");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = test_app();
    let cookie = login(&app, "a@x.com").await;

    let (status, _, _) = send(&app, get("/tutors/a@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, body) = send(&app, empty_request("POST", "/logout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let removal = set_cookie(&headers);
    assert!(removal.starts_with("token=;"));
    assert!(removal.contains("Max-Age=0"));
    assert!(removal.contains("HttpOnly"));
    assert!(removal.contains("SameSite=Strict"));
    assert!(removal.contains("Path=/"));

    // A browser honoring the removal sends no credential, or an empty one
    let (status, _, _) = send(&app, get("/tutors/a@x.com", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send(&app, get("/tutors/a@x.com", Some("token="))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tutor_lifecycle() {
    let app = test_app();

    println!("Step 1: Adding tutors...");
    let (status, _, created) = send(
        &app,
        json_request(
            "POST",
            "/addTutor",
            json!({
                "name": "Ada",
                "email": "a@x.com",
                "language": "English",
                "price": 30,
                "review": 0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["acknowledged"], true);
    let id = created["insertedId"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/addTutor",
            json!({ "name": "Jean", "email": "b@x.com", "language": "French" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    println!("Step 2: Listing and filtering...");
    let (status, _, all) = send(&app, get("/tutors", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, _, english) = send(&app, get("/tutors?category=English", None)).await;
    let english = english.as_array().unwrap();
    assert_eq!(english.len(), 1);
    assert_eq!(english[0]["_id"], id.as_str());
    assert_eq!(english[0]["name"], "Ada");

    println!("Step 3: Owner listing...");
    let cookie = login(&app, "a@x.com").await;
    let (status, _, mine) = send(&app, get("/tutors/a@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    println!("Step 4: Review increment...");
    let (status, _, result) = send(&app, empty_request("PATCH", &format!("/tutor/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["matchedCount"], 1);
    let (_, _, tutor) = send(&app, get(&format!("/tutor/{}", id), None)).await;
    assert_eq!(tutor["review"], 1);

    println!("Step 5: Update...");
    let (status, _, result) = send(
        &app,
        json_request(
            "PUT",
            &format!("/updateTutor/{}", id),
            json!({ "name": "Ada L.", "email": "a@x.com", "language": "German", "price": 45 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["modifiedCount"], 1);

    let (_, _, tutor) = send(&app, get(&format!("/tutor/{}", id), None)).await;
    assert_eq!(tutor["name"], "Ada L.");
    assert_eq!(tutor["language"], "German");
    assert_eq!(tutor["price"], 45);
    assert_eq!(tutor["review"], Value::Null);

    println!("Step 6: Delete...");
    let (status, _, result) = send(&app, empty_request("DELETE", &format!("/tutor/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (status, _, body) = send(&app, get(&format!("/tutor/{}", id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tutor not found");

    let (_, _, result) = send(&app, empty_request("DELETE", &format!("/tutor/{}", id))).await;
    assert_eq!(result["deletedCount"], 0);
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = test_app();

    let (status, _, _) = send(&app, get("/tutor/not-an-id", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_categories_and_counts() {
    let app = test_app();

    for language in ["English", "French", "English", "Spanish", "English", "French"] {
        let (status, _, _) = send(
            &app,
            json_request("POST", "/addTutor", json!({ "language": language })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _, categories) = send(&app, get("/categories", None)).await;
    assert_eq!(status, StatusCode::OK);
    let mut categories: Vec<String> = serde_json::from_value(categories).unwrap();
    categories.sort();
    assert_eq!(categories, vec!["English", "French", "Spanish"]);

    let (status, _, counts) = send(&app, get("/categoryCounts", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        counts,
        json!([
            { "_id": "English", "count": 3 },
            { "_id": "French", "count": 2 },
            { "_id": "Spanish", "count": 1 }
        ])
    );
}

#[tokio::test]
async fn test_bookings() {
    let app = test_app();

    let (status, _, created) = send(
        &app,
        json_request(
            "POST",
            "/bookedTutor",
            json!({ "tutorId": "t-1", "email": "a@x.com", "language": "English" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["acknowledged"], true);

    send(
        &app,
        json_request("POST", "/bookedTutor", json!({ "tutorId": "t-2", "email": "b@x.com" })),
    )
    .await;

    let cookie = login(&app, "a@x.com").await;
    let (status, _, bookings) = send(&app, get("/bookedTutors/a@x.com", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["tutorId"], "t-1");
    assert_eq!(bookings[0]["_id"], created["insertedId"]);
}
