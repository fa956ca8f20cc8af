//! Router-level tests that run without a database. Persistence paths are
//! covered against a pool whose store is unreachable, which is itself one
//! of the reportable failure modes.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use serde_json::Value;
use tower::ServiceExt;

use larder_server::auth::{SessionStore, SESSION_COOKIE};
use larder_server::db::DbPool;
use larder_server::{app, AppState};

fn unreachable_pool() -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new("postgres://127.0.0.1:9/larder_test");
    diesel::r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_millis(100))
        .build_unchecked(manager)
}

fn test_app() -> (Router, SessionStore) {
    let sessions = SessionStore::new(30);
    let state = AppState {
        pool: unreachable_pool(),
        sessions: sessions.clone(),
    };
    (app(state), sessions)
}

fn cookie_for(sessions: &SessionStore, user_id: i32, username: &str) -> String {
    let token = sessions.create(user_id, username);
    format!("{}={}", SESSION_COOKIE, token)
}

fn form_request(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn recipes_require_a_session_on_every_method() {
    let (app, _) = test_app();

    for request in [
        get_request("/recipes", None),
        form_request("POST", "/recipes", "action=create&title=Tea", None),
        form_request("DELETE", "/recipes", "id=1", None),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Unauthorized access. Please log in.");
    }
}

#[tokio::test]
async fn stale_cookie_is_unauthorized() {
    let (app, _) = test_app();

    let request = get_request("/recipes", Some("larder_session=deadbeef"));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_session_is_unauthorized() {
    let sessions = SessionStore::new(0);
    let state = AppState {
        pool: unreachable_pool(),
        sessions: sessions.clone(),
    };
    let app = app(state);
    let cookie = cookie_for(&sessions, 1, "alice");

    let response = app.oneshot(get_request("/recipes", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_unsupported_method_is_401_not_405() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method("PATCH")
        .uri("/recipes")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authenticated_unsupported_method_is_405() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 1, "alice");

    let request = Request::builder()
        .method("PATCH")
        .uri("/recipes")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Request method not supported.");
}

#[tokio::test]
async fn check_reports_logged_out_without_a_session() {
    let (app, _) = test_app();

    let response = app.oneshot(get_request("/auth?action=check", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["logged_in"], false);
    assert_eq!(json["username"], Value::Null);
}

#[tokio::test]
async fn check_reports_the_session_username() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 7, "alice");

    let response = app
        .oneshot(get_request("/auth?action=check", Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["logged_in"], true);
    assert_eq!(json["username"], "alice");
}

#[tokio::test]
async fn logout_destroys_the_session_and_expires_the_cookie() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 7, "alice");

    let response = app
        .clone()
        .oneshot(get_request("/auth?action=logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("larder_session=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logged out successfully.");

    // The old cookie no longer names a session
    let response = app
        .oneshot(get_request("/auth?action=check", Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["logged_in"], false);
}

#[tokio::test]
async fn logout_without_a_session_still_succeeds() {
    let (app, _) = test_app();

    let response = app.oneshot(get_request("/auth?action=logout", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn signup_rejects_missing_fields() {
    let (app, _) = test_app();

    for body in [
        "action=signup&username=&password=secret",
        "action=signup&username=alice&password=",
        "action=signup&username=%20%20&password=secret",
        "action=signup",
    ] {
        let response = app
            .clone()
            .oneshot(form_request("POST", "/auth", body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Please fill all fields.");
    }
}

#[tokio::test]
async fn unknown_action_is_rejected_with_a_parseable_body() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(form_request("POST", "/auth", "action=frobnicate", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Unknown action.");

    let response = app.oneshot(get_request("/auth", None)).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unknown action.");
}

#[tokio::test]
async fn body_action_overrides_query_action() {
    let (app, _) = test_app();

    // If the query side won, this would be a login attempt and would hit
    // the (unreachable) store instead of signup's field validation.
    let response = app
        .oneshot(form_request(
            "POST",
            "/auth?action=login",
            "action=signup&username=&password=",
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please fill all fields.");
}

#[tokio::test]
async fn delete_without_an_id_is_rejected_before_the_store() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 1, "alice");

    let response = app
        .oneshot(form_request("DELETE", "/recipes", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing recipe ID.");
}

#[tokio::test]
async fn unknown_recipe_action_is_rejected() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 1, "alice");

    let response = app
        .oneshot(form_request(
            "POST",
            "/recipes",
            "action=duplicate&title=Tea",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Unknown action.");
}

#[tokio::test]
async fn unreachable_store_reports_a_generic_failure() {
    let (app, sessions) = test_app();
    let cookie = cookie_for(&sessions, 1, "alice");

    // Login path: fails while looking up the user
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/auth",
            "action=login&username=alice&password=secret",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Database connection failed.");

    // Recipe path: authenticated, fails checking out a connection
    let response = app
        .oneshot(form_request(
            "POST",
            "/recipes",
            "action=create&title=Tea&ingredients=water&instructions=boil",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Database connection failed.");
}
