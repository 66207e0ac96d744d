//! HTTP-level tests for sign-up, sign-in and bearer-token enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use serde_json::json;
use sqlx::PgPool;

fn sign_up_body(username: &str, password: &str) -> serde_json::Value {
    json!({
        "name": "Ada",
        "color": "#ff0000",
        "username": username,
        "password": password,
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_returns_new_id(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/auth/sign-up",
        sign_up_body("ada", "long-enough-pw"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'ada'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2id$"));
    assert!(!stored.contains("long-enough-pw"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username_is_conflict(pool: PgPool) {
    let first = post_json(
        common::build_test_app(pool.clone()),
        "/auth/sign-up",
        sign_up_body("ada", "long-enough-pw"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        common::build_test_app(pool),
        "/auth/sign-up",
        sign_up_body("ada", "another-password"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_short_password_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/auth/sign-up",
        sign_up_body("ada", "short"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_in_token_opens_the_api(pool: PgPool) {
    let token = common::sign_up_and_in(&pool, "ada").await;

    let response = get_auth(common::build_test_app(pool), "/api/lists", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    common::sign_up_and_in(&pool, "ada").await;

    let wrong_password = post_json(
        common::build_test_app(pool.clone()),
        "/auth/sign-in",
        json!({ "username": "ada", "password": "not-the-password" }),
    )
    .await;
    let unknown_user = post_json(
        common::build_test_app(pool),
        "/auth/sign-in",
        json!({ "username": "grace", "password": "correct-horse-battery" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_user).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/lists").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_forged_token_is_unauthorized(pool: PgPool) {
    let response = get_auth(common::build_test_app(pool), "/api/lists", "abc.def.ghi").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
