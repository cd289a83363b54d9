//! User API integration tests
//!
//! Profiles, public user records and the follow toggle.

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_profile_requires_auth() {
    let app = test_app();
    assert_eq!(get(&app, "/users/profile", None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        put(&app, "/users/profile", None, json!({ "profile": {} })).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_get_own_profile() {
    let app = test_app();
    let user = register(&app, "angelou").await;

    let response = get(&app, "/users/profile", user.token()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user.id.as_str());
    assert_eq!(response.body["email"], "angelou@example.com");
    assert_eq!(response.body["followers"], json!([]));
    assert_eq!(response.body["following"], json!([]));
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_update_profile() {
    let app = test_app();
    let user = register(&app, "angelou").await;

    let response = put(
        &app,
        "/users/profile",
        user.token(),
        json!({
            "profile": {
                "firstName": " Maya ",
                "lastName": "Angelou",
                "bio": "And still I rise.",
                "location": "   ",
            }
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["profile"],
        json!({ "firstName": "Maya", "lastName": "Angelou", "bio": "And still I rise." })
    );

    let reloaded = get(&app, "/users/profile", user.token()).await;
    assert_eq!(reloaded.body["profile"], response.body["profile"]);
}

#[tokio::test]
async fn test_update_profile_replaces_previous_values() {
    let app = test_app();
    let user = register(&app, "angelou").await;
    put(
        &app,
        "/users/profile",
        user.token(),
        json!({ "profile": { "bio": "first", "location": "St. Louis" } }),
    )
    .await;

    let response = put(
        &app,
        "/users/profile",
        user.token(),
        json!({ "profile": { "bio": "second" } }),
    )
    .await;

    assert_eq!(response.body["profile"], json!({ "bio": "second" }));
}

#[tokio::test]
async fn test_update_profile_rejects_long_fields() {
    let app = test_app();
    let user = register(&app, "angelou").await;

    let response = put(
        &app,
        "/users/profile",
        user.token(),
        json!({ "profile": { "firstName": "x".repeat(51), "bio": "y".repeat(501) } }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_fields(), vec!["firstName", "bio"]);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = test_app();
    let user = register(&app, "neruda").await;

    let response = get(&app, &format!("/users/{}", user.id), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "neruda");
}

#[tokio::test]
async fn test_get_missing_user() {
    let app = test_app();

    let unknown = get(&app, &format!("/users/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "User not found");

    let malformed = get(&app, "/users/neruda", None).await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_then_unfollow() {
    let app = test_app();
    let fan = register(&app, "fan").await;
    let poet = register(&app, "neruda").await;
    let uri = format!("/users/follow/{}", poet.id);

    let followed = post(&app, &uri, fan.token(), json!({})).await;
    assert_eq!(followed.status, StatusCode::OK);
    assert_eq!(followed.body, json!({ "message": "Followed", "isFollowing": true }));

    let poet_view = get(&app, &format!("/users/{}", poet.id), None).await;
    assert_eq!(
        poet_view.body["followers"],
        json!([{ "id": fan.id, "username": "fan" }])
    );
    let fan_view = get(&app, "/users/profile", fan.token()).await;
    assert_eq!(
        fan_view.body["following"],
        json!([{ "id": poet.id, "username": "neruda" }])
    );

    let unfollowed = post(&app, &uri, fan.token(), json!({})).await;
    assert_eq!(unfollowed.body, json!({ "message": "Unfollowed", "isFollowing": false }));

    let poet_view = get(&app, &format!("/users/{}", poet.id), None).await;
    assert_eq!(poet_view.body["followers"], json!([]));
    let fan_view = get(&app, "/users/profile", fan.token()).await;
    assert_eq!(fan_view.body["following"], json!([]));
}

#[tokio::test]
async fn test_cannot_follow_yourself() {
    let app = test_app();
    let user = register(&app, "narcissus").await;

    let response = post(&app, &format!("/users/follow/{}", user.id), user.token(), json!({})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "You cannot follow yourself");
}

#[tokio::test]
async fn test_follow_unknown_user() {
    let app = test_app();
    let fan = register(&app, "fan").await;

    let response = post(
        &app,
        &format!("/users/follow/{}", uuid::Uuid::new_v4()),
        fan.token(),
        json!({}),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "User not found");

    let fan_view = get(&app, "/users/profile", fan.token()).await;
    assert_eq!(fan_view.body["following"], json!([]));
}

#[tokio::test]
async fn test_follow_requires_auth() {
    let app = test_app();
    let poet = register(&app, "neruda").await;
    let response = post(&app, &format!("/users/follow/{}", poet.id), None, json!({})).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
