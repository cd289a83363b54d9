//! Common test utilities and helpers
//!
//! Builds the full router over a fresh `MemoryStore` and drives it with
//! `tower::ServiceExt::oneshot`, so every test exercises routing, the auth
//! middleware, extraction, validation and the services together.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use poetica::backend::{app_with_store, MemoryStore, ServerConfig};

pub const PASSWORD: &str = "password123";

/// Cheap bcrypt and a fixed secret
pub fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        ..ServerConfig::default()
    }
}

pub fn test_app() -> Router {
    test_app_with(test_config())
}

pub fn test_app_with(config: ServerConfig) -> Router {
    app_with_store(Arc::new(MemoryStore::new()), config)
}

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// Field names listed in a validation error
    pub fn error_fields(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse { status, body }
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(app, Method::DELETE, uri, token, None).await
}

/// A registered user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

impl TestUser {
    pub fn token(&self) -> Option<&str> {
        Some(&self.token)
    }
}

pub async fn register(app: &Router, username: &str) -> TestUser {
    let response = post(
        app,
        "/auth/register",
        None,
        json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    TestUser {
        id: response.body["user"]["id"].as_str().unwrap().to_string(),
        username: username.to_string(),
        token: response.body["token"].as_str().unwrap().to_string(),
    }
}

pub async fn create_poem(app: &Router, author: &TestUser, title: &str, published: bool) -> Value {
    let response = post(
        app,
        "/poems",
        author.token(),
        json!({
            "title": title,
            "content": format!("{}\nsecond line", title),
            "category": "nature",
            "tags": ["test"],
            "isPublished": published,
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
