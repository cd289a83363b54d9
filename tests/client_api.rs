//! Desktop client API tests
//!
//! Runs `ApiClient` against a wiremock server to check how requests are
//! built and how error responses are surfaced.

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use poetica::egui_app::api::AUTHOR_PAGE_SIZE;
use poetica::egui_app::{ApiClient, ApiError, Config, Session, SessionHandle};
use poetica::shared::{AppConfig, LoginRequest, PageRequest};

fn client_for(server: &MockServer) -> (ApiClient, SessionHandle) {
    let config = Config::with_builder(AppConfig::builder().server_url(server.uri())).unwrap();
    let session = Session::new().handle();
    (ApiClient::new(config, session.clone()), session)
}

fn user_json(id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "username": "basho",
        "email": "basho@example.com",
        "profile": {},
        "followers": [],
        "following": [],
        "createdAt": "2024-05-01T12:00:00Z",
    })
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "abc", "user": user_json(id) })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let response = client
        .login(&LoginRequest {
            email: "basho@example.com".to_string(),
            password: "frogpond".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "abc");
    assert_eq!(response.user.id, id);
    assert_eq!(response.user.username, "basho");
}

#[tokio::test]
async fn test_token_is_read_from_session_per_request() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer first-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer second-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id)))
        .expect(1)
        .mount(&server)
        .await;
    let (client, session) = client_for(&server);

    session.write().unwrap().resume("first-token".to_string());
    client.me().await.unwrap();

    session.write().unwrap().resume("second-token".to_string());
    client.me().await.unwrap();
}

#[tokio::test]
async fn test_anonymous_request_without_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "No token, authorization denied" })),
        )
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let err = client.me().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "No token, authorization denied");
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_listing_sends_page_and_author_query() {
    let server = MockServer::start().await;
    let author = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/poems"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("authorId", author.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poems": [],
            "pagination": { "page": 2, "pages": 2, "total": 7 },
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let listing = client
        .list_poems(PageRequest::new(2, 5), Some(author))
        .await
        .unwrap();

    assert!(listing.poems.is_empty());
    assert_eq!(listing.pagination.total, 7);
    assert!(listing.pagination.has_previous());
}

fn poem_json(author: Uuid, title: &str, is_published: bool) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "content": "an old silent pond",
        "category": "nature",
        "tags": [],
        "author": { "id": author, "username": "basho" },
        "isPublished": is_published,
        "likes": [],
        "comments": [],
        "createdAt": "2024-05-01T12:00:00Z",
        "updatedAt": "2024-05-01T12:00:00Z",
    })
}

#[tokio::test]
async fn test_all_poems_by_author_follows_every_page() {
    let server = MockServer::start().await;
    let author = Uuid::new_v4();
    let limit = AUTHOR_PAGE_SIZE.to_string();
    Mock::given(method("GET"))
        .and(path("/poems"))
        .and(query_param("page", "1"))
        .and(query_param("limit", limit.as_str()))
        .and(query_param("authorId", author.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poems": [poem_json(author, "Frog", true), poem_json(author, "Pond", false)],
            "pagination": { "page": 1, "pages": 2, "total": 3 },
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/poems"))
        .and(query_param("page", "2"))
        .and(query_param("authorId", author.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poems": [poem_json(author, "Splash", true)],
            "pagination": { "page": 2, "pages": 2, "total": 3 },
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let poems = client.list_all_poems_by(author).await.unwrap();

    let titles: Vec<&str> = poems.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Frog", "Pond", "Splash"]);
    assert_eq!(poems.iter().filter(|p| !p.is_published).count(), 1);
}

#[tokio::test]
async fn test_all_poems_by_author_with_no_poems() {
    let server = MockServer::start().await;
    let author = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/poems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poems": [],
            "pagination": { "page": 1, "pages": 0, "total": 0 },
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    assert!(client.list_all_poems_by(author).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_envelope_becomes_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Not authorized" })))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let err = client.delete_poem(Uuid::new_v4()).await.unwrap_err();

    assert_matches!(
        err,
        ApiError::Server { status: 403, ref message } if message == "Not authorized"
    );
}

#[tokio::test]
async fn test_error_without_envelope_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let err = client.get_poem(Uuid::new_v4()).await.unwrap_err();

    assert_matches!(
        err,
        ApiError::Server { status: 502, ref message } if message == "Bad Gateway"
    );
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes": "many" })))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server);

    let err = client.like_poem(Uuid::new_v4()).await.unwrap_err();

    assert_matches!(err, ApiError::Decode(_));
    assert_eq!(err.user_message(), poetica::egui_app::api::GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let (client, _) = client_for(&server);
    drop(server);

    let err = client.get_user(Uuid::new_v4()).await.unwrap_err();

    assert_matches!(err, ApiError::Network(_));
}
