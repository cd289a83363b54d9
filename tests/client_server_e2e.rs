//! End-to-end: the desktop client's `ApiClient` against a real server
//! bound to an ephemeral port over an in-memory store.

#![cfg(feature = "ssr")]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use poetica::backend::{app_with_store, MemoryStore, ServerConfig};
use poetica::egui_app::{ApiClient, Config, Session, SessionHandle};
use poetica::shared::{
    AppConfig, Category, CommentRequest, CreatePoemRequest, PageRequest, Profile,
    RegisterRequest, UpdateProfileRequest,
};

async fn spawn_server() -> String {
    let config = ServerConfig {
        jwt_secret: "e2e-secret".to_string(),
        bcrypt_cost: 4,
        ..ServerConfig::default()
    };
    let app = app_with_store(Arc::new(MemoryStore::new()), config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(server_url: &str) -> (ApiClient, SessionHandle) {
    let config = Config::with_builder(AppConfig::builder().server_url(server_url)).unwrap();
    let session = Session::new().handle();
    (ApiClient::new(config, session.clone()), session)
}

async fn sign_up(client: &ApiClient, session: &SessionHandle, username: &str) {
    let auth = client
        .register(&RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    session.write().unwrap().begin(auth.token, auth.user);
}

#[tokio::test]
async fn test_poet_and_reader_session() {
    let url = spawn_server().await;
    let (poet, poet_session) = client(&url);
    let (reader, reader_session) = client(&url);
    sign_up(&poet, &poet_session, "oliver").await;
    sign_up(&reader, &reader_session, "reader").await;
    let poet_id = poet_session.read().unwrap().user_id().unwrap();
    let reader_id = reader_session.read().unwrap().user_id().unwrap();

    let poem = poet
        .create_poem(&CreatePoemRequest {
            title: "Wild Geese".to_string(),
            content: "You do not have to be good.".to_string(),
            category: Some("nature".to_string()),
            tags: vec!["geese".to_string()],
            is_published: None,
        })
        .await
        .unwrap();
    assert_eq!(poem.category, Category::Nature);
    assert!(poem.is_published);

    let listing = reader
        .list_poems(PageRequest::default(), Some(poet_id))
        .await
        .unwrap();
    assert_eq!(listing.pagination.total, 1);
    assert_eq!(listing.poems[0].id, poem.id);

    let like = reader.like_poem(poem.id).await.unwrap();
    assert!(like.is_liked);
    assert_eq!(like.likes, 1);

    let comments = reader
        .comment_on_poem(
            poem.id,
            &CommentRequest {
                text: "Beautiful".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user.id, reader_id);

    let follow = reader.follow_user(poet_id).await.unwrap();
    assert!(follow.is_following);
    let poet_view = reader.get_user(poet_id).await.unwrap();
    assert!(poet_view.is_followed_by(reader_id));

    let err = reader.delete_poem(poem.id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Not authorized");

    let reloaded = poet.get_poem(poem.id).await.unwrap();
    assert!(reloaded.is_liked_by(reader_id));
    assert_eq!(reloaded.comments[0].text, "Beautiful");
}

#[tokio::test]
async fn test_profile_update_and_logout() {
    let url = spawn_server().await;
    let (client, session) = client(&url);
    sign_up(&client, &session, "hopkins").await;

    let updated = client
        .update_profile(&UpdateProfileRequest {
            profile: Profile {
                first_name: Some("Gerard".to_string()),
                last_name: Some("Hopkins".to_string()),
                ..Profile::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(updated.display_name(), "Gerard Hopkins");

    let me = client.me().await.unwrap();
    assert_eq!(me.profile, updated.profile);

    let message = client.logout().await.unwrap();
    assert_eq!(message.message, "Logged out successfully");

    session.write().unwrap().end();
    let err = client.me().await.unwrap_err();
    assert!(err.is_unauthorized());
}
