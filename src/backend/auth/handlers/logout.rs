//! `POST /auth/logout`. Tokens are stateless, so there is nothing to revoke;
//! the client drops its session.

use axum::Json;

use crate::shared::MessageResponse;

pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
