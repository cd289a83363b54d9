/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register`
 * - `POST /auth/login`
 * - `POST /auth/logout`
 * - `GET /auth/me` (auth)
 *
 * ## Poems
 * - `GET /poems`, `POST /poems` (auth)
 * - `GET /poems/{id}`, `PUT /poems/{id}` (auth), `DELETE /poems/{id}` (auth)
 * - `POST /poems/{id}/like` (auth)
 * - `POST /poems/{id}/comment` (auth)
 *
 * ## Users
 * - `GET /users/profile` (auth), `PUT /users/profile` (auth)
 * - `GET /users/{id}`
 * - `POST /users/follow/{id}` (auth)
 *
 * Authentication is attached per method with `route_layer`, so a public
 * `GET` and a protected `POST` can share one path.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, logout, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::poems::handlers::{
    comment_on_poem, create_poem, delete_poem, get_poem, like_poem, list_poems, update_poem,
};
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{follow_user, get_profile, get_user, update_profile};

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let auth = || from_fn_with_state(app_state.clone(), auth_middleware);

    router
        // Authentication endpoints
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me).route_layer(auth()))
        // Poem endpoints
        .route(
            "/poems",
            get(list_poems).merge(post(create_poem).route_layer(auth())),
        )
        .route(
            "/poems/{id}",
            get(get_poem).merge(put(update_poem).delete(delete_poem).route_layer(auth())),
        )
        .route("/poems/{id}/like", post(like_poem).route_layer(auth()))
        .route("/poems/{id}/comment", post(comment_on_poem).route_layer(auth()))
        // User endpoints
        .route(
            "/users/profile",
            get(get_profile).put(update_profile).route_layer(auth()),
        )
        .route("/users/follow/{id}", post(follow_user).route_layer(auth()))
        .route("/users/{id}", get(get_user))
}
