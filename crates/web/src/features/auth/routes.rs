use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_profile, login, logout, refresh_token, update_profile, validate_token};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/validate", get(validate_token))
        .route("/logout", post(logout))
        .route("/profile", get(get_profile).put(update_profile))
}
