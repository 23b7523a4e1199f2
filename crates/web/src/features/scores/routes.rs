use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_recent_scores, submit_score};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(submit_score))
        .route("/recent", get(get_recent_scores))
}
