use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_judge, get_judge_scores, list_judges};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_judge).get(list_judges))
        .route("/:id/scores", get(get_judge_scores))
}
