use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::category::CategoryListResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Active scoring categories with statistics", body = CategoryListResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let categories = services::list_categories(db.pool()).await?;

    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    })
    .into_response())
}
