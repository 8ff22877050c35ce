use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use crate::{
    server::{
        app::AppState,
        extract::{AppPath, AppQuery},
    },
    service::{self, CategoryListing, QuestionPage},
};

use super::{parse_id, ApiResponse, PageQuery};

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoryListing>> {
    Ok(Json(service::list_categories(&pool).await?))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<String>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
) -> ApiResponse<Json<QuestionPage>> {
    let id = parse_id(&id)?;
    Ok(Json(service::questions_for_category(&pool, id, page).await?))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
