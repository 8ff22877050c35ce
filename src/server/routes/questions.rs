use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    server::{
        app::AppState,
        extract::{AppJson, AppPath, AppQuery},
    },
    service::{self, QuestionDraft, QuestionPage},
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{parse_id, ApiResponse, PageQuery};

// browser forms send category and difficulty as strings
#[derive(Deserialize)]
struct NewQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl From<NewQuestion> for QuestionDraft {
    fn from(new: NewQuestion) -> Self {
        QuestionDraft {
            question: new.question,
            answer: new.answer,
            category: new.category,
            difficulty: new.difficulty,
        }
    }
}

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted: String,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
) -> ApiResponse<Json<QuestionPage>> {
    Ok(Json(service::list_questions(&pool, page).await?))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(new_question): AppJson<NewQuestion>,
) -> ApiResponse<Json<CreatedQuestion>> {
    let question = service::create_question(&pool, new_question.into()).await?;
    QUESTIONS_CREATED.inc();
    Ok(Json(CreatedQuestion {
        success: true,
        question,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<String>,
) -> ApiResponse<Json<DeletedQuestion>> {
    let id = service::delete_question(&pool, parse_id(&id)?).await?;
    QUESTIONS_DELETED.inc();
    Ok(Json(DeletedQuestion {
        success: true,
        deleted: id.to_string(),
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
    AppJson(search): AppJson<SearchRequest>,
) -> ApiResponse<Json<QuestionPage>> {
    Ok(Json(
        service::search_questions(&pool, &search.search_term, page).await?,
    ))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/results", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
