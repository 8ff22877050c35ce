use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{deserialize_default_from_null, deserialize_number_from_string};
use sqlx::SqlitePool;

use crate::{
    db::Question,
    quiz::{next_quiz_question, ANY_CATEGORY},
    server::{app::AppState, extract::AppJson},
    telemetry::{QUIZ_QUESTIONS_SERVED, QUIZ_SESSIONS_EXHAUSTED},
};

use super::ApiResponse;

// the client sends category ids taken from JSON object keys, so they may be strings
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    previous_questions: HashSet<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = request.quiz_category.id;
    let question = next_quiz_question(&pool, category, &request.previous_questions).await?;

    match &question {
        Some(_) => {
            let label = if category == ANY_CATEGORY {
                "any".to_owned()
            } else {
                category.to_string()
            };
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[label.as_str()])
                .inc();
        }
        None => QUIZ_SESSIONS_EXHAUSTED.inc(),
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
