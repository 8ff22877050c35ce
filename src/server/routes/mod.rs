mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::Deserialize;

use crate::error::ApiError;
use crate::server::deserializers::{deserialize_page, first_page};

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

// a path segment that is not a number cannot name a stored row
fn parse_id(raw: &str) -> ApiResponse<i64> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
