//! Quiz question selection.
//!
//! Each call receives the full set of ids the player has already seen; nothing
//! about a play session is kept between calls.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::db::queries::questions::{get_all_questions, get_questions_for_category};
use crate::db::Question;

/// `quiz_category.id` meaning "questions from every category".
pub const ANY_CATEGORY: i64 = 0;

/// Picks uniformly among the candidates whose id is not in `seen`.
/// `None` once every candidate has been seen.
pub fn choose_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    seen: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question> {
    candidates
        .into_iter()
        .filter(|question| !seen.contains(&question.id))
        .choose(rng)
}

pub async fn next_quiz_question(
    pool: &SqlitePool,
    category: i64,
    seen: &HashSet<i64>,
) -> sqlx::Result<Option<Question>> {
    let candidates = if category == ANY_CATEGORY {
        get_all_questions(pool).await?
    } else {
        get_questions_for_category(pool, category).await?
    };
    let pool_size = candidates.len();
    let question = choose_unseen(candidates, seen, &mut rand::thread_rng());
    tracing::debug!(
        category,
        pool_size,
        seen = seen.len(),
        exhausted = question.is_none(),
        "Selected quiz question"
    );
    Ok(question)
}
