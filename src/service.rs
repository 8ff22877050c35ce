//! Listing, searching, creating and deleting questions.
//!
//! Every listing goes through [`paginate`] and reports an empty page as
//! [`ApiError::NotFound`], whether the result set is empty or the page is
//! simply past its end.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::error::ApiError;
use crate::pagination::paginate;

/// Category id to category type, serialized as a JSON object.
pub type CategoryMap = BTreeMap<i64, String>;

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub success: bool,
    pub categories: CategoryMap,
    #[serde(rename = "Total categories")]
    pub total_categories: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub current_category: Option<String>,
}

/// Fields of a question to be created, as they arrived.
#[derive(Debug, Default)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

pub async fn category_map(pool: &SqlitePool) -> Result<CategoryMap, ApiError> {
    Ok(categories::get_all_categories(pool)
        .await?
        .into_iter()
        .map(|category| (category.id, category.kind))
        .collect())
}

pub async fn list_categories(pool: &SqlitePool) -> Result<CategoryListing, ApiError> {
    let categories = category_map(pool).await?;
    Ok(CategoryListing {
        success: true,
        total_categories: categories.len(),
        categories,
    })
}

fn page_of(all: Vec<Question>, page: i64) -> Result<(Vec<Question>, usize), ApiError> {
    let total = all.len();
    let questions = paginate(all, page);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok((questions, total))
}

pub async fn list_questions(pool: &SqlitePool, page: i64) -> Result<QuestionPage, ApiError> {
    let (questions, total_questions) = page_of(questions::get_all_questions(pool).await?, page)?;
    Ok(QuestionPage {
        success: true,
        questions,
        total_questions,
        categories: Some(category_map(pool).await?),
        current_category: None,
    })
}

pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    page: i64,
) -> Result<QuestionPage, ApiError> {
    let (questions, total_questions) =
        page_of(questions::search_questions(pool, term).await?, page)?;
    Ok(QuestionPage {
        success: true,
        questions,
        total_questions,
        categories: Some(category_map(pool).await?),
        current_category: None,
    })
}

/// `current_category` is null when questions reference a category id with no
/// category row.
pub async fn questions_for_category(
    pool: &SqlitePool,
    category: i64,
    page: i64,
) -> Result<QuestionPage, ApiError> {
    let (questions, total_questions) = page_of(
        questions::get_questions_for_category(pool, category).await?,
        page,
    )?;
    let current = categories::get_category(pool, category).await?;
    Ok(QuestionPage {
        success: true,
        questions,
        total_questions,
        categories: None,
        current_category: current.map(|c| c.kind),
    })
}

/// Rejects an empty or missing question or answer before touching the store.
/// Category and difficulty are stored as given.
pub async fn create_question(
    pool: &SqlitePool,
    draft: QuestionDraft,
) -> Result<Question, ApiError> {
    let question = draft
        .question
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ApiError::BadInput("question text is required".to_owned()))?;
    let answer = draft
        .answer
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ApiError::BadInput("answer text is required".to_owned()))?;

    let id = questions::create_question(pool, &question, &answer, draft.category, draft.difficulty)
        .await
        .map_err(ApiError::Unprocessable)?;
    // the row is stored at this point, so a failed read-back is a read failure
    let created = questions::get_question_by_id(pool, id)
        .await?
        .ok_or(ApiError::Store(sqlx::Error::RowNotFound))?;

    tracing::info!(id, category = created.category, "Created question");
    Ok(created)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<i64, ApiError> {
    if questions::get_question_by_id(pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let removed = questions::delete_question(pool, id)
        .await
        .map_err(ApiError::Unprocessable)?;
    // deleted by a concurrent request between lookup and delete
    if removed == 0 {
        return Err(ApiError::NotFound);
    }

    tracing::info!(id, "Deleted question");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory;
    use crate::db::queries::categories::{import_categories, Category};
    use crate::db::queries::questions::{count_questions, get_question_by_id};

    async fn seeded(questions_count: i64) -> SqlitePool {
        let pool = in_memory().await.unwrap();
        import_categories(
            &pool,
            vec![
                Category {
                    id: 1,
                    kind: "Science".into(),
                },
                Category {
                    id: 2,
                    kind: "Art".into(),
                },
            ],
        )
        .await
        .unwrap();
        for n in 1..=questions_count {
            questions::create_question(
                &pool,
                &format!("Question number {n}"),
                &format!("Answer {n}"),
                Some(n % 2 + 1),
                Some(n % 5 + 1),
            )
            .await
            .unwrap();
        }
        pool
    }

    fn draft(question: &str, answer: &str) -> QuestionDraft {
        QuestionDraft {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(1),
            difficulty: Some(3),
        }
    }

    #[tokio::test]
    async fn categories_are_mapped_and_counted() {
        let pool = seeded(0).await;
        let listing = list_categories(&pool).await.unwrap();

        assert_eq!(listing.total_categories, 2);
        assert_eq!(listing.categories[&1], "Science");
        assert_eq!(listing.categories[&2], "Art");
    }

    #[tokio::test]
    async fn listing_pages_through_all_questions() {
        let pool = seeded(23).await;

        let first = list_questions(&pool, 1).await.unwrap();
        assert_eq!(first.total_questions, 23);
        assert_eq!(
            first.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
        assert_eq!(first.categories.unwrap().len(), 2);
        assert!(first.current_category.is_none());

        let last = list_questions(&pool, 3).await.unwrap();
        assert_eq!(last.questions.len(), 3);
        assert_eq!(last.questions[0].id, 21);
    }

    #[tokio::test]
    async fn page_past_the_end_is_not_found() {
        let pool = seeded(10).await;
        assert!(matches!(
            list_questions(&pool, 2).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let pool = seeded(0).await;
        assert!(matches!(
            list_questions(&pool, 1).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn search_finds_single_match() {
        let pool = seeded(12).await;
        let page = search_questions(&pool, "number 12", 1).await.unwrap();

        assert_eq!(page.total_questions, 1);
        assert_eq!(page.questions[0].id, 12);
        assert!(matches!(
            search_questions(&pool, "nowhere", 1).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn category_listing_names_current_category() {
        let pool = seeded(6).await;
        let page = questions_for_category(&pool, 2, 1).await.unwrap();

        assert_eq!(page.current_category.as_deref(), Some("Art"));
        assert!(page.categories.is_none());
        assert_eq!(
            page.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[tokio::test]
    async fn category_without_questions_is_not_found() {
        let pool = seeded(6).await;
        assert!(matches!(
            questions_for_category(&pool, 9, 1).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn create_stores_question() {
        let pool = seeded(3).await;
        let created = create_question(&pool, draft("Who discovered penicillin?", "Fleming"))
            .await
            .unwrap();

        assert_eq!(count_questions(&pool).await.unwrap(), 4);
        assert_eq!(
            get_question_by_id(&pool, created.id).await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn create_keeps_unknown_category() {
        let pool = seeded(0).await;
        let mut draft = draft("Question", "Answer");
        draft.category = Some(1000);

        let created = create_question(&pool, draft).await.unwrap();
        assert_eq!(created.category, 1000);
    }

    #[tokio::test]
    async fn create_rejects_empty_text() {
        let pool = seeded(3).await;
        for bad in [
            draft("", "Answer"),
            draft("Question", ""),
            QuestionDraft::default(),
        ] {
            assert!(matches!(
                create_question(&pool, bad).await,
                Err(ApiError::BadInput(_))
            ));
        }
        assert_eq!(count_questions(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn create_without_difficulty_is_unprocessable() {
        let pool = seeded(3).await;
        let mut draft = draft("Question", "Answer");
        draft.difficulty = None;

        assert!(matches!(
            create_question(&pool, draft).await,
            Err(ApiError::Unprocessable(_))
        ));
        assert_eq!(count_questions(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn failed_read_back_is_not_unprocessable() {
        let pool = seeded(3).await;
        sqlx::query("CREATE TRIGGER drop_new_questions AFTER INSERT ON questions BEGIN DELETE FROM questions WHERE id = NEW.id; END")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(
            create_question(&pool, draft("Question", "Answer")).await,
            Err(ApiError::Store(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_question_once() {
        let pool = seeded(3).await;

        assert_eq!(delete_question(&pool, 2).await.unwrap(), 2);
        assert_eq!(count_questions(&pool).await.unwrap(), 2);
        assert!(matches!(
            delete_question(&pool, 2).await,
            Err(ApiError::NotFound)
        ));
        assert_eq!(count_questions(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn store_failure_on_delete_is_unprocessable() {
        let pool = seeded(3).await;
        sqlx::query("CREATE TRIGGER keep_questions BEFORE DELETE ON questions BEGIN SELECT RAISE(ABORT, 'locked'); END")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(
            delete_question(&pool, 1).await,
            Err(ApiError::Unprocessable(_))
        ));
        assert_eq!(count_questions(&pool).await.unwrap(), 3);
    }
}
