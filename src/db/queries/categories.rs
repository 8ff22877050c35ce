use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory;

    #[tokio::test]
    async fn categories_are_listed_by_id() {
        let pool = in_memory().await.unwrap();
        import_categories(
            &pool,
            vec![
                Category {
                    id: 3,
                    kind: "Geography".into(),
                },
                Category {
                    id: 1,
                    kind: "Science".into(),
                },
            ],
        )
        .await
        .unwrap();

        let ids: Vec<i64> = get_all_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn missing_category_is_none() {
        let pool = in_memory().await.unwrap();
        import_categories(
            &pool,
            vec![Category {
                id: 2,
                kind: "Art".into(),
            }],
        )
        .await
        .unwrap();

        assert_eq!(get_category(&pool, 2).await.unwrap().unwrap().kind, "Art");
        assert!(get_category(&pool, 3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_import_rolls_back() {
        let pool = in_memory().await.unwrap();
        let science = Category {
            id: 1,
            kind: "Science".into(),
        };
        let result = import_categories(&pool, vec![science.clone(), science]).await;

        assert!(result.is_err());
        assert!(get_all_categories(&pool).await.unwrap().is_empty());
    }
}
