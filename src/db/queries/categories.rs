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
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn count_categories(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM categories
        "#,
    )
    .fetch_one(pool)
    .await
}

/// Returns the id the store assigned, one past the highest existing id.
pub async fn create_category(pool: &SqlitePool, kind: &str) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts categories keeping their ids, relabelling the ones that already exist.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn categories_come_back_ordered_by_id() {
        let pool = memory_pool().await;
        import_categories(
            &pool,
            vec![
                Category { id: 2, kind: "Sports".into() },
                Category { id: 1, kind: "Science".into() },
            ],
        )
        .await
        .unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(count_categories(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn import_relabels_existing_category() {
        let pool = memory_pool().await;
        let id = create_category(&pool, "Art").await.unwrap();
        import_categories(&pool, vec![Category { id, kind: "History".into() }])
            .await
            .unwrap();

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories, vec![Category { id, kind: "History".into() }]);
    }
}
