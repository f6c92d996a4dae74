use crate::models::DbSetting;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_settings(pool: &Pool<Postgres>) -> Result<Vec<DbSetting>> {
    let settings = sqlx::query_as::<_, DbSetting>(
        r#"
        SELECT id, key, value, label, category
        FROM settings
        ORDER BY category ASC, key ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(settings)
}

/// Writes every `(key, value)` pair in one transaction.
///
/// Returns the keys that matched no stored setting; nothing is written
/// in that case.
pub async fn update_settings(
    pool: &Pool<Postgres>,
    values: &[(String, String)],
) -> Result<Vec<String>> {
    let mut tx = pool.begin().await?;
    let mut unknown = Vec::new();

    for (key, value) in values {
        let result = sqlx::query("UPDATE settings SET value = $2 WHERE key = $1")
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            unknown.push(key.clone());
        }
    }

    if unknown.is_empty() {
        tx.commit().await?;
        tracing::debug!("Updated {} settings", values.len());
    } else {
        tx.rollback().await?;
    }

    Ok(unknown)
}
