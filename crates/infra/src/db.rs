//! Schema bootstrap for the backing store.

use sqlx::PgPool;
use tracing::instrument;

/// Create the `products` and `customers` tables if they do not exist.
///
/// Idempotent; run it once at startup before handing pools to repositories.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            price BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            street TEXT,
            number INTEGER,
            zip TEXT,
            city TEXT,
            active BOOLEAN NOT NULL DEFAULT FALSE,
            reward_points BIGINT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
