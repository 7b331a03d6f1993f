use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn get_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Creates the booking table if this database has never seen it.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "Booking" (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            "startTime" TIMESTAMPTZ NOT NULL,
            "endTime" TIMESTAMPTZ,
            "roomId" TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
