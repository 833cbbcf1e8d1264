use sqlx::{Pool, Postgres};
use tracing::info;

/// Apply the embedded `users`/`jobs` schema migrations.
///
/// Safe to run on every start: sqlx records applied versions in
/// `_sqlx_migrations` and skips them.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    info!("Database migrations completed successfully");
    Ok(())
}
