//! Embedded SQLite migrations.
//!
//! Migrations are compiled in with `include_str!` and tracked in the
//! `_anteroom_migrations` table, so `run` is safe to call on every
//! startup.
//!
//! ```rust,ignore
//! use anteroom::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await
//! }
//! ```

use sqlx::{Executor, SqlitePool};

const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250712000001_create_user_table",
        include_str!("../../migrations_sqlite/core/20250712000001_create_user_table.sql"),
    ),
    (
        "20250712000002_create_account_table",
        include_str!("../../migrations_sqlite/core/20250712000002_create_account_table.sql"),
    ),
    (
        "20250712000003_create_session_table",
        include_str!("../../migrations_sqlite/core/20250712000003_create_session_table.sql"),
    ),
    (
        "20250712000004_create_tasks_table",
        include_str!("../../migrations_sqlite/core/20250712000004_create_tasks_table.sql"),
    ),
];

/// Runs all pending migrations in order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _anteroom_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    run_migrations(pool, CORE_MIGRATIONS).await
}

/// Statements are split on semicolons; the bundled migrations avoid
/// semicolons inside string literals.
async fn run_migrations(pool: &SqlitePool, migrations: &[(&str, &str)]) -> Result<(), sqlx::Error> {
    for (name, sql) in migrations {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _anteroom_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if !applied {
            for statement in sql.split(';') {
                let trimmed = statement.trim();
                if !trimmed.is_empty() {
                    pool.execute(trimmed).await?;
                }
            }

            sqlx::query("INSERT INTO _anteroom_migrations (name) VALUES (?)")
                .bind(*name)
                .execute(pool)
                .await?;
        }
    }
    Ok(())
}
