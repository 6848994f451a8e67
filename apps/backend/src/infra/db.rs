//! Connection setup and startup migration.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

fn engine_name(profile: &DbProfile) -> &'static str {
    match profile {
        DbProfile::Prod | DbProfile::Test => "postgresql",
        DbProfile::InMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays; returns the last
/// error once attempts run out.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!("connection_retry=success attempts={attempt} interval_ms={interval_ms}");
                }
                return Ok(conn);
            }
            Err(err) if attempt < max_attempts => {
                warn!(
                    error = %err,
                    "connection_retry=failed attempt={attempt} max_attempts={max_attempts} interval_ms={interval_ms}"
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Open a connection for `profile`. Does not run migrations.
///
/// The in-memory profile gets a pool of exactly one connection that never
/// idles out, since every SQLite `:memory:` connection is its own database.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile.clone())?;

    match profile {
        DbProfile::InMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite options: {e}")))?
                .foreign_keys(true);

            let pool: SqlitePool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(Duration::from_secs(5))
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to open SQLite pool: {e}")))?;

            info!("pool=create engine=sqlite path={url} min=1 max=1");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbProfile::Prod | DbProfile::Test => {
            let mut opt = ConnectOptions::new(url);
            opt.min_connections(1)
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(5))
                .sqlx_logging(false);

            let db = retry_connection(
                || {
                    let opt = opt.clone();
                    async move {
                        Database::connect(opt).await.map_err(|e| {
                            AppError::db_unavailable(format!("failed to connect to Postgres: {e}"))
                        })
                    }
                },
                CONNECT_ATTEMPTS,
                CONNECT_RETRY_INTERVAL_MS,
            )
            .await?;

            info!("pool=create engine=postgresql min=1 max=10");
            Ok(db)
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    info!(
        "bootstrap=start profile={profile:?} engine={} pid={}",
        engine_name(&profile),
        std::process::id()
    );

    let db = connect_db(profile).await?;

    migration::migrate(&db, MigrationCommand::Up).await?;
    let applied = migration::count_applied_migrations(&db).await?;

    info!("bootstrap=ready migrations_applied={applied}");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;

    #[tokio::test]
    async fn in_memory_bootstrap_creates_schema() {
        let db = bootstrap_db(DbProfile::InMemory).await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM drawn_numbers",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), AppError> = retry_connection(
            || {
                calls += 1;
                async { Err(AppError::db_unavailable("down")) }
            },
            3,
            1,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }
}
