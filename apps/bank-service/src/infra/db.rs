use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, trace, warn};

use crate::config::db::{db_url, sanitize_db_url, DbKind};
use crate::error::AppError;

const PG_POOL_MAX: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Retry a connection attempt with fixed interval delays
/// Returns the result of the last attempt after all retries are exhausted
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
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open a pool for `kind`. Does NOT run any migrations.
///
/// The in-memory SQLite pool holds exactly one connection that never
/// expires: every new connection would be a fresh, empty database.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    match kind {
        DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?;

            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        sqlx::query("PRAGMA foreign_keys = ON;")
                            .execute(&mut *conn)
                            .await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| {
                    AppError::config(format!("failed to create SQLite connection pool: {e}"))
                })?;

            info!(engine = "sqlite", path = %url, "pool=create");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            info!(engine = "postgres", url = %sanitize_db_url(&url), "pool=connecting");

            // Retry on startup for Postgres only (max 5 tries, 0.5s interval)
            let pool = retry_connection(
                || {
                    let url = url.clone();
                    async move {
                        PgPoolOptions::new()
                            .min_connections(1)
                            .max_connections(PG_POOL_MAX)
                            .acquire_timeout(ACQUIRE_TIMEOUT)
                            .idle_timeout(Duration::from_secs(30))
                            .after_connect(|conn, _meta| {
                                Box::pin(async move {
                                    sqlx::query("SET timezone = 'UTC';")
                                        .execute(&mut *conn)
                                        .await?;
                                    Ok::<_, sqlx::Error>(())
                                })
                            })
                            .connect(&url)
                            .await
                            .map_err(|e| {
                                AppError::config(format!("failed to connect to Postgres: {e}"))
                            })
                    }
                },
                5,
                500,
            )
            .await?;

            info!(engine = "postgres", max = PG_POOL_MAX, "pool=create");
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Build the app DB *and* guarantee schema is current.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(db_kind = ?kind, pid = std::process::id(), "bootstrap=start");

    let conn = connect_db(kind).await?;
    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;

    info!(db_kind = ?kind, "bootstrap=ready");
    Ok(conn)
}
