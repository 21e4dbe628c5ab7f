use std::str::FromStr;

use super::{must_var, var_or};
use crate::error::AppError;

/// Which database backend to connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL, configured from `POSTGRES_*` / `BANK_DB*` variables
    Postgres,
    /// Private in-memory SQLite database (tests, local experiments)
    SqliteMemory,
}

impl DbKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteMemory => "sqlite-memory",
        }
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(DbKind::Postgres),
            "sqlite-memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown database kind '{other}' (expected 'postgres' or 'sqlite-memory')"
            ))),
        }
    }
}

/// Connection URL for the in-memory SQLite database.
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Builds a database URL from environment variables for the given backend
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = var_or("POSTGRES_HOST", "localhost".to_string())?;
            let port = var_or("POSTGRES_PORT", 5432u16)?;
            let db_name = must_var("BANK_DB")?;
            let username = must_var("BANK_DB_USER")?;
            let password = must_var("BANK_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteMemory => Ok(SQLITE_MEMORY_URL.to_string()),
    }
}

/// Strip the password from a connection URL before logging it
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}
