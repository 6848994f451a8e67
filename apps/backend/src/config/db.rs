use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production Postgres database
    Prod,
    /// Test Postgres database - enforces the `_test` suffix
    Test,
    /// Private SQLite in-memory database, one per connection
    InMemory,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Builds a database URL for the profile.
///
/// `DATABASE_URL` wins for the Postgres profiles when set; otherwise the URL is
/// assembled from `POSTGRES_HOST`, `POSTGRES_PORT`, `BINGO_DB`, `BINGO_DB_USER`
/// and `BINGO_DB_PASSWORD`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if profile == DbProfile::InMemory {
        return Ok(SQLITE_MEMORY_URL.to_string());
    }
    if let Ok(url) = env::var("DATABASE_URL") {
        if profile == DbProfile::Test && !url_db_name(&url).ends_with("_test") {
            return Err(AppError::config(format!(
                "Test profile requires database name to end with '_test', but DATABASE_URL points at '{}'",
                url_db_name(&url)
            )));
        }
        return Ok(url);
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(&profile)?;
    let username = must_var("BINGO_DB_USER")?;
    let password = must_var("BINGO_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: &DbProfile) -> Result<String, AppError> {
    let db_name = must_var("BINGO_DB")?;
    if *profile == DbProfile::Test && !db_name.ends_with("_test") {
        return Err(AppError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{db_name}'"
        )));
    }
    Ok(db_name)
}

/// Path segment after the last '/', without query string.
fn url_db_name(url: &str) -> &str {
    let tail = url.rsplit('/').next().unwrap_or(url);
    tail.split('?').next().unwrap_or(tail)
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
