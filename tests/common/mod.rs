use sea_orm::{Database, DatabaseConnection};
use std::env;

/// Connect to the integration-test database.
///
/// Returns None (so callers can skip) when TEST_DATABASE_URL is not set
/// or the database is unreachable; these tests need a real Postgres.
pub async fn try_connect_test_db() -> Option<DatabaseConnection> {
    let Ok(database_url) = env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
        return None;
    };

    match Database::connect(&database_url).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("Could not connect to test database ({}); skipping", e);
            None
        }
    }
}
