use std::sync::Arc;

use pizzeria_store::{SqliteConnection, StoreError, establish_connection, run_migrations};
use tokio::sync::Mutex;

/// Shared application state. The single SQLite connection sits behind an
/// async mutex, so requests reach the store one at a time.
#[derive(Clone)]
pub struct AppState {
    pub conn: Arc<Mutex<SqliteConnection>>,
}

impl AppState {
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let mut conn = establish_connection(database_url)?;
        run_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }
}
