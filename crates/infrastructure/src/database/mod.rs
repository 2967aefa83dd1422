use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY: &str = ":memory:";

const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS donors (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    gender TEXT NOT NULL,
    age INTEGER NOT NULL,
    blood_type TEXT NOT NULL,
    weight DOUBLE NOT NULL,
    location TEXT NOT NULL,
    latitude DOUBLE,
    longitude DOUBLE,
    contact TEXT NOT NULL UNIQUE,
    email TEXT,
    health_issues TEXT,
    notes TEXT,
    last_donation DATE,
    available BOOLEAN NOT NULL DEFAULT 1,
    created_at TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_donors_blood_type ON donors (blood_type);
CREATE INDEX IF NOT EXISTS idx_donors_created_at ON donors (created_at);
";

/// Applied to every pooled connection as it is handed out.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let mut builder = r2d2::Pool::builder().connection_customizer(Box::new(ConnectionOptions));
        // Every connection to ":memory:" is a separate database, so keep
        // exactly one and never recycle it.
        if database_path == IN_MEMORY {
            builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
        }
        let pool = builder
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(format!("Failed to create SQLite connection pool: {}", e)))?;
        Ok(Database { pool })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        Self::new(IN_MEMORY)
    }

    /// Creates the donors table and its indexes if they are missing.
    pub fn initialize(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;
        conn.batch_execute(CREATE_SCHEMA)
            .map_err(|e| DomainError::RepositoryError(format!("Failed to create schema: {}", e)))?;
        info!("Database schema ready");
        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
