pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::{error, info};

use crate::shared::errors::DomainError;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./blog.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./blog.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory SQLite database.
    ///
    /// Pinned to a single connection: every new SQLite connection to
    /// `:memory:` would otherwise open a separate, empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

/// Initialize the connection pool.
///
/// The pool plays the role of the per-request session factory: handlers
/// borrow a connection for each statement and return it immediately.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Map a database error onto the domain taxonomy.
///
/// Constraint violations become `Conflict(conflict_message)`, lost
/// connections become `Unavailable`, anything else is `Internal`.
pub(crate) fn map_db_err(e: DbErr, conflict_message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) | Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return DomainError::Conflict(conflict_message.to_string());
        }
        _ => {}
    }

    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            error!("Database unavailable: {}", e);
            DomainError::Unavailable(e.to_string())
        }
        other => {
            let message = other.to_string();
            // Drivers that sea-orm cannot classify still name the constraint.
            if message.contains("UNIQUE constraint failed")
                || message.contains("FOREIGN KEY constraint failed")
                || message.contains("duplicate key")
            {
                DomainError::Conflict(conflict_message.to_string())
            } else {
                error!("Database error: {}", message);
                DomainError::Internal(message)
            }
        }
    }
}

/// Freshly migrated in-memory database for tests.
#[cfg(test)]
pub(crate) async fn test_database() -> DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    migrator::Migrator::up(&db, None)
        .await
        .expect("migrations apply");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn connection_errors_are_unavailable() {
        let err = map_db_err(
            DbErr::Conn(RuntimeErr::Internal("refused".into())),
            "conflict",
        );
        assert!(matches!(err, DomainError::Unavailable(_)));
    }

    #[test]
    fn constraint_text_falls_back_to_conflict() {
        let err = map_db_err(
            DbErr::Custom("UNIQUE constraint failed: users.email".into()),
            "Duplicate entry",
        );
        assert!(matches!(err, DomainError::Conflict(m) if m == "Duplicate entry"));
    }

    #[test]
    fn other_errors_are_internal() {
        let err = map_db_err(DbErr::Custom("boom".into()), "conflict");
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
