use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::config::FlockConfig;

pub mod migrator;

pub async fn open_or_create_db(config: &FlockConfig) -> Result<DatabaseConnection, DbErr> {
    // Use display() to convert PathBuf to string representation
    let connection_string = format!("sqlite://{}?mode=rwc", config.database_path.display());

    let mut options = ConnectOptions::new(connection_string);
    // Statement logging is noisy at info; services log their own operations.
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// Connect to a private in-memory database with every migration applied.
pub async fn open_in_memory() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    migrate_up(&db).await?;
    Ok(db)
}

pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await
}
