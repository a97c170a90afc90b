pub mod entity;
pub mod ids;
pub mod models;

use sea_orm::DatabaseConnection;

use crate::error::StartupError;
use crate::service::{
    accounts::AccountsService, engagement::EngagementService, feed::FeedService,
    notifications::NotificationsService, posts::PostsService,
    relationships::RelationshipsService,
};

pub mod service;

pub mod error;

pub mod config;

#[cfg(test)]
mod test_utils;

/// Main runtime handle for Flock: the database plus one handle per service.
#[derive(Clone)]
pub struct FlockCore {
    pub config: config::FlockConfig,

    pub db: DatabaseConnection,

    pub accounts: AccountsService,
    pub relationships: RelationshipsService,
    pub posts: PostsService,
    pub engagement: EngagementService,
    pub feed: FeedService,
    pub notifications: NotificationsService,
}

impl FlockCore {
    /// Open (or create) the configured database, migrate it and build the services.
    pub async fn start(config: config::FlockConfig) -> Result<Self, StartupError> {
        tracing::info!(path = %config.database_path.display(), "opening database");
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        Ok(Self::with_connection(config, db))
    }

    /// Build the services on top of an already migrated connection.
    pub fn with_connection(config: config::FlockConfig, db: DatabaseConnection) -> Self {
        Self {
            accounts: AccountsService::new(db.clone()),
            relationships: RelationshipsService::new(db.clone()),
            posts: PostsService::new(db.clone()),
            engagement: EngagementService::new(db.clone()),
            feed: FeedService::new(db.clone()),
            notifications: NotificationsService::new(db.clone()),
            config,
            db,
        }
    }

    pub async fn shutdown(self) -> Result<(), StartupError> {
        self.db.close().await?;
        Ok(())
    }
}

pub mod prelude {
    pub use super::ids;
    pub use super::entity;
    pub use super::models;

    pub use super::service;

    pub use super::error;

    pub use super::config;

    pub use super::FlockCore;
}
