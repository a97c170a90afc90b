// SeaORM entities
// One module per table created by `models::migrator`.

use chrono::{SecondsFormat, Utc};

pub mod auth_token;
pub mod comment;
pub mod follow;
pub mod like;
pub mod notification;
pub mod post;
pub mod user;

#[cfg(test)]
mod tests;

/// Current time as a fixed-width RFC 3339 string.
///
/// Every `created_at`/`updated_at` column is written through this so that
/// ordering by the text column is the same as ordering by time.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub mod prelude {
    // Re-export all entities for convenience
    pub use super::auth_token::{
        ActiveModel as AuthTokenActiveModel, Column as AuthTokenColumn, Entity as AuthToken,
        Model as AuthTokenModel,
    };
    pub use super::comment::{
        ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
        Model as CommentModel,
    };
    pub use super::follow::{
        ActiveModel as FollowActiveModel, Column as FollowColumn, Entity as Follow,
        Model as FollowModel,
    };
    pub use super::like::{
        ActiveModel as LikeActiveModel, Column as LikeColumn, Entity as Like, Model as LikeModel,
    };
    pub use super::notification::{
        ActiveModel as NotificationActiveModel, Column as NotificationColumn,
        Entity as Notification, Model as NotificationModel, TargetKind,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post, Model as PostModel,
    };
    pub use super::user::{
        ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
    };
    pub use super::timestamp_now;

    // Re-export commonly used SeaORM types and traits
    pub use sea_orm::{
        ActiveModelTrait,
        ActiveValue,

        ColumnTrait,
        ConnectionTrait,

        // Database and connection types
        Database,
        DatabaseConnection,
        DatabaseTransaction,
        DbConn,
        // Common result types
        DbErr,

        // Core traits
        EntityTrait,
        ModelTrait,
        NotSet,
        PaginatorTrait,
        QueryFilter,
        QueryOrder,
        QuerySelect,
        Related,
        // Active model helpers
        Set,
        SqlErr,
        TransactionTrait,
    };
}
