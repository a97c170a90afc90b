use sea_orm::{sea_query::Expr, DatabaseConnection};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    entity::prelude::*,
    ids::{NotificationId, UserId},
    service::PageRequest,
};

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("notification not found")]
    NotificationNotFound,
}

/// Build an unread notification row; the caller inserts it.
pub(crate) fn new_notification(
    recipient_id: UserId,
    actor_id: UserId,
    verb: &str,
    target_kind: TargetKind,
    target_id: Uuid,
) -> NotificationActiveModel {
    NotificationActiveModel {
        id: Set(NotificationId::new()),
        recipient_id: Set(recipient_id),
        actor_id: Set(actor_id),
        verb: Set(verb.to_string()),
        target_kind: Set(target_kind),
        target_id: Set(target_id),
        created_at: Set(timestamp_now()),
        read: Set(false),
    }
}

#[derive(Clone)]
pub struct NotificationsService {
    db: DatabaseConnection,
}

impl NotificationsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The recipient's notifications, newest first
    pub async fn list(
        &self,
        recipient: UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<NotificationModel>, NotificationsServiceError> {
        let mut select = Notification::find().filter(NotificationColumn::RecipientId.eq(recipient));

        if unread_only {
            select = select.filter(NotificationColumn::Read.eq(false));
        }

        let select = select
            .order_by_desc(NotificationColumn::CreatedAt)
            .order_by_desc(NotificationColumn::Id);
        let notifications = page.apply(select).all(&self.db).await?;

        Ok(notifications)
    }

    pub async fn unread_count(&self, recipient: UserId) -> Result<u64, NotificationsServiceError> {
        let count = Notification::find()
            .filter(NotificationColumn::RecipientId.eq(recipient))
            .filter(NotificationColumn::Read.eq(false))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    /// Mark one notification read. Someone else's notification looks the same
    /// as a missing one.
    pub async fn mark_read(
        &self,
        recipient: UserId,
        notification_id: NotificationId,
    ) -> Result<NotificationModel, NotificationsServiceError> {
        let notification = Notification::find_by_id(notification_id)
            .filter(NotificationColumn::RecipientId.eq(recipient))
            .one(&self.db)
            .await?
            .ok_or(NotificationsServiceError::NotificationNotFound)?;

        if notification.read {
            return Ok(notification);
        }

        let mut active: NotificationActiveModel = notification.into();
        active.read = Set(true);
        let updated = active.update(&self.db).await?;

        Ok(updated)
    }

    /// Mark every unread notification read; returns how many changed.
    pub async fn mark_all_read(&self, recipient: UserId) -> Result<u64, NotificationsServiceError> {
        let result = Notification::update_many()
            .col_expr(NotificationColumn::Read, Expr::value(true))
            .filter(NotificationColumn::RecipientId.eq(recipient))
            .filter(NotificationColumn::Read.eq(false))
            .exec(&self.db)
            .await?;

        tracing::debug!(user_id = %recipient, marked = result.rows_affected, "marked notifications read");
        Ok(result.rows_affected)
    }
}
