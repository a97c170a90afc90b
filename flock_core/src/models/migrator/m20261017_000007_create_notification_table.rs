use sea_orm_migration::{prelude::*, schema::*};

use super::m20261017_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .col(pk_uuid(Notification::Id))
                    .col(uuid(Notification::RecipientId))
                    .col(uuid(Notification::ActorId))
                    .col(string(Notification::Verb))
                    // Polymorphic target: no foreign key, cleaned up by the content service
                    .col(string(Notification::TargetKind))
                    .col(uuid(Notification::TargetId))
                    .col(string(Notification::CreatedAt))
                    .col(boolean(Notification::Read).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notification-recipient_id")
                            .from(Notification::Table, Notification::RecipientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notification-actor_id")
                            .from(Notification::Table, Notification::ActorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_recipient_read")
                    .table(Notification::Table)
                    .col(Notification::RecipientId)
                    .col(Notification::Read)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_target")
                    .table(Notification::Table)
                    .col(Notification::TargetKind)
                    .col(Notification::TargetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    RecipientId,
    ActorId,
    Verb,
    TargetKind,
    TargetId,
    CreatedAt,
    Read,
}
