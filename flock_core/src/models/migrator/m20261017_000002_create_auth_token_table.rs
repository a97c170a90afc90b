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
                    .table(AuthToken::Table)
                    .col(string(AuthToken::Key).primary_key())
                    .col(uuid_uniq(AuthToken::UserId))
                    .col(string(AuthToken::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-auth-token-user_id")
                            .from(AuthToken::Table, AuthToken::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuthToken {
    Table,
    Key,
    UserId,
    CreatedAt,
}
