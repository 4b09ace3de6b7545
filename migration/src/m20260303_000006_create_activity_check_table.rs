use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_guild_table::Guild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityCheck::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityCheck::Id))
                    .col(string(ActivityCheck::GuildId))
                    .col(string(ActivityCheck::ChannelId))
                    .col(string_null(ActivityCheck::MessageId))
                    .col(string(ActivityCheck::StartedBy))
                    .col(timestamp(ActivityCheck::Deadline))
                    .col(boolean(ActivityCheck::Closed).default(false))
                    .col(
                        timestamp(ActivityCheck::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_check_guild_id")
                            .from(ActivityCheck::Table, ActivityCheck::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_check_open_deadline")
                    .table(ActivityCheck::Table)
                    .col(ActivityCheck::Closed)
                    .col(ActivityCheck::Deadline)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityCheck::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityCheck {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    StartedBy,
    Deadline,
    Closed,
    CreatedAt,
}
