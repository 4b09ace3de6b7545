use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guild::Table)
                    .if_not_exists()
                    .col(string(Guild::GuildId).primary_key())
                    .col(string(Guild::Name))
                    .col(big_integer(Guild::Flags).default(0))
                    .col(big_integer(Guild::AuditEvents).default(0))
                    .col(string_null(Guild::LogChannelId))
                    .col(
                        timestamp(Guild::JoinedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Guild {
    Table,
    GuildId,
    Name,
    Flags,
    AuditEvents,
    LogChannelId,
    JoinedAt,
}
