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
                    .table(BlacklistEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(BlacklistEntry::Id))
                    .col(string(BlacklistEntry::GuildId))
                    .col(string(BlacklistEntry::UserId))
                    .col(text_null(BlacklistEntry::Reason))
                    .col(string(BlacklistEntry::AddedBy))
                    .col(
                        timestamp(BlacklistEntry::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blacklist_entry_guild_id")
                            .from(BlacklistEntry::Table, BlacklistEntry::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_blacklist_entry_guild_user_unique")
                            .col(BlacklistEntry::GuildId)
                            .col(BlacklistEntry::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlacklistEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BlacklistEntry {
    Table,
    Id,
    GuildId,
    UserId,
    Reason,
    AddedBy,
    CreatedAt,
}
