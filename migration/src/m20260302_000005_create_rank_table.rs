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
                    .table(Rank::Table)
                    .if_not_exists()
                    .col(pk_auto(Rank::Id))
                    .col(string(Rank::GuildId))
                    .col(string(Rank::Name))
                    .col(string_null(Rank::RoleId))
                    .col(big_integer(Rank::MinPoints))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rank_guild_id")
                            .from(Rank::Table, Rank::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_rank_guild_min_points_unique")
                            .col(Rank::GuildId)
                            .col(Rank::MinPoints),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rank::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rank {
    Table,
    Id,
    GuildId,
    Name,
    RoleId,
    MinPoints,
}
