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
                    .table(LeaderboardEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaderboardEntry::Id))
                    .col(string(LeaderboardEntry::GuildId))
                    .col(string(LeaderboardEntry::UserId))
                    .col(big_integer(LeaderboardEntry::Points).default(0))
                    .col(big_integer(LeaderboardEntry::PreviousPoints).default(0))
                    .col(
                        timestamp(LeaderboardEntry::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leaderboard_entry_guild_id")
                            .from(LeaderboardEntry::Table, LeaderboardEntry::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_leaderboard_entry_guild_user_unique")
                            .col(LeaderboardEntry::GuildId)
                            .col(LeaderboardEntry::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leaderboard_entry_guild_points")
                    .table(LeaderboardEntry::Table)
                    .col(LeaderboardEntry::GuildId)
                    .col(LeaderboardEntry::Points)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaderboardEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LeaderboardEntry {
    Table,
    Id,
    GuildId,
    UserId,
    Points,
    PreviousPoints,
    UpdatedAt,
}
