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
                    .table(DiplomacyLink::Table)
                    .if_not_exists()
                    .col(pk_auto(DiplomacyLink::Id))
                    .col(string(DiplomacyLink::GuildId))
                    .col(string(DiplomacyLink::PartnerGuildId))
                    .col(string(DiplomacyLink::ChannelId))
                    .col(
                        timestamp(DiplomacyLink::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_diplomacy_link_guild_id")
                            .from(DiplomacyLink::Table, DiplomacyLink::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_diplomacy_link_guild_partner_unique")
                            .col(DiplomacyLink::GuildId)
                            .col(DiplomacyLink::PartnerGuildId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_diplomacy_link_channel")
                    .table(DiplomacyLink::Table)
                    .col(DiplomacyLink::ChannelId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiplomacyLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DiplomacyLink {
    Table,
    Id,
    GuildId,
    PartnerGuildId,
    ChannelId,
    CreatedAt,
}
