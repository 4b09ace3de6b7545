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
                    .table(PermissionGrant::Table)
                    .if_not_exists()
                    .col(pk_auto(PermissionGrant::Id))
                    .col(string(PermissionGrant::GuildId))
                    .col(string(PermissionGrant::SubjectKind))
                    .col(string(PermissionGrant::SubjectId))
                    .col(big_integer(PermissionGrant::Permissions).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_grant_guild_id")
                            .from(PermissionGrant::Table, PermissionGrant::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_permission_grant_subject_unique")
                            .col(PermissionGrant::GuildId)
                            .col(PermissionGrant::SubjectKind)
                            .col(PermissionGrant::SubjectId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PermissionGrant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PermissionGrant {
    Table,
    Id,
    GuildId,
    SubjectKind,
    SubjectId,
    Permissions,
}
