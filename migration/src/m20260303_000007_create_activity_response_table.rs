use sea_orm_migration::{prelude::*, schema::*};

use super::m20260303_000006_create_activity_check_table::ActivityCheck;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityResponse::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityResponse::Id))
                    .col(integer(ActivityResponse::ActivityCheckId))
                    .col(string(ActivityResponse::UserId))
                    .col(
                        timestamp(ActivityResponse::RespondedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_response_check_id")
                            .from(ActivityResponse::Table, ActivityResponse::ActivityCheckId)
                            .to(ActivityCheck::Table, ActivityCheck::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_activity_response_check_user_unique")
                            .col(ActivityResponse::ActivityCheckId)
                            .col(ActivityResponse::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityResponse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityResponse {
    Table,
    Id,
    ActivityCheckId,
    UserId,
    RespondedAt,
}
