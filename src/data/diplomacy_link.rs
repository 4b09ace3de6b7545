//! Diplomacy link repository.
//!
//! A link row says "guild A uses channel C for partner B". Whether a link is active
//! also depends on the partner's reverse row, which the service layer checks.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::diplomacy::{CreateDiplomacyLinkParam, DiplomacyLink};

pub struct DiplomacyLinkRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiplomacyLinkRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers the local channel for a partner, replacing any previous channel.
    pub async fn upsert(&self, param: CreateDiplomacyLinkParam) -> Result<DiplomacyLink, DbErr> {
        let existing = entity::prelude::DiplomacyLink::find()
            .filter(entity::diplomacy_link::Column::GuildId.eq(param.guild_id.to_string()))
            .filter(
                entity::diplomacy_link::Column::PartnerGuildId
                    .eq(param.partner_guild_id.to_string()),
            )
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active_model: entity::diplomacy_link::ActiveModel = existing.into();
                active_model.channel_id = ActiveValue::Set(param.channel_id.to_string());
                active_model.update(self.db).await?
            }
            None => {
                entity::diplomacy_link::ActiveModel {
                    guild_id: ActiveValue::Set(param.guild_id.to_string()),
                    partner_guild_id: ActiveValue::Set(param.partner_guild_id.to_string()),
                    channel_id: ActiveValue::Set(param.channel_id.to_string()),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        DiplomacyLink::from_entity(entity)
    }

    pub async fn find(
        &self,
        guild_id: u64,
        partner_guild_id: u64,
    ) -> Result<Option<DiplomacyLink>, DbErr> {
        entity::prelude::DiplomacyLink::find()
            .filter(entity::diplomacy_link::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::diplomacy_link::Column::PartnerGuildId.eq(partner_guild_id.to_string()))
            .one(self.db)
            .await?
            .map(DiplomacyLink::from_entity)
            .transpose()
    }

    /// Gets every link that uses `channel_id` as its local channel.
    pub async fn get_by_channel(&self, channel_id: u64) -> Result<Vec<DiplomacyLink>, DbErr> {
        entity::prelude::DiplomacyLink::find()
            .filter(entity::diplomacy_link::Column::ChannelId.eq(channel_id.to_string()))
            .all(self.db)
            .await?
            .into_iter()
            .map(DiplomacyLink::from_entity)
            .collect()
    }

    /// # Returns
    /// - `Ok(true)` - The link existed and was removed
    /// - `Ok(false)` - No link to that partner
    pub async fn delete(&self, guild_id: u64, partner_guild_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::DiplomacyLink::delete_many()
            .filter(entity::diplomacy_link::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::diplomacy_link::Column::PartnerGuildId.eq(partner_guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<DiplomacyLink>, u64), DbErr> {
        let paginator = entity::prelude::DiplomacyLink::find()
            .filter(entity::diplomacy_link::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::diplomacy_link::Column::CreatedAt)
            .order_by_asc(entity::diplomacy_link::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let links = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(DiplomacyLink::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((links, total))
    }

    pub async fn count_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::DiplomacyLink::find()
            .filter(entity::diplomacy_link::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }
}
