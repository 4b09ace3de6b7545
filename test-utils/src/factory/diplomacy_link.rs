//! Diplomacy link factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct DiplomacyLinkFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    partner_guild_id: String,
    channel_id: String,
}

impl<'a> DiplomacyLinkFactory<'a> {
    /// Defaults to a fresh local channel.
    pub fn new(db: &'a DatabaseConnection, guild_id: &str, partner_guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            partner_guild_id: partner_guild_id.to_string(),
            channel_id: next_id().to_string(),
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub async fn build(self) -> Result<entity::diplomacy_link::Model, DbErr> {
        entity::diplomacy_link::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            partner_guild_id: ActiveValue::Set(self.partner_guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Links `guild_id` to `partner_guild_id` through a fresh channel.
pub async fn create_diplomacy_link(
    db: &DatabaseConnection,
    guild_id: &str,
    partner_guild_id: &str,
) -> Result<entity::diplomacy_link::Model, DbErr> {
    DiplomacyLinkFactory::new(db, guild_id, partner_guild_id)
        .build()
        .await
}
