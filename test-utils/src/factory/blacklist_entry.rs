//! Blacklist entry factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct BlacklistEntryFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    reason: Option<String>,
    added_by: String,
    created_at: DateTime<Utc>,
}

impl<'a> BlacklistEntryFactory<'a> {
    /// Defaults to a fresh user, no reason, added now by another fresh user.
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: next_id().to_string(),
            reason: None,
            added_by: next_id().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(str::to_string);
        self
    }

    pub fn added_by(mut self, added_by: impl Into<String>) -> Self {
        self.added_by = added_by.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::blacklist_entry::Model, DbErr> {
        entity::blacklist_entry::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            reason: ActiveValue::Set(self.reason),
            added_by: ActiveValue::Set(self.added_by),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Blacklists a fresh user in the guild.
pub async fn create_blacklist_entry(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::blacklist_entry::Model, DbErr> {
    BlacklistEntryFactory::new(db, guild_id).build().await
}
