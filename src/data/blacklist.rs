use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::blacklist::{AddBlacklistParam, BlacklistEntry};

pub struct BlacklistRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlacklistRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a blacklist entry
    ///
    /// Callers check [`Self::find`] first; the table only allows one entry per user
    /// and guild.
    pub async fn create(&self, param: AddBlacklistParam) -> Result<BlacklistEntry, DbErr> {
        let entity = entity::blacklist_entry::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            added_by: ActiveValue::Set(param.added_by.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        BlacklistEntry::from_entity(entity)
    }

    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<BlacklistEntry>, DbErr> {
        entity::prelude::BlacklistEntry::find()
            .filter(entity::blacklist_entry::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::blacklist_entry::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
            .map(BlacklistEntry::from_entity)
            .transpose()
    }

    /// Removes a user from the guild's blacklist.
    ///
    /// # Returns
    /// - `Ok(true)` - The user was listed and has been removed
    /// - `Ok(false)` - The user was not listed
    pub async fn delete(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::BlacklistEntry::delete_many()
            .filter(entity::blacklist_entry::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::blacklist_entry::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets paginated blacklist entries for a guild, oldest first
    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<BlacklistEntry>, u64), DbErr> {
        let paginator = entity::prelude::BlacklistEntry::find()
            .filter(entity::blacklist_entry::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::blacklist_entry::Column::CreatedAt)
            .order_by_asc(entity::blacklist_entry::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(BlacklistEntry::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total))
    }

    pub async fn count_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::BlacklistEntry::find()
            .filter(entity::blacklist_entry::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }
}
