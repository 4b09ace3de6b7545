//! Leaderboard repository.
//!
//! Members without a row have zero points. Ordering is by points descending, ties
//! broken by whoever reached the score first.
//!
//! Point changes are a single upsert that computes the new total from the stored one
//! and copies the old total into `previous_points`, so overlapping adjustments all
//! count and each caller learns the total its own change started from.

use chrono::Utc;
use migration::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::model::leaderboard::{LeaderboardEntry, PointsChange};

pub struct LeaderboardRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<LeaderboardEntry>, DbErr> {
        self.find_entity(guild_id, user_id)
            .await?
            .map(LeaderboardEntry::from_entity)
            .transpose()
    }

    /// Applies a points change to a member, creating the row if needed.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the leaderboard belongs to
    /// - `user_id` - Member whose total changes
    /// - `change` - Adjustment applied to the stored total, floored at zero
    ///
    /// # Returns
    /// - `Ok((previous, LeaderboardEntry))` - Total before this change and the updated entry
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn apply_change(
        &self,
        guild_id: u64,
        user_id: u64,
        change: PointsChange,
    ) -> Result<(i64, LeaderboardEntry), DbErr> {
        let points = match change {
            PointsChange::Add(amount) => {
                Expr::cust_with_values("MAX(\"points\" + ?, 0)", [amount])
            }
            PointsChange::Remove(amount) => {
                Expr::cust_with_values("MAX(\"points\" - ?, 0)", [amount])
            }
            PointsChange::Set(amount) => Expr::value(amount.max(0)),
        };

        let entity = entity::prelude::LeaderboardEntry::insert(
            entity::leaderboard_entry::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                points: ActiveValue::Set(change.apply(0)),
                previous_points: ActiveValue::Set(0),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::leaderboard_entry::Column::GuildId,
                entity::leaderboard_entry::Column::UserId,
            ])
            // Every right-hand side reads the row as it was before this update.
            .value(
                entity::leaderboard_entry::Column::PreviousPoints,
                Expr::col(entity::leaderboard_entry::Column::Points),
            )
            .value(entity::leaderboard_entry::Column::Points, points)
            .update_column(entity::leaderboard_entry::Column::UpdatedAt)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        let previous = entity.previous_points;

        Ok((previous, LeaderboardEntry::from_entity(entity)?))
    }

    /// Counts members of the guild with strictly more points.
    pub async fn count_above(&self, guild_id: u64, points: i64) -> Result<u64, DbErr> {
        entity::prelude::LeaderboardEntry::find()
            .filter(entity::leaderboard_entry::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::leaderboard_entry::Column::Points.gt(points))
            .count(self.db)
            .await
    }

    /// Gets a page of the guild's leaderboard, highest first
    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaderboardEntry>, u64), DbErr> {
        let paginator = entity::prelude::LeaderboardEntry::find()
            .filter(entity::leaderboard_entry::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::leaderboard_entry::Column::Points)
            .order_by_asc(entity::leaderboard_entry::Column::UpdatedAt)
            .order_by_asc(entity::leaderboard_entry::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(LeaderboardEntry::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total))
    }

    pub async fn count_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::LeaderboardEntry::find()
            .filter(entity::leaderboard_entry::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }

    async fn find_entity(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::leaderboard_entry::Model>, DbErr> {
        entity::prelude::LeaderboardEntry::find()
            .filter(entity::leaderboard_entry::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::leaderboard_entry::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await
    }
}
