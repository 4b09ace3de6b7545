//! Leaderboard entry factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct LeaderboardEntryFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    points: i64,
    updated_at: DateTime<Utc>,
}

impl<'a> LeaderboardEntryFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: next_id().to_string(),
            points: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    /// Sets when the score was reached; earlier wins ties.
    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub async fn build(self) -> Result<entity::leaderboard_entry::Model, DbErr> {
        entity::leaderboard_entry::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            points: ActiveValue::Set(self.points),
            previous_points: ActiveValue::Set(0),
            updated_at: ActiveValue::Set(self.updated_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an entry for a fresh user holding `points`.
pub async fn create_leaderboard_entry(
    db: &DatabaseConnection,
    guild_id: &str,
    points: i64,
) -> Result<entity::leaderboard_entry::Model, DbErr> {
    LeaderboardEntryFactory::new(db, guild_id)
        .points(points)
        .build()
        .await
}
