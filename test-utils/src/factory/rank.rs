//! Rank factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct RankFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    role_id: Option<String>,
    min_points: i64,
}

impl<'a> RankFactory<'a> {
    /// Defaults to `"Rank {id}"` without a role, reached at `{id}` points.
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            name: format!("Rank {}", id),
            role_id: None,
            min_points: id as i64,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn role_id(mut self, role_id: Option<&str>) -> Self {
        self.role_id = role_id.map(str::to_string);
        self
    }

    pub fn min_points(mut self, min_points: i64) -> Self {
        self.min_points = min_points;
        self
    }

    pub async fn build(self) -> Result<entity::rank::Model, DbErr> {
        entity::rank::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            role_id: ActiveValue::Set(self.role_id),
            min_points: ActiveValue::Set(self.min_points),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a rank reached at `min_points`.
pub async fn create_rank(
    db: &DatabaseConnection,
    guild_id: &str,
    min_points: i64,
) -> Result<entity::rank::Model, DbErr> {
    RankFactory::new(db, guild_id)
        .min_points(min_points)
        .build()
        .await
}
