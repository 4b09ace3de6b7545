use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::rank::{CreateRankParam, Rank};

pub struct RankRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateRankParam) -> Result<Rank, DbErr> {
        let entity = entity::rank::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            name: ActiveValue::Set(param.name),
            role_id: ActiveValue::Set(param.role_id.map(|id| id.to_string())),
            min_points: ActiveValue::Set(param.min_points),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Rank::from_entity(entity)
    }

    /// Finds the guild's rank with exactly this threshold
    pub async fn find_by_min_points(
        &self,
        guild_id: u64,
        min_points: i64,
    ) -> Result<Option<Rank>, DbErr> {
        entity::prelude::Rank::find()
            .filter(entity::rank::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::rank::Column::MinPoints.eq(min_points))
            .one(self.db)
            .await?
            .map(Rank::from_entity)
            .transpose()
    }

    /// Deletes a rank if it belongs to the guild.
    ///
    /// # Returns
    /// - `Ok(Some(Rank))` - The deleted rank
    /// - `Ok(None)` - No such rank in this guild
    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<Option<Rank>, DbErr> {
        let Some(entity) = entity::prelude::Rank::find_by_id(id)
            .filter(entity::rank::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        entity::prelude::Rank::delete_by_id(id).exec(self.db).await?;

        Rank::from_entity(entity).map(Some)
    }

    /// Gets every rank of a guild, lowest threshold first.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<Rank>, DbErr> {
        entity::prelude::Rank::find()
            .filter(entity::rank::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::rank::Column::MinPoints)
            .all(self.db)
            .await?
            .into_iter()
            .map(Rank::from_entity)
            .collect()
    }
}
