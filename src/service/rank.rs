//! Rank service.
//!
//! Ranks are thresholds on a guild's leaderboard. No two ranks of a guild share a
//! threshold, so the rank for a score is always unambiguous.

use sea_orm::DatabaseConnection;

use crate::{
    data::rank::RankRepository,
    error::AppError,
    model::rank::{CreateRankParam, Rank},
};

pub struct RankService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a rank.
    ///
    /// # Returns
    /// - `Ok(Rank)` - The created rank
    /// - `Err(AppError::BadRequest)` - Negative threshold, blank name, or another rank
    ///   already uses the threshold
    pub async fn create(&self, param: CreateRankParam) -> Result<Rank, AppError> {
        if param.min_points < 0 {
            return Err(AppError::BadRequest(
                "A rank cannot require negative points.".to_string(),
            ));
        }

        if param.name.trim().is_empty() {
            return Err(AppError::BadRequest("A rank needs a name.".to_string()));
        }

        let repo = RankRepository::new(self.db);

        if let Some(existing) = repo
            .find_by_min_points(param.guild_id, param.min_points)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "The rank `{}` already starts at {} points.",
                existing.name, existing.min_points
            )));
        }

        Ok(repo.create(param).await?)
    }

    /// Deletes a rank of the guild.
    pub async fn remove(&self, guild_id: u64, id: i32) -> Result<Rank, AppError> {
        let repo = RankRepository::new(self.db);

        repo.delete(guild_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("There is no rank with ID {}.", id)))
    }

    /// Gets every rank of the guild, lowest threshold first.
    pub async fn list(&self, guild_id: u64) -> Result<Vec<Rank>, AppError> {
        let repo = RankRepository::new(self.db);

        Ok(repo.get_by_guild(guild_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    fn param(name: &str, min_points: i64) -> CreateRankParam {
        CreateRankParam {
            guild_id: 1,
            name: name.to_string(),
            role_id: None,
            min_points,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_threshold() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = RankService::new(db);
        service.create(param("Recruit", 0)).await?;
        let result = service.create(param("Member", 0)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(service.list(1).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_negative_threshold() {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = RankService::new(db).create(param("Debt", -1)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn removing_unknown_rank_is_not_found() {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = RankService::new(db).remove(1, 12).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
