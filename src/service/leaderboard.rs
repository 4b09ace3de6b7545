//! Leaderboard service.
//!
//! Point changes are floored at zero and report the member's rank before and after,
//! so the caller can move rank roles. Positions count members with strictly more
//! points, so tied members share a position.

use sea_orm::DatabaseConnection;

use crate::{
    data::{leaderboard::LeaderboardRepository, rank::RankRepository},
    error::AppError,
    model::{
        leaderboard::{LeaderboardEntry, PointsChange, PointsUpdate, Standing},
        rank::rank_for,
    },
};

pub struct LeaderboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a points change to a member.
    ///
    /// # Arguments
    /// - `guild_id` - Guild whose leaderboard changes
    /// - `user_id` - Member whose total changes
    /// - `change` - Adjustment to apply; the result never drops below zero
    ///
    /// # Returns
    /// - `Ok(PointsUpdate)` - Previous and new totals with the matching ranks
    /// - `Err(AppError::DbErr)` - Database error during query or update
    pub async fn adjust(
        &self,
        guild_id: u64,
        user_id: u64,
        change: PointsChange,
    ) -> Result<PointsUpdate, AppError> {
        let leaderboard_repo = LeaderboardRepository::new(self.db);
        let rank_repo = RankRepository::new(self.db);

        let (previous, entry) = leaderboard_repo
            .apply_change(guild_id, user_id, change)
            .await?;
        let current = entry.points;

        let ranks = rank_repo.get_by_guild(guild_id).await?;

        Ok(PointsUpdate {
            user_id,
            previous,
            current,
            old_rank: rank_for(&ranks, previous).cloned(),
            new_rank: rank_for(&ranks, current).cloned(),
        })
    }

    /// Gets a member's points, position and rank.
    ///
    /// Members without an entry stand with zero points.
    pub async fn standing(&self, guild_id: u64, user_id: u64) -> Result<Standing, AppError> {
        let leaderboard_repo = LeaderboardRepository::new(self.db);
        let rank_repo = RankRepository::new(self.db);

        let points = leaderboard_repo
            .find(guild_id, user_id)
            .await?
            .map(|entry| entry.points)
            .unwrap_or(0);
        let above = leaderboard_repo.count_above(guild_id, points).await?;
        let ranks = rank_repo.get_by_guild(guild_id).await?;

        Ok(Standing {
            user_id,
            points,
            position: above + 1,
            rank: rank_for(&ranks, points).cloned(),
        })
    }

    /// Gets one page of the leaderboard, highest first.
    pub async fn page(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LeaderboardEntry>, u64), AppError> {
        let repo = LeaderboardRepository::new(self.db);

        Ok(repo.get_by_guild_paginated(guild_id, page, per_page).await?)
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        let repo = LeaderboardRepository::new(self.db);

        Ok(repo.count_by_guild(guild_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn adjust_reports_rank_transition() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let recruit = factory::rank::RankFactory::new(db, "1")
            .name("Recruit")
            .min_points(0)
            .build()
            .await?;
        let veteran = factory::rank::RankFactory::new(db, "1")
            .name("Veteran")
            .min_points(100)
            .role_id(Some("500"))
            .build()
            .await?;

        let service = LeaderboardService::new(db);

        let first = service.adjust(1, 42, PointsChange::Add(60)).await?;
        assert_eq!(first.previous, 0);
        assert_eq!(first.current, 60);
        assert!(!first.rank_changed());

        let second = service.adjust(1, 42, PointsChange::Add(40)).await?;
        assert_eq!(second.old_rank.map(|r| r.id), Some(recruit.id));
        assert_eq!(second.new_rank.as_ref().map(|r| r.id), Some(veteran.id));
        assert_eq!(second.new_rank.and_then(|r| r.role_id), Some(500));

        Ok(())
    }

    #[tokio::test]
    async fn removing_more_than_held_floors_at_zero() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = LeaderboardService::new(db);
        service.adjust(1, 42, PointsChange::Set(10)).await?;
        let update = service.adjust(1, 42, PointsChange::Remove(50)).await?;

        assert_eq!(update.current, 0);
        assert_eq!(service.standing(1, 42).await?.points, 0);

        Ok(())
    }

    /// Tests two additions for the same member issued at the same time.
    ///
    /// Expected: both additions count and each reports a distinct starting total
    #[tokio::test]
    async fn concurrent_additions_both_count() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = LeaderboardService::new(db);
        service.adjust(1, 42, PointsChange::Set(0)).await?;

        let (first, second) = tokio::join!(
            service.adjust(1, 42, PointsChange::Add(10)),
            service.adjust(1, 42, PointsChange::Add(10)),
        );
        let (first, second) = (first?, second?);

        let mut starts = [first.previous, second.previous];
        starts.sort();
        assert_eq!(starts, [0, 10]);
        assert_eq!(first.current.max(second.current), 20);
        assert_eq!(service.standing(1, 42).await?.points, 20);

        Ok(())
    }

    #[tokio::test]
    async fn tied_members_share_position() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_leaderboard_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        for (user_id, points) in [("1", 50), ("2", 30), ("3", 30)] {
            factory::leaderboard_entry::LeaderboardEntryFactory::new(db, "9")
                .user_id(user_id)
                .points(points)
                .build()
                .await?;
        }

        let service = LeaderboardService::new(db);

        assert_eq!(service.standing(9, 1).await?.position, 1);
        assert_eq!(service.standing(9, 2).await?.position, 2);
        assert_eq!(service.standing(9, 3).await?.position, 2);
        // Unlisted members stand behind everyone with points.
        assert_eq!(service.standing(9, 4).await?.position, 4);

        Ok(())
    }
}
