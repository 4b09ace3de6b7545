//! Points and standings.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::{parse_id, rank::Rank};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub guild_id: u64,
    pub user_id: u64,
    pub points: i64,
    pub updated_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_entity(entity: entity::leaderboard_entry::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            user_id: parse_id(&entity.user_id, "user_id")?,
            points: entity.points,
            updated_at: entity.updated_at,
        })
    }
}

/// Adjustment applied to a member's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsChange {
    Add(i64),
    Remove(i64),
    Set(i64),
}

impl PointsChange {
    /// New total after applying the change. Totals never drop below zero.
    pub fn apply(self, current: i64) -> i64 {
        let next = match self {
            Self::Add(amount) => current.saturating_add(amount),
            Self::Remove(amount) => current.saturating_sub(amount),
            Self::Set(amount) => amount,
        };

        next.max(0)
    }
}

/// A member's position on the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub user_id: u64,
    pub points: i64,
    /// 1-based; members with equal points share a position.
    pub position: u64,
    pub rank: Option<Rank>,
}

/// Outcome of a points change, including any rank transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsUpdate {
    pub user_id: u64,
    pub previous: i64,
    pub current: i64,
    pub old_rank: Option<Rank>,
    pub new_rank: Option<Rank>,
}

impl PointsUpdate {
    pub fn rank_changed(&self) -> bool {
        self.old_rank.as_ref().map(|r| r.id) != self.new_rank.as_ref().map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_floor_at_zero() {
        assert_eq!(PointsChange::Add(5).apply(10), 15);
        assert_eq!(PointsChange::Remove(25).apply(10), 0);
        assert_eq!(PointsChange::Set(-3).apply(10), 0);
        assert_eq!(PointsChange::Add(-20).apply(10), 0);
    }

    #[test]
    fn large_adjustments_saturate() {
        assert_eq!(PointsChange::Add(i64::MAX).apply(1), i64::MAX);
        assert_eq!(PointsChange::Remove(i64::MAX).apply(0), 0);
    }
}
