//! Leaderboard ranks.
//!
//! A rank is reached once a member holds at least `min_points`. Ranks may carry a
//! Discord role that is swapped in and out as members move between ranks.

use sea_orm::DbErr;

use crate::model::{parse_id, parse_optional_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub id: i32,
    pub guild_id: u64,
    pub name: String,
    /// Role assigned to members holding this rank.
    pub role_id: Option<u64>,
    pub min_points: i64,
}

impl Rank {
    pub fn from_entity(entity: entity::rank::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            name: entity.name,
            role_id: parse_optional_id(entity.role_id.as_deref(), "role_id")?,
            min_points: entity.min_points,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateRankParam {
    pub guild_id: u64,
    pub name: String,
    pub role_id: Option<u64>,
    pub min_points: i64,
}

/// Highest rank whose threshold `points` reaches.
pub fn rank_for(ranks: &[Rank], points: i64) -> Option<&Rank> {
    ranks
        .iter()
        .filter(|rank| rank.min_points <= points)
        .max_by_key(|rank| rank.min_points)
}
