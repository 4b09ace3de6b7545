use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::parse_id;

/// A user barred from a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct BlacklistEntry {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub reason: Option<String>,
    /// User who added the entry.
    pub added_by: u64,
    pub created_at: DateTime<Utc>,
}

impl BlacklistEntry {
    pub fn from_entity(entity: entity::blacklist_entry::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            user_id: parse_id(&entity.user_id, "user_id")?,
            reason: entity.reason,
            added_by: parse_id(&entity.added_by, "added_by")?,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AddBlacklistParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub reason: Option<String>,
    pub added_by: u64,
}

/// Result of adding a user to the blacklist.
#[derive(Debug, Clone, PartialEq)]
pub enum AddBlacklistOutcome {
    Added(BlacklistEntry),
    /// The user was already listed; the existing entry is left untouched.
    AlreadyListed(BlacklistEntry),
}

impl AddBlacklistOutcome {
    pub fn entry(&self) -> &BlacklistEntry {
        match self {
            Self::Added(entry) | Self::AlreadyListed(entry) => entry,
        }
    }
}
