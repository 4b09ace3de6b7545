//! Diplomacy (DPM) links between guilds.
//!
//! Each guild registers one local channel per partner. Messages are relayed only while
//! both guilds have registered each other and both have the Diplomacy feature enabled.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::parse_id;

#[derive(Debug, Clone, PartialEq)]
pub struct DiplomacyLink {
    pub id: i32,
    pub guild_id: u64,
    pub partner_guild_id: u64,
    /// Local channel or thread used for this partner.
    pub channel_id: u64,
    pub created_at: DateTime<Utc>,
}

impl DiplomacyLink {
    pub fn from_entity(entity: entity::diplomacy_link::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            partner_guild_id: parse_id(&entity.partner_guild_id, "partner_guild_id")?,
            channel_id: parse_id(&entity.channel_id, "channel_id")?,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateDiplomacyLinkParam {
    pub guild_id: u64,
    pub partner_guild_id: u64,
    pub channel_id: u64,
}

/// Where a message posted in a linked channel is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayTarget {
    pub source_guild_id: u64,
    pub partner_guild_id: u64,
    /// The partner's channel for the source guild.
    pub channel_id: u64,
}
