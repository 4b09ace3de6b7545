//! Guild configuration model.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    capability::{
        flags::{AuditEvent, GuildFlag},
        FieldValue,
    },
    model::{parse_id, parse_optional_id},
};

/// Per-guild settings: enabled features and audit log configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    /// Discord guild ID as a u64.
    pub guild_id: u64,
    /// Guild display name, refreshed whenever the guild becomes available.
    pub name: String,
    /// Enabled [`GuildFlag`]s.
    pub flags: FieldValue,
    /// [`AuditEvent`]s echoed to the log channel.
    pub audit_events: FieldValue,
    /// Channel receiving audit log embeds, if configured.
    pub log_channel_id: Option<u64>,
    pub joined_at: DateTime<Utc>,
}

impl GuildSettings {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse guild_id or log_channel_id as u64
    pub fn from_entity(entity: entity::guild::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            name: entity.name,
            flags: FieldValue::from(entity.flags),
            audit_events: FieldValue::from(entity.audit_events),
            log_channel_id: parse_optional_id(entity.log_channel_id.as_deref(), "log_channel_id")?,
            joined_at: entity.joined_at,
        })
    }

    pub fn has_feature(&self, flag: GuildFlag) -> bool {
        GuildFlag::assignment().has_all(self.flags, flag)
    }

    /// Enabled features in declaration order.
    pub fn features(&self) -> Vec<GuildFlag> {
        GuildFlag::assignment().list_set(self.flags)
    }

    pub fn audits(&self, event: AuditEvent) -> bool {
        AuditEvent::assignment().has_all(self.audit_events, event)
    }

    /// Audited events in declaration order.
    pub fn audited_events(&self) -> Vec<AuditEvent> {
        AuditEvent::assignment().list_set(self.audit_events)
    }
}
