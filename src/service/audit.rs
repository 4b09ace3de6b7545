//! Audit log.
//!
//! Guilds choose which events are echoed to their log channel. Recording never fails
//! the action being audited: problems are logged and swallowed.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};

use crate::{
    capability::{flags::AuditEvent, Flag},
    data::guild::GuildRepository,
};

const AUDIT_COLOR: u32 = 0x3498db;

pub struct AuditLogService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> AuditLogService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Posts an audit entry if the guild audits `event` and has a log channel.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the action happened in
    /// - `event` - Kind of action
    /// - `actor_id` - User who performed the action
    /// - `description` - What happened, in Discord markdown
    pub async fn record(
        &self,
        guild_id: u64,
        event: AuditEvent,
        actor_id: u64,
        description: impl Into<String>,
    ) {
        let settings = match GuildRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await
        {
            Ok(Some(settings)) => settings,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to load audit settings for guild {}: {}", guild_id, e);
                return;
            }
        };

        let Some(channel_id) = settings.log_channel_id else {
            return;
        };

        if !settings.audits(event) {
            return;
        }

        let embed = CreateEmbed::new()
            .title(event.name())
            .description(description)
            .field("By", format!("<@{}>", actor_id), true)
            .color(AUDIT_COLOR)
            .timestamp(Timestamp::now());

        if let Err(e) = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!(
                "Failed to post {:?} audit entry in guild {}: {}",
                event,
                guild_id,
                e
            );
        }
    }
}
