//! Member joins.
//!
//! When a guild has both the blacklist and auto-ban enabled, a blacklisted user who
//! joins is banned straight away.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Member};

use crate::{
    capability::flags::{AuditEvent, GuildFlag},
    service::{audit::AuditLogService, blacklist::BlacklistService, guild::GuildService},
};

pub async fn handle_guild_member_addition(db: &DatabaseConnection, ctx: Context, new_member: Member) {
    let guild_id = new_member.guild_id;
    let user_id = new_member.user.id;

    let settings = match GuildService::new(db).get_settings(guild_id.get()).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings for guild {}: {}", guild_id, e);
            return;
        }
    };

    if !settings.has_feature(GuildFlag::Blacklist) || !settings.has_feature(GuildFlag::AutoBan) {
        return;
    }

    let entry = match BlacklistService::new(db)
        .check(guild_id.get(), user_id.get())
        .await
    {
        Ok(Some(entry)) => entry,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to check blacklist for user {}: {}", user_id, e);
            return;
        }
    };

    let reason = entry
        .reason
        .clone()
        .unwrap_or_else(|| "Blacklisted".to_string());

    if let Err(e) = guild_id.ban_with_reason(&ctx.http, user_id, 0, &reason).await {
        tracing::error!(
            "Failed to ban blacklisted user {} in guild {}: {}",
            user_id,
            guild_id,
            e
        );
        return;
    }

    tracing::info!("Banned blacklisted user {} on join to guild {}", user_id, guild_id);

    AuditLogService::new(db, ctx.http.clone())
        .record(
            guild_id.get(),
            AuditEvent::BlacklistChanges,
            entry.added_by,
            format!("Banned blacklisted user <@{}> on join.", user_id),
        )
        .await;
}
