//! Guild availability.
//!
//! `guild_create` fires on startup for every guild the bot is in, when it joins a new
//! guild, and when a guild comes back after an outage. Each time the guild row is
//! upserted so commands can find its settings; existing settings are kept.

use sea_orm::DatabaseConnection;
use serenity::all::Guild;

use crate::service::guild::GuildService;

pub async fn handle_guild_create(db: &DatabaseConnection, guild: &Guild, is_new: Option<bool>) {
    let guild_id = guild.id.get();

    match GuildService::new(db).register(guild_id, guild.name.clone()).await {
        Ok(settings) => {
            if is_new == Some(true) {
                tracing::info!("Joined guild {} ({})", settings.name, guild_id);
            } else {
                tracing::debug!(
                    "Guild {} ({}) available with features {:?}",
                    settings.name,
                    guild_id,
                    settings.features()
                );
            }
        }
        Err(e) => tracing::error!("Failed to register guild {}: {}", guild_id, e),
    }
}
