//! Diplomacy relay.
//!
//! A message posted in an active diplomacy channel is copied to the partner guild's
//! channel as an embed naming the author and the source guild.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage, Message,
};

use crate::service::diplomacy::DiplomacyService;

const RELAY_COLOR: u32 = 0x9b59b6;

pub async fn handle_message(db: &DatabaseConnection, ctx: Context, msg: Message) {
    if msg.author.bot {
        return;
    }

    let Some(guild_id) = msg.guild_id else {
        return;
    };

    let targets = match DiplomacyService::new(db)
        .relay_targets(guild_id.get(), msg.channel_id.get())
        .await
    {
        Ok(targets) => targets,
        Err(e) => {
            tracing::error!(
                "Failed to resolve relay targets for channel {}: {}",
                msg.channel_id,
                e
            );
            return;
        }
    };

    if targets.is_empty() {
        return;
    }

    let source_name = guild_id
        .name(&ctx.cache)
        .unwrap_or_else(|| guild_id.to_string());

    let mut description = msg.content.clone();
    for attachment in &msg.attachments {
        description.push('\n');
        description.push_str(&attachment.url);
    }

    // Stickers and embeds-only messages have nothing to relay.
    if description.trim().is_empty() {
        return;
    }

    for target in targets {
        let embed = CreateEmbed::new()
            .author(CreateEmbedAuthor::new(msg.author.display_name()).icon_url(msg.author.face()))
            .description(description.clone())
            .color(RELAY_COLOR)
            .footer(CreateEmbedFooter::new(format!("From {}", source_name)));

        if let Err(e) = ChannelId::new(target.channel_id)
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::error!(
                "Failed to relay message from guild {} to guild {}: {}",
                target.source_guild_id,
                target.partner_guild_id,
                e
            );
        }
    }
}
