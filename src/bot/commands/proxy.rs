//! `/proxy`: speak through the bot.

use serenity::all::{CreateAllowedMentions, CreateMessage, EditMessage, GuildChannel, MessageId};

use crate::{
    bot::{commands::parse_snowflake, guard, start::Context},
    capability::flags::{AuditEvent, GuildFlag, Permission},
    error::AppError,
    service::audit::AuditLogService,
};

/// Discord rejects messages longer than this.
const MESSAGE_LIMIT: usize = 2000;

/// Post or edit messages as the bot
#[poise::command(
    slash_command,
    guild_only,
    subcommands("say", "edit"),
    subcommand_required
)]
pub async fn proxy(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Post a message as the bot
#[poise::command(slash_command)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "Channel to post in"]
    #[channel_types("Text", "News", "PublicThread", "PrivateThread")]
    channel: GuildChannel,
    #[description = "Message to post"] content: String,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Proxy).await?;
    guard::require_permission(ctx, Permission::UseProxy).await?;
    check_content(&content)?;

    let message = channel
        .id
        .send_message(
            ctx,
            CreateMessage::new()
                .content(&content)
                .allowed_mentions(no_pings()),
        )
        .await?;

    audit(
        ctx,
        settings.guild_id,
        format!("Posted {} in <#{}>", message.link(), channel.id),
    )
    .await;

    ctx.send(
        poise::CreateReply::default()
            .content(format!("Posted {}", message.link()))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Edit a message the bot posted
#[poise::command(slash_command)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Channel of the message"]
    #[channel_types("Text", "News", "PublicThread", "PrivateThread")]
    channel: GuildChannel,
    #[description = "ID of the message to edit"] message_id: String,
    #[description = "New message content"] content: String,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Proxy).await?;
    guard::require_permission(ctx, Permission::UseProxy).await?;
    check_content(&content)?;

    let message_id = MessageId::new(parse_snowflake(&message_id, "message")?);

    let mut message = channel
        .id
        .message(ctx, message_id)
        .await
        .map_err(|_| {
            AppError::NotFound(format!(
                "There is no message {} in <#{}>.",
                message_id, channel.id
            ))
        })?;

    if message.author.id != ctx.framework().bot_id {
        return Err(AppError::BadRequest(
            "Only messages posted by the bot can be edited.".to_string(),
        ));
    }

    message
        .edit(
            ctx,
            EditMessage::new()
                .content(&content)
                .allowed_mentions(no_pings()),
        )
        .await?;

    audit(ctx, settings.guild_id, format!("Edited {}", message.link())).await;

    ctx.send(
        poise::CreateReply::default()
            .content(format!("Edited {}", message.link()))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

fn check_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "The message cannot be empty.".to_string(),
        ));
    }

    if content.chars().count() > MESSAGE_LIMIT {
        return Err(AppError::BadRequest(format!(
            "Messages are limited to {} characters.",
            MESSAGE_LIMIT
        )));
    }

    Ok(())
}

/// Proxied text may quote mentions but never pings everyone or roles.
fn no_pings() -> CreateAllowedMentions {
    CreateAllowedMentions::new().all_users(true)
}

async fn audit(ctx: Context<'_>, guild_id: u64, description: String) {
    AuditLogService::new(&ctx.data().db, ctx.serenity_context().http.clone())
        .record(
            guild_id,
            AuditEvent::ProxyUse,
            ctx.author().id.get(),
            description,
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_and_oversized_content() {
        assert!(check_content("hello").is_ok());
        assert!(matches!(check_content("  "), Err(AppError::BadRequest(_))));
        assert!(check_content(&"a".repeat(MESSAGE_LIMIT)).is_ok());
        assert!(check_content(&"a".repeat(MESSAGE_LIMIT + 1)).is_err());
    }
}
