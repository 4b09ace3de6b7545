//! `/config`: guild features and the audit log.

use serenity::all::{CreateEmbed, GuildChannel};

use crate::{
    bot::{guard, start::Context},
    capability::{
        flags::{AuditEvent, GuildFlag, Permission},
        Flag,
    },
    error::AppError,
    model::guild::GuildSettings,
    service::guild::GuildService,
};

/// Configure the bot for this server
#[poise::command(
    slash_command,
    guild_only,
    subcommands("feature", "features", "audit", "logchannel"),
    subcommand_required
)]
pub async fn config(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Enable or disable a feature
#[poise::command(
    slash_command,
    subcommands("feature_enable", "feature_disable"),
    subcommand_required
)]
pub async fn feature(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Enable a feature
#[poise::command(slash_command, rename = "enable")]
pub async fn feature_enable(
    ctx: Context<'_>,
    #[description = "Feature to enable"] feature: GuildFlag,
) -> Result<(), AppError> {
    set_feature(ctx, feature, true).await
}

/// Disable a feature
#[poise::command(slash_command, rename = "disable")]
pub async fn feature_disable(
    ctx: Context<'_>,
    #[description = "Feature to disable"] feature: GuildFlag,
) -> Result<(), AppError> {
    set_feature(ctx, feature, false).await
}

/// Show the enabled features and audit settings
#[poise::command(slash_command)]
pub async fn features(ctx: Context<'_>) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::Administrator).await?;

    let guild_id = guard::guild_id(ctx)?;
    let settings = GuildService::new(&ctx.data().db)
        .get_settings(guild_id)
        .await?;

    ctx.send(
        poise::CreateReply::default()
            .embed(settings_embed(&settings))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Choose which events are posted to the log channel
#[poise::command(
    slash_command,
    subcommands("audit_enable", "audit_disable"),
    subcommand_required
)]
pub async fn audit(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Post an event to the log channel
#[poise::command(slash_command, rename = "enable")]
pub async fn audit_enable(
    ctx: Context<'_>,
    #[description = "Event to log"] event: AuditEvent,
) -> Result<(), AppError> {
    set_audit_event(ctx, event, true).await
}

/// Stop posting an event to the log channel
#[poise::command(slash_command, rename = "disable")]
pub async fn audit_disable(
    ctx: Context<'_>,
    #[description = "Event to stop logging"] event: AuditEvent,
) -> Result<(), AppError> {
    set_audit_event(ctx, event, false).await
}

/// Set the log channel, or clear it when no channel is given
#[poise::command(slash_command)]
pub async fn logchannel(
    ctx: Context<'_>,
    #[description = "Channel for audit entries"] channel: Option<GuildChannel>,
) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::Administrator).await?;

    let guild_id = guard::guild_id(ctx)?;
    let channel_id = channel.as_ref().map(|channel| channel.id.get());

    GuildService::new(&ctx.data().db)
        .set_log_channel(guild_id, channel_id)
        .await?;

    let content = match channel_id {
        Some(id) => format!("Audit entries will be posted in <#{}>.", id),
        None => "The log channel has been cleared.".to_string(),
    };

    ctx.say(content).await?;

    Ok(())
}

async fn set_feature(ctx: Context<'_>, flag: GuildFlag, enabled: bool) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::Administrator).await?;

    let guild_id = guard::guild_id(ctx)?;
    GuildService::new(&ctx.data().db)
        .set_feature(guild_id, flag, enabled)
        .await?;

    tracing::info!(
        "Feature {:?} {} in guild {}",
        flag,
        if enabled { "enabled" } else { "disabled" },
        guild_id
    );

    ctx.say(format!(
        "`{}` is now {}.",
        flag.name(),
        if enabled { "enabled" } else { "disabled" }
    ))
    .await?;

    Ok(())
}

async fn set_audit_event(
    ctx: Context<'_>,
    event: AuditEvent,
    enabled: bool,
) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::Administrator).await?;

    let guild_id = guard::guild_id(ctx)?;
    let settings = GuildService::new(&ctx.data().db)
        .set_audit_event(guild_id, event, enabled)
        .await?;

    let mut content = format!(
        "`{}` will {}be logged.",
        event.name(),
        if enabled { "" } else { "no longer " }
    );
    if enabled && settings.log_channel_id.is_none() {
        content.push_str(" Set a log channel with `/config logchannel` to see entries.");
    }

    ctx.say(content).await?;

    Ok(())
}

fn settings_embed(settings: &GuildSettings) -> CreateEmbed {
    let features = name_list(settings.features().into_iter().map(|flag| flag.name()));
    let audited = name_list(settings.audited_events().into_iter().map(|event| event.name()));
    let log_channel = settings
        .log_channel_id
        .map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "Not set".to_string());

    CreateEmbed::new()
        .title(format!("Settings for {}", settings.name))
        .field("Features", features, false)
        .field("Audited events", audited, false)
        .field("Log channel", log_channel, false)
}

fn name_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let list: Vec<String> = names.map(|name| format!("`{}`", name)).collect();

    if list.is_empty() {
        "None".to_string()
    } else {
        list.join(", ")
    }
}
