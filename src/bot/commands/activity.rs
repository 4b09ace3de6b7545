//! `/activity`: timed checks members answer by pressing a button.

use chrono::{Duration, Utc};
use serenity::all::{CreateEmbed, GuildChannel};

use crate::{
    bot::{guard, start::Context},
    capability::flags::{AuditEvent, GuildFlag, Permission},
    error::AppError,
    model::activity::{ActivitySummary, CreateActivityCheckParam},
    service::{
        activity::ActivityService,
        activity_notification::{responder_list, ActivityNotificationService},
        audit::AuditLogService,
    },
};

/// Run activity checks
#[poise::command(
    slash_command,
    guild_only,
    subcommands("start", "end", "status"),
    subcommand_required
)]
pub async fn activity(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Start an activity check
#[poise::command(slash_command)]
pub async fn start(
    ctx: Context<'_>,
    #[description = "How long members have to respond, in minutes"]
    #[min = 1]
    #[max = 10080] // one week
    minutes: i64,
    #[description = "Channel to post the check in; this channel by default"]
    #[channel_types("Text", "News")]
    channel: Option<GuildChannel>,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::ActivityChecks).await?;
    guard::require_permission(ctx, Permission::ManageActivityChecks).await?;

    let channel_id = channel
        .map(|channel| channel.id)
        .unwrap_or_else(|| ctx.channel_id());

    let service = ActivityService::new(&ctx.data().db);
    let check = service
        .start(CreateActivityCheckParam {
            guild_id: settings.guild_id,
            channel_id: channel_id.get(),
            started_by: ctx.author().id.get(),
            deadline: Utc::now() + Duration::minutes(minutes),
        })
        .await?;

    let http = ctx.serenity_context().http.clone();
    let message_id = match ActivityNotificationService::new(http.clone())
        .post_check(&check)
        .await
    {
        Ok(message_id) => message_id,
        Err(e) => {
            // Without a message nobody can respond, so drop the check again.
            if let Err(close_err) = service.close(settings.guild_id, check.id).await {
                tracing::error!(
                    "Failed to close unposted activity check {}: {}",
                    check.id,
                    close_err
                );
            }
            return Err(e);
        }
    };

    service.attach_message(check.id, message_id.get()).await?;

    AuditLogService::new(&ctx.data().db, http)
        .record(
            settings.guild_id,
            AuditEvent::ActivityChecks,
            ctx.author().id.get(),
            format!(
                "Started activity check #{} in <#{}>, closing <t:{}:f>",
                check.id,
                check.channel_id,
                check.deadline.timestamp()
            ),
        )
        .await;

    ctx.send(
        poise::CreateReply::default()
            .content(format!(
                "Started activity check #{} in <#{}>.",
                check.id, check.channel_id
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// End an activity check before its deadline
#[poise::command(slash_command)]
pub async fn end(
    ctx: Context<'_>,
    #[description = "Activity check ID"] id: i32,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::ActivityChecks).await?;
    guard::require_permission(ctx, Permission::ManageActivityChecks).await?;

    let Some(summary) = ActivityService::new(&ctx.data().db)
        .close(settings.guild_id, id)
        .await?
    else {
        ctx.say(format!("Activity check #{} is already closed.", id))
            .await?;
        return Ok(());
    };

    let http = ctx.serenity_context().http.clone();
    if let Err(e) = ActivityNotificationService::new(http.clone())
        .post_summary(&summary)
        .await
    {
        tracing::error!("Failed to post summary of activity check {}: {}", id, e);
    }

    AuditLogService::new(&ctx.data().db, http)
        .record(
            settings.guild_id,
            AuditEvent::ActivityChecks,
            ctx.author().id.get(),
            format!(
                "Ended activity check #{} with {} responses",
                id,
                summary.responders.len()
            ),
        )
        .await;

    ctx.say(format!(
        "Ended activity check #{}: {} members responded.",
        id,
        summary.responders.len()
    ))
    .await?;

    Ok(())
}

/// Show who has responded to an activity check
#[poise::command(slash_command)]
pub async fn status(
    ctx: Context<'_>,
    #[description = "Activity check ID"] id: i32,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::ActivityChecks).await?;

    let summary = ActivityService::new(&ctx.data().db)
        .summary(settings.guild_id, id)
        .await?;

    ctx.send(
        poise::CreateReply::default()
            .embed(status_embed(&summary))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

fn status_embed(summary: &ActivitySummary) -> CreateEmbed {
    let check = &summary.check;
    let state = if check.is_over(Utc::now()) {
        "Closed".to_string()
    } else {
        format!("Open, closes <t:{}:R>", check.deadline.timestamp())
    };

    CreateEmbed::new()
        .title(format!("Activity check #{}", check.id))
        .field("Status", state, true)
        .field("Channel", format!("<#{}>", check.channel_id), true)
        .field("Responses", summary.responders.len().to_string(), true)
        .description(responder_list(&summary.responders))
}
