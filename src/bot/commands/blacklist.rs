//! `/blacklist`: users who are not welcome in the server.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, GuildId, User, UserId},
    async_trait,
};

use crate::{
    bot::{guard, paginate, start::Context},
    capability::flags::{AuditEvent, GuildFlag, Permission},
    error::AppError,
    model::blacklist::{AddBlacklistOutcome, AddBlacklistParam, BlacklistEntry},
    pagination::PageSource,
    service::{audit::AuditLogService, blacklist::BlacklistService},
};

/// Manage the server's blacklist
#[poise::command(
    slash_command,
    guild_only,
    subcommands("add", "remove", "check", "list"),
    subcommand_required
)]
pub async fn blacklist(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Add a user to the blacklist
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "User to blacklist"] user: User,
    #[description = "Why they are blacklisted"] reason: Option<String>,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Blacklist).await?;
    guard::require_permission(ctx, Permission::ManageBlacklist).await?;

    let guild_id = settings.guild_id;
    let outcome = BlacklistService::new(&ctx.data().db)
        .add(AddBlacklistParam {
            guild_id,
            user_id: user.id.get(),
            reason,
            added_by: ctx.author().id.get(),
        })
        .await?;

    let entry = match outcome {
        AddBlacklistOutcome::AlreadyListed(entry) => {
            ctx.say(format!(
                "<@{}> is already blacklisted since <t:{}:D>.",
                entry.user_id,
                entry.created_at.timestamp()
            ))
            .await?;
            return Ok(());
        }
        AddBlacklistOutcome::Added(entry) => entry,
    };

    let mut content = format!("Blacklisted <@{}>.", entry.user_id);

    if settings.has_feature(GuildFlag::AutoBan) {
        content.push(' ');
        content.push_str(&ban_if_member(ctx, GuildId::new(guild_id), &entry).await);
    }

    audit(
        ctx,
        guild_id,
        format!(
            "Blacklisted <@{}>{}",
            entry.user_id,
            entry
                .reason
                .as_ref()
                .map(|reason| format!(": {}", reason))
                .unwrap_or_default()
        ),
    )
    .await;
    ctx.say(content).await?;

    Ok(())
}

/// Remove a user from the blacklist
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "User to remove"] user: User,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Blacklist).await?;
    guard::require_permission(ctx, Permission::ManageBlacklist).await?;

    let removed = BlacklistService::new(&ctx.data().db)
        .remove(settings.guild_id, user.id.get())
        .await?;

    if !removed {
        ctx.say(format!("<@{}> is not blacklisted.", user.id)).await?;
        return Ok(());
    }

    audit(
        ctx,
        settings.guild_id,
        format!("Removed <@{}> from the blacklist", user.id),
    )
    .await;
    ctx.say(format!("Removed <@{}> from the blacklist.", user.id))
        .await?;

    Ok(())
}

/// Check whether a user is blacklisted
#[poise::command(slash_command)]
pub async fn check(
    ctx: Context<'_>,
    #[description = "User to check"] user: User,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Blacklist).await?;
    guard::require_permission(ctx, Permission::ManageBlacklist).await?;

    let entry = BlacklistService::new(&ctx.data().db)
        .check(settings.guild_id, user.id.get())
        .await?;

    let content = match entry {
        Some(entry) => entry_line(&entry),
        None => format!("<@{}> is not blacklisted.", user.id),
    };

    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// List blacklisted users
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Blacklist).await?;
    guard::require_permission(ctx, Permission::ManageBlacklist).await?;

    let db = ctx.data().db.clone();

    paginate::paginate(
        ctx,
        BlacklistPages {
            db,
            guild_id: settings.guild_id,
        },
    )
    .await
}

struct BlacklistPages {
    db: DatabaseConnection,
    guild_id: u64,
}

#[async_trait]
impl PageSource for BlacklistPages {
    type Page = CreateEmbed;
    type Error = AppError;

    async fn fetch_page(&self, index: u64, per_page: u64) -> Result<CreateEmbed, AppError> {
        let (entries, _) = BlacklistService::new(&self.db)
            .list(self.guild_id, index, per_page)
            .await?;

        let description = if entries.is_empty() {
            "Nobody is blacklisted.".to_string()
        } else {
            entries.iter().map(entry_line).collect::<Vec<_>>().join("\n")
        };

        Ok(CreateEmbed::new()
            .title("Blacklist")
            .description(description))
    }

    async fn count(&self) -> Result<Option<u64>, AppError> {
        BlacklistService::new(&self.db)
            .count(self.guild_id)
            .await
            .map(Some)
    }
}

/// Bans a newly blacklisted user if they are in the server, describing the result.
async fn ban_if_member(ctx: Context<'_>, guild_id: GuildId, entry: &BlacklistEntry) -> String {
    let user_id = UserId::new(entry.user_id);

    if ctx.http().get_member(guild_id, user_id).await.is_err() {
        return "They will be banned if they join.".to_string();
    }

    let reason = entry.reason.as_deref().unwrap_or("Blacklisted");

    match guild_id.ban_with_reason(ctx.http(), user_id, 0, reason).await {
        Ok(()) => "They have been banned.".to_string(),
        Err(e) => {
            tracing::error!("Failed to ban blacklisted user {}: {}", user_id, e);
            "Banning them failed; check the bot's permissions.".to_string()
        }
    }
}

fn entry_line(entry: &BlacklistEntry) -> String {
    format!(
        "<@{}> added by <@{}> <t:{}:D>{}",
        entry.user_id,
        entry.added_by,
        entry.created_at.timestamp(),
        entry
            .reason
            .as_ref()
            .map(|reason| format!(": {}", reason))
            .unwrap_or_default()
    )
}

async fn audit(ctx: Context<'_>, guild_id: u64, description: String) {
    AuditLogService::new(&ctx.data().db, ctx.serenity_context().http.clone())
        .record(
            guild_id,
            AuditEvent::BlacklistChanges,
            ctx.author().id.get(),
            description,
        )
        .await;
}
