//! `/points`, `/leaderboard` and `/rank`.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, GuildId, RoleId, User, UserId},
    async_trait,
};

use crate::{
    bot::{guard, paginate, start::Context},
    capability::flags::{AuditEvent, GuildFlag, Permission},
    error::AppError,
    model::leaderboard::{LeaderboardEntry, PointsChange, PointsUpdate},
    pagination::PageSource,
    service::{audit::AuditLogService, leaderboard::LeaderboardService},
};

/// Change a member's points
#[poise::command(
    slash_command,
    guild_only,
    subcommands("add", "remove", "set"),
    subcommand_required
)]
pub async fn points(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Give points to a member
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Member to reward"] user: User,
    #[description = "Points to add"]
    #[min = 1]
    #[max = 1_000_000_000]
    amount: i64,
) -> Result<(), AppError> {
    change_points(ctx, user, PointsChange::Add(amount)).await
}

/// Take points from a member
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Member to deduct from"] user: User,
    #[description = "Points to remove"]
    #[min = 1]
    #[max = 1_000_000_000]
    amount: i64,
) -> Result<(), AppError> {
    change_points(ctx, user, PointsChange::Remove(amount)).await
}

/// Set a member's points
#[poise::command(slash_command)]
pub async fn set(
    ctx: Context<'_>,
    #[description = "Member to update"] user: User,
    #[description = "New total"]
    #[min = 0]
    #[max = 1_000_000_000]
    amount: i64,
) -> Result<(), AppError> {
    change_points(ctx, user, PointsChange::Set(amount)).await
}

/// Show the server leaderboard
#[poise::command(slash_command, guild_only)]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;

    let db = ctx.data().db.clone();

    paginate::paginate(
        ctx,
        LeaderboardPages {
            db,
            guild_id: settings.guild_id,
        },
    )
    .await
}

/// Show a member's points, position and rank
#[poise::command(slash_command, guild_only)]
pub async fn rank(
    ctx: Context<'_>,
    #[description = "Member to look up; yourself by default"] user: Option<User>,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;

    let user_id = user
        .as_ref()
        .map(|user| user.id)
        .unwrap_or_else(|| ctx.author().id);

    let standing = LeaderboardService::new(&ctx.data().db)
        .standing(settings.guild_id, user_id.get())
        .await?;

    let rank = standing
        .rank
        .as_ref()
        .map(|rank| rank.name.clone())
        .unwrap_or_else(|| "Unranked".to_string());

    let embed = CreateEmbed::new()
        .description(format!("<@{}>", standing.user_id))
        .field("Points", standing.points.to_string(), true)
        .field("Position", format!("#{}", standing.position), true)
        .field("Rank", rank, true);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

async fn change_points(
    ctx: Context<'_>,
    user: User,
    change: PointsChange,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;
    guard::require_permission(ctx, Permission::ManageLeaderboard).await?;

    let guild_id = settings.guild_id;
    let update = LeaderboardService::new(&ctx.data().db)
        .adjust(guild_id, user.id.get(), change)
        .await?;

    let mut content = format!(
        "<@{}> now has {} points (was {}).",
        update.user_id, update.current, update.previous
    );

    if update.rank_changed() {
        let rank = update
            .new_rank
            .as_ref()
            .map(|rank| format!("`{}`", rank.name))
            .unwrap_or_else(|| "no rank".to_string());
        content.push_str(&format!(" Their rank is now {}.", rank));

        if let Err(e) = apply_rank_roles(ctx, GuildId::new(guild_id), &update).await {
            tracing::error!(
                "Failed to update rank roles of user {} in guild {}: {}",
                update.user_id,
                guild_id,
                e
            );
            content.push_str(
                " Their rank roles could not be updated; check the bot's role position.",
            );
        }
    }

    AuditLogService::new(&ctx.data().db, ctx.serenity_context().http.clone())
        .record(
            guild_id,
            AuditEvent::PointChanges,
            ctx.author().id.get(),
            format!(
                "<@{}>: {} -> {} points",
                update.user_id, update.previous, update.current
            ),
        )
        .await;

    ctx.say(content).await?;

    Ok(())
}

/// Swaps the old rank's role for the new one.
async fn apply_rank_roles(
    ctx: Context<'_>,
    guild_id: GuildId,
    update: &PointsUpdate,
) -> Result<(), serenity::Error> {
    let user_id = UserId::new(update.user_id);
    let reason = Some("Rank change");

    let old_role = update.old_rank.as_ref().and_then(|rank| rank.role_id);
    let new_role = update.new_rank.as_ref().and_then(|rank| rank.role_id);

    if old_role == new_role {
        return Ok(());
    }

    if let Some(role_id) = old_role {
        ctx.http()
            .remove_member_role(guild_id, user_id, RoleId::new(role_id), reason)
            .await?;
    }

    if let Some(role_id) = new_role {
        ctx.http()
            .add_member_role(guild_id, user_id, RoleId::new(role_id), reason)
            .await?;
    }

    Ok(())
}

struct LeaderboardPages {
    db: DatabaseConnection,
    guild_id: u64,
}

#[async_trait]
impl PageSource for LeaderboardPages {
    type Page = CreateEmbed;
    type Error = AppError;

    async fn fetch_page(&self, index: u64, per_page: u64) -> Result<CreateEmbed, AppError> {
        let (entries, _) = LeaderboardService::new(&self.db)
            .page(self.guild_id, index, per_page)
            .await?;

        Ok(CreateEmbed::new()
            .title("Leaderboard")
            .description(standings(&entries, index * per_page)))
    }

    async fn count(&self) -> Result<Option<u64>, AppError> {
        LeaderboardService::new(&self.db)
            .count(self.guild_id)
            .await
            .map(Some)
    }
}

/// One line per entry, numbered from `offset + 1`.
fn standings(entries: &[LeaderboardEntry], offset: u64) -> String {
    if entries.is_empty() {
        return "Nobody has any points yet.".to_string();
    }

    entries
        .iter()
        .zip(offset + 1..)
        .map(|(entry, place)| {
            format!(
                "**{}.** <@{}>: {} points",
                place, entry.user_id, entry.points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
