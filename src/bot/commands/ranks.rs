//! `/ranks`: point thresholds that earn a named rank and optionally a role.

use serenity::all::{CreateEmbed, Role};

use crate::{
    bot::{guard, start::Context},
    capability::flags::{GuildFlag, Permission},
    error::AppError,
    model::rank::{CreateRankParam, Rank},
    service::rank::RankService,
};

/// Manage leaderboard ranks
#[poise::command(
    slash_command,
    guild_only,
    subcommands("add", "remove", "list"),
    subcommand_required
)]
pub async fn ranks(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Add a rank reached at a number of points
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Rank name"] name: String,
    #[description = "Points needed to reach this rank"]
    #[min = 0]
    min_points: i64,
    #[description = "Role given to members holding this rank"] role: Option<Role>,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;
    guard::require_permission(ctx, Permission::ManageRanks).await?;

    let rank = RankService::new(&ctx.data().db)
        .create(CreateRankParam {
            guild_id: settings.guild_id,
            name,
            role_id: role.map(|role| role.id.get()),
            min_points,
        })
        .await?;

    ctx.say(format!("Added rank {}.", rank_line(&rank))).await?;

    Ok(())
}

/// Remove a rank
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Rank ID, as shown by /ranks list"] id: i32,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;
    guard::require_permission(ctx, Permission::ManageRanks).await?;

    let rank = RankService::new(&ctx.data().db)
        .remove(settings.guild_id, id)
        .await?;

    ctx.say(format!("Removed rank `{}`.", rank.name)).await?;

    Ok(())
}

/// List the server's ranks
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Leaderboard).await?;

    let ranks = RankService::new(&ctx.data().db)
        .list(settings.guild_id)
        .await?;

    let embed = CreateEmbed::new()
        .title("Ranks")
        .description(rank_list(&ranks));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn rank_line(rank: &Rank) -> String {
    let role = rank
        .role_id
        .map(|role_id| format!(" (<@&{}>)", role_id))
        .unwrap_or_default();

    format!(
        "`#{}` **{}** at {} points{}",
        rank.id, rank.name, rank.min_points, role
    )
}

fn rank_list(ranks: &[Rank]) -> String {
    if ranks.is_empty() {
        return "No ranks yet. Add one with `/ranks add`.".to_string();
    }

    ranks.iter().map(rank_line).collect::<Vec<_>>().join("\n")
}
