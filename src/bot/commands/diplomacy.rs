//! `/dpm`: diplomacy links that relay messages between partner servers.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, GuildChannel},
    async_trait,
};

use crate::{
    bot::{commands::parse_snowflake, guard, paginate, start::Context},
    capability::flags::{AuditEvent, GuildFlag, Permission},
    error::AppError,
    model::diplomacy::{CreateDiplomacyLinkParam, DiplomacyLink},
    pagination::PageSource,
    service::{audit::AuditLogService, diplomacy::DiplomacyService},
};

/// Manage diplomacy links with other servers
#[poise::command(
    slash_command,
    guild_only,
    subcommands("link", "unlink", "list"),
    subcommand_required
)]
pub async fn dpm(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Link a partner server to one of this server's channels
#[poise::command(slash_command)]
pub async fn link(
    ctx: Context<'_>,
    #[description = "ID of the partner server"] partner: String,
    #[description = "Channel used to talk to the partner"]
    #[channel_types("Text", "News", "PublicThread", "PrivateThread")]
    channel: GuildChannel,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Diplomacy).await?;
    guard::require_permission(ctx, Permission::ManageDiplomacy).await?;

    let partner_guild_id = parse_snowflake(&partner, "server")?;

    let service = DiplomacyService::new(&ctx.data().db);
    let link = service
        .link(CreateDiplomacyLinkParam {
            guild_id: settings.guild_id,
            partner_guild_id,
            channel_id: channel.id.get(),
        })
        .await?;
    let active = service
        .is_active(settings.guild_id, partner_guild_id)
        .await?;

    audit(
        ctx,
        settings.guild_id,
        format!(
            "Linked partner `{}` to <#{}>",
            link.partner_guild_id, link.channel_id
        ),
    )
    .await;

    let mut content = format!(
        "Messages in <#{}> will be relayed to server `{}`.",
        link.channel_id, link.partner_guild_id
    );
    if !active {
        content.push_str(
            " The link becomes active once the partner links back with diplomacy enabled.",
        );
    }
    ctx.say(content).await?;

    Ok(())
}

/// Remove the link to a partner server
#[poise::command(slash_command)]
pub async fn unlink(
    ctx: Context<'_>,
    #[description = "ID of the partner server"] partner: String,
) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Diplomacy).await?;
    guard::require_permission(ctx, Permission::ManageDiplomacy).await?;

    let partner_guild_id = parse_snowflake(&partner, "server")?;

    let removed = DiplomacyService::new(&ctx.data().db)
        .unlink(settings.guild_id, partner_guild_id)
        .await?;

    if !removed {
        ctx.say(format!("There is no link to server `{}`.", partner_guild_id))
            .await?;
        return Ok(());
    }

    audit(
        ctx,
        settings.guild_id,
        format!("Unlinked partner `{}`", partner_guild_id),
    )
    .await;
    ctx.say(format!("Unlinked server `{}`.", partner_guild_id))
        .await?;

    Ok(())
}

/// List diplomacy links
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), AppError> {
    let settings = guard::require_feature(ctx, GuildFlag::Diplomacy).await?;
    guard::require_permission(ctx, Permission::ManageDiplomacy).await?;

    let db = ctx.data().db.clone();

    paginate::paginate(
        ctx,
        LinkPages {
            db,
            guild_id: settings.guild_id,
        },
    )
    .await
}

struct LinkPages {
    db: DatabaseConnection,
    guild_id: u64,
}

#[async_trait]
impl PageSource for LinkPages {
    type Page = CreateEmbed;
    type Error = AppError;

    async fn fetch_page(&self, index: u64, per_page: u64) -> Result<CreateEmbed, AppError> {
        let service = DiplomacyService::new(&self.db);
        let (links, _) = service.list(self.guild_id, index, per_page).await?;

        let mut lines = Vec::with_capacity(links.len());
        for link in &links {
            let active = service
                .is_active(self.guild_id, link.partner_guild_id)
                .await?;
            lines.push(link_line(link, active));
        }

        let description = if lines.is_empty() {
            "No diplomacy links.".to_string()
        } else {
            lines.join("\n")
        };

        Ok(CreateEmbed::new()
            .title("Diplomacy links")
            .description(description))
    }

    async fn count(&self) -> Result<Option<u64>, AppError> {
        DiplomacyService::new(&self.db)
            .count(self.guild_id)
            .await
            .map(Some)
    }
}

fn link_line(link: &DiplomacyLink, active: bool) -> String {
    let state = if active { "active" } else { "pending" };

    format!(
        "`{}` in <#{}> ({})",
        link.partner_guild_id, link.channel_id, state
    )
}

async fn audit(ctx: Context<'_>, guild_id: u64, description: String) {
    AuditLogService::new(&ctx.data().db, ctx.serenity_context().http.clone())
        .record(
            guild_id,
            AuditEvent::Diplomacy,
            ctx.author().id.get(),
            description,
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn link_line_shows_state() {
        let link = DiplomacyLink {
            id: 1,
            guild_id: 10,
            partner_guild_id: 20,
            channel_id: 30,
            created_at: Utc::now(),
        };

        assert_eq!(link_line(&link, true), "`20` in <#30> (active)");
        assert_eq!(link_line(&link, false), "`20` in <#30> (pending)");
    }
}
