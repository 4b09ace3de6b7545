//! Checks run at the top of guild commands.

use crate::{
    bot::start::Context,
    capability::flags::{GuildFlag, Permission},
    error::AppError,
    model::guild::GuildSettings,
    service::{guild::GuildService, permission::PermissionService},
};

/// Gets the invoking guild's ID.
pub fn guild_id(ctx: Context<'_>) -> Result<u64, AppError> {
    ctx.guild_id()
        .map(|id| id.get())
        .ok_or(AppError::GuildOnly)
}

/// Fails unless the invoking guild has enabled `flag`.
pub async fn require_feature(ctx: Context<'_>, flag: GuildFlag) -> Result<GuildSettings, AppError> {
    let guild_id = guild_id(ctx)?;

    GuildService::new(&ctx.data().db)
        .require_feature(guild_id, flag)
        .await
}

/// Fails unless the invoking member holds `permission`.
///
/// Members with Discord's Administrator permission and the guild owner always pass.
pub async fn require_permission(ctx: Context<'_>, permission: Permission) -> Result<(), AppError> {
    let guild_id = guild_id(ctx)?;
    let member = ctx.author_member().await.ok_or(AppError::GuildOnly)?;

    if member
        .permissions
        .is_some_and(|permissions| permissions.administrator())
    {
        return Ok(());
    }

    let owner_id = ctx.guild().map(|guild| guild.owner_id);
    if owner_id == Some(member.user.id) {
        return Ok(());
    }

    let role_ids: Vec<u64> = member.roles.iter().map(|role| role.get()).collect();

    let allowed = PermissionService::new(&ctx.data().db)
        .has_permission(guild_id, member.user.id.get(), &role_ids, permission)
        .await?;

    if allowed {
        Ok(())
    } else {
        Err(AppError::MissingPermission(permission))
    }
}
