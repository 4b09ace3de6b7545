//! `/permissions`: bot permissions for roles and users.
//!
//! `Manage permissions` covers every permission except `Administrator`; granting,
//! revoking or clearing `Administrator` needs `Administrator` itself.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, Role, User},
    async_trait,
};

use crate::{
    bot::{guard, paginate, start::Context},
    capability::{
        flags::{AuditEvent, Permission},
        Flag,
    },
    error::AppError,
    model::permission::{PermissionGrant, Subject},
    pagination::PageSource,
    service::{audit::AuditLogService, permission::PermissionService},
};

/// Manage who can use the bot's commands
#[poise::command(
    slash_command,
    guild_only,
    subcommands("grant", "revoke", "clear", "show", "list"),
    subcommand_required
)]
pub async fn permissions(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Grant a permission to a role or user
#[poise::command(slash_command)]
pub async fn grant(
    ctx: Context<'_>,
    #[description = "Permission to grant"] permission: Permission,
    #[description = "Role to grant it to"] role: Option<Role>,
    #[description = "User to grant it to"] user: Option<User>,
) -> Result<(), AppError> {
    guard::require_permission(ctx, required_to_change(&[permission])).await?;

    let guild_id = guard::guild_id(ctx)?;
    let subject = subject(role.as_ref(), user.as_ref())?;

    let stored = PermissionService::new(&ctx.data().db)
        .grant(guild_id, subject, &[permission])
        .await?;

    let description = format!(
        "Granted `{}` to {}. They now have: {}",
        permission.name(),
        subject.mention(),
        permission_list(&stored.listed())
    );

    audit(ctx, guild_id, description.clone()).await;
    ctx.say(description).await?;

    Ok(())
}

/// Revoke a permission from a role or user
#[poise::command(slash_command)]
pub async fn revoke(
    ctx: Context<'_>,
    #[description = "Permission to revoke"] permission: Permission,
    #[description = "Role to revoke it from"] role: Option<Role>,
    #[description = "User to revoke it from"] user: Option<User>,
) -> Result<(), AppError> {
    guard::require_permission(ctx, required_to_change(&[permission])).await?;

    let guild_id = guard::guild_id(ctx)?;
    let subject = subject(role.as_ref(), user.as_ref())?;

    let remaining = PermissionService::new(&ctx.data().db)
        .revoke(guild_id, subject, &[permission])
        .await?;

    let description = format!(
        "Revoked `{}` from {}. They now have: {}",
        permission.name(),
        subject.mention(),
        permission_list(&remaining.map(|grant| grant.listed()).unwrap_or_default())
    );

    audit(ctx, guild_id, description.clone()).await;
    ctx.say(description).await?;

    Ok(())
}

/// Remove every permission of a role or user
#[poise::command(slash_command)]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Role to clear"] role: Option<Role>,
    #[description = "User to clear"] user: Option<User>,
) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::ManagePermissions).await?;

    let guild_id = guard::guild_id(ctx)?;
    let subject = subject(role.as_ref(), user.as_ref())?;
    let service = PermissionService::new(&ctx.data().db);

    if let Some(existing) = service.show(guild_id, subject).await? {
        guard::require_permission(ctx, required_to_change(&existing.listed())).await?;
    }

    let had_grant = service.clear(guild_id, subject).await?;

    if !had_grant {
        ctx.say(format!("{} has no permissions.", subject.mention()))
            .await?;
        return Ok(());
    }

    let description = format!("Cleared every permission of {}.", subject.mention());

    audit(ctx, guild_id, description.clone()).await;
    ctx.say(description).await?;

    Ok(())
}

/// Show the permissions of a role or user
#[poise::command(slash_command)]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Role to show"] role: Option<Role>,
    #[description = "User to show"] user: Option<User>,
) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::ManagePermissions).await?;

    let guild_id = guard::guild_id(ctx)?;
    let subject = subject(role.as_ref(), user.as_ref())?;

    let grant = PermissionService::new(&ctx.data().db)
        .show(guild_id, subject)
        .await?;

    ctx.send(
        poise::CreateReply::default()
            .content(format!(
                "{} has: {}",
                subject.mention(),
                permission_list(&grant.map(|grant| grant.listed()).unwrap_or_default())
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// List every permission grant in this server
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), AppError> {
    guard::require_permission(ctx, Permission::ManagePermissions).await?;

    let guild_id = guard::guild_id(ctx)?;
    let db = ctx.data().db.clone();

    paginate::paginate(ctx, GrantPages { db, guild_id }).await
}

struct GrantPages {
    db: DatabaseConnection,
    guild_id: u64,
}

#[async_trait]
impl PageSource for GrantPages {
    type Page = CreateEmbed;
    type Error = AppError;

    async fn fetch_page(&self, index: u64, per_page: u64) -> Result<CreateEmbed, AppError> {
        let (grants, _) = PermissionService::new(&self.db)
            .list(self.guild_id, index, per_page)
            .await?;

        Ok(CreateEmbed::new()
            .title("Permission grants")
            .description(grant_lines(&grants)))
    }

    async fn count(&self) -> Result<Option<u64>, AppError> {
        PermissionService::new(&self.db)
            .count(self.guild_id)
            .await
            .map(Some)
    }
}

/// Bot permission the invoker needs to grant, revoke or clear `permissions`.
fn required_to_change(permissions: &[Permission]) -> Permission {
    if permissions.contains(&Permission::Administrator) {
        Permission::Administrator
    } else {
        Permission::ManagePermissions
    }
}

/// Resolves the role-or-user option pair; exactly one must be given.
fn subject(role: Option<&Role>, user: Option<&User>) -> Result<Subject, AppError> {
    match (role, user) {
        (Some(role), None) => Ok(Subject::role(role.id.get())),
        (None, Some(user)) => Ok(Subject::user(user.id.get())),
        _ => Err(AppError::BadRequest(
            "Pick either a role or a user.".to_string(),
        )),
    }
}

fn grant_lines(grants: &[PermissionGrant]) -> String {
    if grants.is_empty() {
        return "No permissions have been granted yet.".to_string();
    }

    grants
        .iter()
        .map(|grant| {
            format!(
                "{}: {}",
                grant.subject.mention(),
                permission_list(&grant.listed())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn permission_list(permissions: &[Permission]) -> String {
    if permissions.is_empty() {
        return "nothing".to_string();
    }

    permissions
        .iter()
        .map(|permission| format!("`{}`", permission.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

async fn audit(ctx: Context<'_>, guild_id: u64, description: String) {
    AuditLogService::new(&ctx.data().db, ctx.serenity_context().http.clone())
        .record(
            guild_id,
            AuditEvent::PermissionChanges,
            ctx.author().id.get(),
            description,
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_permissions_by_name() {
        assert_eq!(permission_list(&[]), "nothing");
        assert_eq!(
            permission_list(&[Permission::ManageRanks, Permission::UseProxy]),
            "`Manage ranks`, `Use proxy`"
        );
    }

    /// Tests which permission is needed to hand out other permissions.
    ///
    /// Expected: Administrator only when Administrator is among the changed permissions
    #[test]
    fn administrator_changes_need_administrator() {
        assert_eq!(
            required_to_change(&[Permission::Administrator]),
            Permission::Administrator
        );
        assert_eq!(
            required_to_change(&[Permission::UseProxy, Permission::Administrator]),
            Permission::Administrator
        );
        assert_eq!(
            required_to_change(&[Permission::ManagePermissions]),
            Permission::ManagePermissions
        );
        assert_eq!(required_to_change(&[]), Permission::ManagePermissions);
    }

    #[test]
    fn empty_grant_page_has_placeholder() {
        assert_eq!(grant_lines(&[]), "No permissions have been granted yet.");
    }
}
