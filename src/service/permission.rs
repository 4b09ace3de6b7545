//! Bot permission service.
//!
//! A member's effective permissions are the union of their own grant and the grants of
//! every role they hold. `Permission::Administrator` implies every other permission.
//! Discord-side bypasses (server administrators and the owner) are checked by the
//! command guard before this service is consulted.

use sea_orm::DatabaseConnection;

use crate::{
    capability::{clear, flags::Permission, FieldValue},
    data::permission_grant::PermissionGrantRepository,
    error::AppError,
    model::permission::{PermissionGrant, Subject},
};

pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the union of every grant that applies to the member.
    pub async fn effective(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
    ) -> Result<FieldValue, AppError> {
        let repo = PermissionGrantRepository::new(self.db);
        let grants = repo.get_for_member(guild_id, user_id, role_ids).await?;

        Ok(grants
            .iter()
            .fold(FieldValue::EMPTY, |acc, grant| acc.union(grant.permissions)))
    }

    /// Checks whether the member holds `permission`, directly or via Administrator.
    pub async fn has_permission(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
        permission: Permission,
    ) -> Result<bool, AppError> {
        let effective = self.effective(guild_id, user_id, role_ids).await?;
        let permissions = Permission::assignment();

        Ok(permissions.has_all(effective, Permission::Administrator)
            || permissions.has_all(effective, permission))
    }

    /// Adds permissions to a subject's grant.
    pub async fn grant(
        &self,
        guild_id: u64,
        subject: Subject,
        granted: &[Permission],
    ) -> Result<PermissionGrant, AppError> {
        let value = Permission::assignment().grant(clear(), granted);

        // Stored grants are never empty.
        if value.is_empty() {
            return Err(AppError::BadRequest(
                "Pick at least one permission to grant.".to_string(),
            ));
        }

        let repo = PermissionGrantRepository::new(self.db);

        Ok(repo.grant(guild_id, subject, value).await?)
    }

    /// Removes permissions from a subject's grant.
    ///
    /// # Returns
    /// - `Ok(Some(PermissionGrant))` - Permissions remain after the revoke
    /// - `Ok(None)` - Nothing remains; the grant row was deleted
    pub async fn revoke(
        &self,
        guild_id: u64,
        subject: Subject,
        revoked: &[Permission],
    ) -> Result<Option<PermissionGrant>, AppError> {
        let repo = PermissionGrantRepository::new(self.db);
        let permissions = Permission::assignment();
        let keep = permissions.revoke(permissions.full(), revoked);

        Ok(repo.retain(guild_id, subject, keep).await?)
    }

    /// Removes every permission of a subject.
    ///
    /// Returns whether the subject had a grant.
    pub async fn clear(&self, guild_id: u64, subject: Subject) -> Result<bool, AppError> {
        let repo = PermissionGrantRepository::new(self.db);

        Ok(repo.delete(guild_id, subject).await?)
    }

    pub async fn show(
        &self,
        guild_id: u64,
        subject: Subject,
    ) -> Result<Option<PermissionGrant>, AppError> {
        let repo = PermissionGrantRepository::new(self.db);

        Ok(repo.find(guild_id, subject).await?)
    }

    pub async fn list(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<PermissionGrant>, u64), AppError> {
        let repo = PermissionGrantRepository::new(self.db);

        Ok(repo.get_by_guild_paginated(guild_id, page, per_page).await?)
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        let repo = PermissionGrantRepository::new(self.db);

        Ok(repo.count_by_guild(guild_id).await?)
    }
}
