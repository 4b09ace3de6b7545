//! Permission grant factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for permission grant rows. Defaults to a grant for a fresh role.
pub struct PermissionGrantFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    subject_kind: &'static str,
    subject_id: String,
    permissions: i64,
}

impl<'a> PermissionGrantFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            subject_kind: "role",
            subject_id: next_id().to_string(),
            permissions: 0,
        }
    }

    /// Grants to the given role.
    pub fn role(mut self, role_id: impl Into<String>) -> Self {
        self.subject_kind = "role";
        self.subject_id = role_id.into();
        self
    }

    /// Grants to the given user.
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.subject_kind = "user";
        self.subject_id = user_id.into();
        self
    }

    /// Sets the raw permission bits.
    pub fn permissions(mut self, permissions: i64) -> Self {
        self.permissions = permissions;
        self
    }

    pub async fn build(self) -> Result<entity::permission_grant::Model, DbErr> {
        entity::permission_grant::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            subject_kind: ActiveValue::Set(self.subject_kind.to_string()),
            subject_id: ActiveValue::Set(self.subject_id),
            permissions: ActiveValue::Set(self.permissions),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a grant of `permissions` for a role.
pub async fn create_role_grant(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: &str,
    permissions: i64,
) -> Result<entity::permission_grant::Model, DbErr> {
    PermissionGrantFactory::new(db, guild_id)
        .role(role_id)
        .permissions(permissions)
        .build()
        .await
}

/// Creates a grant of `permissions` for a user.
pub async fn create_user_grant(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    permissions: i64,
) -> Result<entity::permission_grant::Model, DbErr> {
    PermissionGrantFactory::new(db, guild_id)
        .user(user_id)
        .permissions(permissions)
        .build()
        .await
}
