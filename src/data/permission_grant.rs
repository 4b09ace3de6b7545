//! Permission grant repository.
//!
//! Stores one row per (guild, subject kind, subject). A subject whose permissions are
//! cleared has its row deleted rather than kept at zero. Grants and revokes combine
//! bits in SQL so overlapping edits of one subject never drop each other's bits.

use migration::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    capability::FieldValue,
    model::permission::{PermissionGrant, Subject, SubjectKind},
};

pub struct PermissionGrantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionGrantRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        subject: Subject,
    ) -> Result<Option<PermissionGrant>, DbErr> {
        self.find_entity(guild_id, subject)
            .await?
            .map(PermissionGrant::from_entity)
            .transpose()
    }

    /// ORs `permissions` into the subject's grant, creating the row if needed.
    ///
    /// # Returns
    /// - `Ok(PermissionGrant)` - The stored grant
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn grant(
        &self,
        guild_id: u64,
        subject: Subject,
        permissions: FieldValue,
    ) -> Result<PermissionGrant, DbErr> {
        let entity = entity::prelude::PermissionGrant::insert(
            entity::permission_grant::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                subject_kind: ActiveValue::Set(subject.kind.as_str().to_string()),
                subject_id: ActiveValue::Set(subject.id.to_string()),
                permissions: ActiveValue::Set(permissions.bits()),
                ..Default::default()
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::permission_grant::Column::GuildId,
                entity::permission_grant::Column::SubjectKind,
                entity::permission_grant::Column::SubjectId,
            ])
            .value(
                entity::permission_grant::Column::Permissions,
                Expr::cust_with_values("\"permissions\" | ?", [permissions.bits()]),
            )
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        PermissionGrant::from_entity(entity)
    }

    /// Keeps only the `keep` bits of the subject's grant, deleting the row if none remain.
    ///
    /// # Returns
    /// - `Ok(Some(PermissionGrant))` - Permissions remain after masking
    /// - `Ok(None)` - The subject had no grant, or nothing remains
    pub async fn retain(
        &self,
        guild_id: u64,
        subject: Subject,
        keep: FieldValue,
    ) -> Result<Option<PermissionGrant>, DbErr> {
        let result = entity::prelude::PermissionGrant::update_many()
            .col_expr(
                entity::permission_grant::Column::Permissions,
                Expr::cust_with_values("\"permissions\" & ?", [keep.bits()]),
            )
            .filter(subject_condition(guild_id, subject))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        entity::prelude::PermissionGrant::delete_many()
            .filter(subject_condition(guild_id, subject))
            .filter(entity::permission_grant::Column::Permissions.eq(0))
            .exec(self.db)
            .await?;

        self.find(guild_id, subject).await
    }

    /// Deletes the subject's grant.
    ///
    /// # Returns
    /// - `Ok(true)` - A grant existed and was removed
    /// - `Ok(false)` - The subject had no grant
    pub async fn delete(&self, guild_id: u64, subject: Subject) -> Result<bool, DbErr> {
        let result = entity::prelude::PermissionGrant::delete_many()
            .filter(subject_condition(guild_id, subject))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the grants that apply to a member: their own and those of their roles.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - The member's user ID
    /// - `role_ids` - Every role the member holds
    pub async fn get_for_member(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
    ) -> Result<Vec<PermissionGrant>, DbErr> {
        let mut subjects = Condition::any().add(
            Condition::all()
                .add(entity::permission_grant::Column::SubjectKind.eq(SubjectKind::User.as_str()))
                .add(entity::permission_grant::Column::SubjectId.eq(user_id.to_string())),
        );

        if !role_ids.is_empty() {
            subjects = subjects.add(
                Condition::all()
                    .add(
                        entity::permission_grant::Column::SubjectKind
                            .eq(SubjectKind::Role.as_str()),
                    )
                    .add(
                        entity::permission_grant::Column::SubjectId
                            .is_in(role_ids.iter().map(|id| id.to_string())),
                    ),
            );
        }

        entity::prelude::PermissionGrant::find()
            .filter(entity::permission_grant::Column::GuildId.eq(guild_id.to_string()))
            .filter(subjects)
            .all(self.db)
            .await?
            .into_iter()
            .map(PermissionGrant::from_entity)
            .collect()
    }

    /// Gets paginated grants for a guild, roles first.
    pub async fn get_by_guild_paginated(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<PermissionGrant>, u64), DbErr> {
        let paginator = entity::prelude::PermissionGrant::find()
            .filter(entity::permission_grant::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::permission_grant::Column::SubjectKind)
            .order_by_asc(entity::permission_grant::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let grants = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(PermissionGrant::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((grants, total))
    }

    pub async fn count_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::PermissionGrant::find()
            .filter(entity::permission_grant::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }

    async fn find_entity(
        &self,
        guild_id: u64,
        subject: Subject,
    ) -> Result<Option<entity::permission_grant::Model>, DbErr> {
        entity::prelude::PermissionGrant::find()
            .filter(subject_condition(guild_id, subject))
            .one(self.db)
            .await
    }
}

fn subject_condition(guild_id: u64, subject: Subject) -> Condition {
    Condition::all()
        .add(entity::permission_grant::Column::GuildId.eq(guild_id.to_string()))
        .add(entity::permission_grant::Column::SubjectKind.eq(subject.kind.as_str()))
        .add(entity::permission_grant::Column::SubjectId.eq(subject.id.to_string()))
}
