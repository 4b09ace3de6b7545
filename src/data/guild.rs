//! Guild settings repository.
//!
//! Guild rows are created when the bot first sees a guild and hold the feature and
//! audit bitfields. Bitfields are rewritten in SQL as `(column & keep) | set`, so
//! concurrent toggles of different flags never undo each other.

use chrono::Utc;
use migration::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::{capability::FieldValue, model::guild::GuildSettings};

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a guild or refreshes its name if it already exists.
    ///
    /// Flags, audit events and the log channel of an existing guild are left untouched.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `name` - Current guild display name
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - The inserted or updated guild
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(&self, guild_id: u64, name: String) -> Result<GuildSettings, DbErr> {
        let entity = entity::prelude::Guild::insert(entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name),
            flags: ActiveValue::Set(0),
            audit_events: ActiveValue::Set(0),
            log_channel_id: ActiveValue::Set(None),
            joined_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::guild::Column::GuildId)
                .update_column(entity::guild::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildSettings::from_entity(entity)
    }

    /// Finds a guild by its Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))`: Guild found in database
    /// - `Ok(None)`: Guild not registered yet
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildSettings>, DbErr> {
        entity::prelude::Guild::find()
            .filter(entity::guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(GuildSettings::from_entity)
            .transpose()
    }

    /// Rewrites the feature bits as `(flags & keep) | set` in a single statement.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Settings after the update
    /// - `Ok(None)` - The guild is not registered
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_flags(
        &self,
        guild_id: u64,
        keep: FieldValue,
        set: FieldValue,
    ) -> Result<Option<GuildSettings>, DbErr> {
        self.update_bits(guild_id, entity::guild::Column::Flags, "flags", keep, set)
            .await
    }

    /// Rewrites the audited event bits as `(audit_events & keep) | set`.
    pub async fn update_audit_events(
        &self,
        guild_id: u64,
        keep: FieldValue,
        set: FieldValue,
    ) -> Result<Option<GuildSettings>, DbErr> {
        self.update_bits(
            guild_id,
            entity::guild::Column::AuditEvents,
            "audit_events",
            keep,
            set,
        )
        .await
    }

    pub async fn set_log_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<Option<GuildSettings>, DbErr> {
        self.update(guild_id, |guild| {
            guild.log_channel_id = ActiveValue::Set(channel_id.map(|id| id.to_string()));
        })
        .await
    }

    async fn update_bits(
        &self,
        guild_id: u64,
        column: entity::guild::Column,
        column_name: &str,
        keep: FieldValue,
        set: FieldValue,
    ) -> Result<Option<GuildSettings>, DbErr> {
        let result = entity::prelude::Guild::update_many()
            .col_expr(
                column,
                Expr::cust_with_values(
                    format!("(\"{}\" & ?) | ?", column_name),
                    [keep.bits(), set.bits()],
                ),
            )
            .filter(entity::guild::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_guild_id(guild_id).await
    }

    async fn update(
        &self,
        guild_id: u64,
        apply: impl FnOnce(&mut entity::guild::ActiveModel),
    ) -> Result<Option<GuildSettings>, DbErr> {
        let Some(guild) = entity::prelude::Guild::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::guild::ActiveModel = guild.into();
        apply(&mut active_model);

        let updated = active_model.update(self.db).await?;

        GuildSettings::from_entity(updated).map(Some)
    }
}
