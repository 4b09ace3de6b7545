//! Guild configuration service.
//!
//! Feature and audit toggles are applied through the shared flag tables. Each toggle
//! is a single masked write, so toggles racing on the same guild all land.

use sea_orm::DatabaseConnection;

use crate::{
    capability::{
        clear,
        flags::{AuditEvent, GuildFlag},
        BitAssignment, FieldValue, Flag,
    },
    data::guild::GuildRepository,
    error::AppError,
    model::guild::GuildSettings,
};

pub struct GuildService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a guild the bot can see, refreshing the stored name.
    pub async fn register(&self, guild_id: u64, name: String) -> Result<GuildSettings, AppError> {
        let repo = GuildRepository::new(self.db);

        Ok(repo.upsert(guild_id, name).await?)
    }

    /// Gets the settings of a registered guild.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Stored settings
    /// - `Err(AppError::NotFound)` - The guild was never registered
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_settings(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        let repo = GuildRepository::new(self.db);

        repo.find_by_guild_id(guild_id)
            .await?
            .ok_or_else(not_registered)
    }

    /// Gets the settings, failing unless `flag` is enabled.
    pub async fn require_feature(
        &self,
        guild_id: u64,
        flag: GuildFlag,
    ) -> Result<GuildSettings, AppError> {
        let settings = self.get_settings(guild_id).await?;

        if !settings.has_feature(flag) {
            return Err(AppError::FeatureDisabled(flag));
        }

        Ok(settings)
    }

    /// Switches a feature on or off.
    pub async fn set_feature(
        &self,
        guild_id: u64,
        flag: GuildFlag,
        enabled: bool,
    ) -> Result<GuildSettings, AppError> {
        let (keep, set) = toggle_masks(GuildFlag::assignment(), flag, enabled);

        GuildRepository::new(self.db)
            .update_flags(guild_id, keep, set)
            .await?
            .ok_or_else(not_registered)
    }

    /// Switches audit logging of one event on or off.
    pub async fn set_audit_event(
        &self,
        guild_id: u64,
        event: AuditEvent,
        enabled: bool,
    ) -> Result<GuildSettings, AppError> {
        let (keep, set) = toggle_masks(AuditEvent::assignment(), event, enabled);

        GuildRepository::new(self.db)
            .update_audit_events(guild_id, keep, set)
            .await?
            .ok_or_else(not_registered)
    }

    /// Sets or clears the channel audit entries are posted to.
    pub async fn set_log_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<GuildSettings, AppError> {
        GuildRepository::new(self.db)
            .set_log_channel(guild_id, channel_id)
            .await?
            .ok_or_else(not_registered)
    }
}

/// `(keep, set)` masks that switch one flag while leaving every other known flag as stored.
fn toggle_masks<F: Flag>(
    assignment: &BitAssignment<F>,
    flag: F,
    enabled: bool,
) -> (FieldValue, FieldValue) {
    if enabled {
        (assignment.full(), assignment.grant(clear(), flag))
    } else {
        (assignment.revoke(assignment.full(), flag), clear())
    }
}

fn not_registered() -> AppError {
    AppError::NotFound("This server is not registered yet, try again in a moment.".to_string())
}
