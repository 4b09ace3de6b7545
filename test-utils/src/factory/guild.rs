//! Guild factory for creating test guild entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guilds with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild::GuildFactory;
///
/// let guild = GuildFactory::new(&db)
///     .guild_id("987654321")
///     .flags(0b11)
///     .build()
///     .await?;
/// ```
pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    flags: i64,
    audit_events: i64,
    log_channel_id: Option<String>,
}

impl<'a> GuildFactory<'a> {
    /// Creates a new GuildFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: next counter value
    /// - name: `"Guild {id}"`
    /// - flags, audit_events: `0`
    /// - log_channel_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
            flags: 0,
            audit_events: 0,
            log_channel_id: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the raw feature bits.
    pub fn flags(mut self, flags: i64) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the raw audit event bits.
    pub fn audit_events(mut self, audit_events: i64) -> Self {
        self.audit_events = audit_events;
        self
    }

    pub fn log_channel_id(mut self, log_channel_id: Option<&str>) -> Self {
        self.log_channel_id = log_channel_id.map(str::to_string);
        self
    }

    /// Builds and inserts the guild entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::guild::Model)` - Created guild entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild::Model, DbErr> {
        entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            flags: ActiveValue::Set(self.flags),
            audit_events: ActiveValue::Set(self.audit_events),
            log_channel_id: ActiveValue::Set(self.log_channel_id),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild with default values.
///
/// Shorthand for `GuildFactory::new(db).build().await`.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::guild::Model, DbErr> {
    GuildFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_guild_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let guild = create_guild(db).await?;

        assert!(!guild.guild_id.is_empty());
        assert_eq!(guild.flags, 0);
        assert!(guild.log_channel_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_guild_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let guild = GuildFactory::new(db)
            .guild_id("987654321")
            .name("CustomGuild")
            .flags(5)
            .log_channel_id(Some("42"))
            .build()
            .await?;

        assert_eq!(guild.guild_id, "987654321");
        assert_eq!(guild.name, "CustomGuild");
        assert_eq!(guild.flags, 5);
        assert_eq!(guild.log_channel_id, Some("42".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_guilds() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let guild1 = create_guild(db).await?;
        let guild2 = create_guild(db).await?;

        assert_ne!(guild1.guild_id, guild2.guild_id);

        Ok(())
    }
}
