use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityName, EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Guild, Rank};
///
/// let test = TestBuilder::new()
///     .with_table(Guild)
///     .with_table(Rank)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Composite unique indexes of the added tables, created after every table.
    indexes: Vec<IndexCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax, along with the composite unique indexes the migrations put on
    /// that table. Tables with foreign keys must be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.indexes.extend(unique_indexes(entity.table_name()));
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables needed for activity checks and their responses.
    pub fn with_activity_tables(self) -> Self {
        self.with_table(ActivityCheck).with_table(ActivityResponse)
    }

    /// Adds the leaderboard and rank tables.
    pub fn with_leaderboard_tables(self) -> Self {
        self.with_table(LeaderboardEntry).with_table(Rank)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

/// Unique indexes that the upserts and duplicate checks rely on, keyed by table name.
fn unique_indexes(table: &str) -> Vec<IndexCreateStatement> {
    use entity::{
        activity_response, blacklist_entry, diplomacy_link, leaderboard_entry,
        permission_grant, rank,
    };

    match table {
        "permission_grant" => vec![unique_index(
            "idx_permission_grant_subject_unique",
            PermissionGrant,
            [
                permission_grant::Column::GuildId,
                permission_grant::Column::SubjectKind,
                permission_grant::Column::SubjectId,
            ],
        )],
        "blacklist_entry" => vec![unique_index(
            "idx_blacklist_entry_guild_user_unique",
            BlacklistEntry,
            [
                blacklist_entry::Column::GuildId,
                blacklist_entry::Column::UserId,
            ],
        )],
        "leaderboard_entry" => vec![unique_index(
            "idx_leaderboard_entry_guild_user_unique",
            LeaderboardEntry,
            [
                leaderboard_entry::Column::GuildId,
                leaderboard_entry::Column::UserId,
            ],
        )],
        "rank" => vec![unique_index(
            "idx_rank_guild_min_points_unique",
            Rank,
            [rank::Column::GuildId, rank::Column::MinPoints],
        )],
        "activity_response" => vec![unique_index(
            "idx_activity_response_check_user_unique",
            ActivityResponse,
            [
                activity_response::Column::ActivityCheckId,
                activity_response::Column::UserId,
            ],
        )],
        "diplomacy_link" => vec![unique_index(
            "idx_diplomacy_link_guild_partner_unique",
            DiplomacyLink,
            [
                diplomacy_link::Column::GuildId,
                diplomacy_link::Column::PartnerGuildId,
            ],
        )],
        _ => Vec::new(),
    }
}

fn unique_index<E: EntityTrait, const N: usize>(
    name: &str,
    entity: E,
    columns: [E::Column; N],
) -> IndexCreateStatement {
    let mut index = Index::create();
    index.name(name).table(entity).unique();

    for column in columns {
        index.col(column);
    }

    index.to_owned()
}
