pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_guild_table;
mod m20260301_000002_create_permission_grant_table;
mod m20260301_000003_create_blacklist_entry_table;
mod m20260302_000004_create_leaderboard_entry_table;
mod m20260302_000005_create_rank_table;
mod m20260303_000006_create_activity_check_table;
mod m20260303_000007_create_activity_response_table;
mod m20260304_000008_create_diplomacy_link_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_guild_table::Migration),
            Box::new(m20260301_000002_create_permission_grant_table::Migration),
            Box::new(m20260301_000003_create_blacklist_entry_table::Migration),
            Box::new(m20260302_000004_create_leaderboard_entry_table::Migration),
            Box::new(m20260302_000005_create_rank_table::Migration),
            Box::new(m20260303_000006_create_activity_check_table::Migration),
            Box::new(m20260303_000007_create_activity_response_table::Migration),
            Box::new(m20260304_000008_create_diplomacy_link_table::Migration),
        ]
    }
}
