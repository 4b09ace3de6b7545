//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates two guilds that registered each other for diplomacy.
///
/// Both guilds get `flags` as their feature bits and one link row each, pointing at
/// a fresh local channel.
///
/// # Returns
/// - `Ok(((guild_a, link_a), (guild_b, link_b)))` - Guilds with their own link rows
/// - `Err(DbErr)` - Database error during creation
#[allow(clippy::type_complexity)]
pub async fn create_mutual_diplomacy_links(
    db: &DatabaseConnection,
    flags: i64,
) -> Result<
    (
        (entity::guild::Model, entity::diplomacy_link::Model),
        (entity::guild::Model, entity::diplomacy_link::Model),
    ),
    DbErr,
> {
    let guild_a = crate::factory::guild::GuildFactory::new(db)
        .flags(flags)
        .build()
        .await?;
    let guild_b = crate::factory::guild::GuildFactory::new(db)
        .flags(flags)
        .build()
        .await?;

    let link_a =
        crate::factory::diplomacy_link::create_diplomacy_link(db, &guild_a.guild_id, &guild_b.guild_id)
            .await?;
    let link_b =
        crate::factory::diplomacy_link::create_diplomacy_link(db, &guild_b.guild_id, &guild_a.guild_id)
            .await?;

    Ok(((guild_a, link_a), (guild_b, link_b)))
}
