use super::*;

/// Tests registering a guild the bot has never seen.
///
/// Verifies that the repository inserts a new row with no features, no audited
/// events and no log channel.
///
/// Expected: Ok with empty settings
#[tokio::test]
async fn inserts_new_guild_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let guild = repo.upsert(123, "Test Guild".to_string()).await?;

    assert_eq!(guild.guild_id, 123);
    assert_eq!(guild.name, "Test Guild");
    assert!(guild.flags.is_empty());
    assert!(guild.audit_events.is_empty());
    assert!(guild.log_channel_id.is_none());

    Ok(())
}

/// Tests upserting a guild that is already registered.
///
/// Verifies that only the name is refreshed and the configured feature bits and log
/// channel survive.
///
/// Expected: Ok with new name and original settings
#[tokio::test]
async fn keeps_settings_when_guild_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::guild::GuildFactory::new(db)
        .name("Old Name")
        .flags(0b101)
        .log_channel_id(Some("77"))
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let guild = repo
        .upsert(existing.guild_id.parse().unwrap(), "New Name".to_string())
        .await?;

    assert_eq!(guild.name, "New Name");
    assert_eq!(guild.flags, FieldValue::new(0b101));
    assert_eq!(guild.log_channel_id, Some(77));

    let rows = Guild::find().all(db).await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}
