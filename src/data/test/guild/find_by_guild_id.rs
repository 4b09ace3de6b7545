use super::*;

/// Tests finding a registered guild.
///
/// Expected: Ok(Some) with parsed settings
#[tokio::test]
async fn finds_existing_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let flags = GuildFlag::assignment().grant(FieldValue::EMPTY, GuildFlag::Leaderboard);
    let guild = factory::guild::GuildFactory::new(db)
        .flags(flags.bits())
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let found = repo
        .find_by_guild_id(guild.guild_id.parse().unwrap())
        .await?
        .unwrap();

    assert!(found.has_feature(GuildFlag::Leaderboard));
    assert!(!found.has_feature(GuildFlag::Diplomacy));

    Ok(())
}

/// Tests finding a guild that was never registered.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let found = repo.find_by_guild_id(999).await?;

    assert!(found.is_none());

    Ok(())
}
