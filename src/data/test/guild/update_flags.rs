use super::*;

/// Tests masking a guild's feature bits.
///
/// Expected: Ok(Some) with bits outside `keep` cleared and `set` added
#[tokio::test]
async fn masks_and_sets_feature_bits() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let flags = GuildFlag::assignment();
    let guild = factory::guild::GuildFactory::new(db)
        .flags(flags.mask([GuildFlag::Leaderboard, GuildFlag::Blacklist]))
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let keep = flags.revoke(flags.full(), GuildFlag::Leaderboard);
    let set = flags.grant(FieldValue::EMPTY, GuildFlag::AutoBan);

    let repo = GuildRepository::new(db);
    let updated = repo.update_flags(guild_id, keep, set).await?.unwrap();

    assert_eq!(
        updated.features(),
        vec![GuildFlag::Blacklist, GuildFlag::AutoBan]
    );

    let stored = Guild::find_by_id(guild.guild_id).one(db).await?.unwrap();
    assert_eq!(
        stored.flags,
        flags.mask([GuildFlag::Blacklist, GuildFlag::AutoBan])
    );

    Ok(())
}

/// Tests two masked writes on the same guild issued at once.
///
/// Expected: the row holds both bits afterwards
#[tokio::test]
async fn concurrent_writes_keep_both_bits() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let flags = GuildFlag::assignment();
    let repo = GuildRepository::new(db);
    let (first, second) = tokio::join!(
        repo.update_flags(
            guild_id,
            flags.full(),
            flags.grant(FieldValue::EMPTY, GuildFlag::Diplomacy),
        ),
        repo.update_flags(
            guild_id,
            flags.full(),
            flags.grant(FieldValue::EMPTY, GuildFlag::Proxy),
        ),
    );
    first?;
    second?;

    let stored = repo.find_by_guild_id(guild_id).await?.unwrap();
    assert!(stored.has_feature(GuildFlag::Diplomacy));
    assert!(stored.has_feature(GuildFlag::Proxy));

    Ok(())
}

/// Tests updating audit events and the log channel together.
///
/// Expected: Ok(Some) with both columns changed
#[tokio::test]
async fn sets_audit_events_and_log_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let events = AuditEvent::assignment();

    let repo = GuildRepository::new(db);
    repo.update_audit_events(
        guild_id,
        events.full(),
        events.grant(FieldValue::EMPTY, AuditEvent::PointChanges),
    )
    .await?;
    let updated = repo.set_log_channel(guild_id, Some(55)).await?.unwrap();

    assert!(updated.audits(AuditEvent::PointChanges));
    assert!(!updated.audits(AuditEvent::ProxyUse));
    assert_eq!(updated.log_channel_id, Some(55));

    Ok(())
}

/// Tests updating a guild that does not exist.
///
/// Expected: Ok(None) without inserting a row
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let result = repo
        .update_flags(404, FieldValue::EMPTY, FieldValue::new(1))
        .await?;

    assert!(result.is_none());
    assert!(Guild::find().all(db).await?.is_empty());

    Ok(())
}
