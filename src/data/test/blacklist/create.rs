use super::*;

/// Tests adding a user to the blacklist.
///
/// Expected: Ok with the entry findable by guild and user
#[tokio::test]
async fn creates_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(BlacklistEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BlacklistRepository::new(db);
    let entry = repo
        .create(AddBlacklistParam {
            guild_id: 1,
            user_id: 42,
            reason: Some("spam".to_string()),
            added_by: 7,
        })
        .await?;

    assert_eq!(entry.user_id, 42);
    assert_eq!(entry.reason.as_deref(), Some("spam"));
    assert_eq!(entry.added_by, 7);

    let found = repo.find(1, 42).await?.unwrap();
    assert_eq!(found.id, entry.id);

    Ok(())
}

/// Tests that entries are scoped per guild.
///
/// Expected: Ok(None) when looking the user up in another guild
#[tokio::test]
async fn find_is_scoped_to_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(BlacklistEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::blacklist_entry::BlacklistEntryFactory::new(db, "1")
        .user_id("42")
        .build()
        .await?;

    let repo = BlacklistRepository::new(db);

    assert!(repo.find(1, 42).await?.is_some());
    assert!(repo.find(2, 42).await?.is_none());

    Ok(())
}
