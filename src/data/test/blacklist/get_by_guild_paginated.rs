use super::*;

/// Tests paging through a guild's blacklist oldest first.
///
/// Expected: Ok with entries in insertion-time order and the guild total
#[tokio::test]
async fn pages_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(BlacklistEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    for (user_id, age) in [("3", 1), ("1", 3), ("2", 2)] {
        factory::blacklist_entry::BlacklistEntryFactory::new(db, "1")
            .user_id(user_id)
            .created_at(now - Duration::hours(age))
            .build()
            .await?;
    }
    factory::create_blacklist_entry(db, "2").await?;

    let repo = BlacklistRepository::new(db);
    let (page, total) = repo.get_by_guild_paginated(1, 0, 2).await?;
    let (last, _) = repo.get_by_guild_paginated(1, 1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        page.iter().map(|e| e.user_id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(last.iter().map(|e| e.user_id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(repo.count_by_guild(2).await?, 1);

    Ok(())
}

/// Tests requesting a page past the end.
///
/// Expected: Ok with no entries and the real total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(BlacklistEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blacklist_entry(db, "1").await?;

    let repo = BlacklistRepository::new(db);
    let (page, total) = repo.get_by_guild_paginated(1, 5, 10).await?;

    assert!(page.is_empty());
    assert_eq!(total, 1);

    Ok(())
}
