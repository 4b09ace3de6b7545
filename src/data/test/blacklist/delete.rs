use super::*;

/// Tests removing a listed user.
///
/// Expected: Ok(true), then Ok(false) on a second attempt
#[tokio::test]
async fn deletes_listed_user_once() -> Result<(), DbErr> {
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
    factory::blacklist_entry::BlacklistEntryFactory::new(db, "2")
        .user_id("42")
        .build()
        .await?;

    let repo = BlacklistRepository::new(db);

    assert!(repo.delete(1, 42).await?);
    assert!(!repo.delete(1, 42).await?);
    assert_eq!(BlacklistEntry::find().count(db).await?, 1);

    Ok(())
}
