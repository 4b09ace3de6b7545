use super::*;

/// Tests removing an existing grant.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_existing_grant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_grant(db, "1", "10", 3).await?;

    let repo = PermissionGrantRepository::new(db);
    let deleted = repo.delete(1, Subject::role(10)).await?;

    assert!(deleted);
    assert!(repo.find(1, Subject::role(10)).await?.is_none());

    Ok(())
}

/// Tests removing a grant that does not exist, including one held in another guild.
///
/// Expected: Ok(false) and other guild's row untouched
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_grant(db, "2", "10", 3).await?;

    let repo = PermissionGrantRepository::new(db);
    let deleted = repo.delete(1, Subject::role(10)).await?;

    assert!(!deleted);
    assert_eq!(PermissionGrant::find().count(db).await?, 1);

    Ok(())
}
