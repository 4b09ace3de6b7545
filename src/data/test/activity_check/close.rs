use super::*;

/// Tests closing an open check.
///
/// Expected: Ok(true) the first time, Ok(false) afterwards
#[tokio::test]
async fn closes_open_check_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let check = factory::create_activity_check(db, "1").await?;

    let repo = ActivityCheckRepository::new(db);

    assert!(repo.close(check.id).await?);
    assert!(!repo.close(check.id).await?);
    assert!(repo.get_by_id(check.id).await?.unwrap().closed);

    Ok(())
}

/// Tests closing a check that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_check() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActivityCheckRepository::new(db);

    assert!(!repo.close(404).await?);

    Ok(())
}
