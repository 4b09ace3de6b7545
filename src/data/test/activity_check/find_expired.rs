use super::*;

/// Tests finding open checks past their deadline.
///
/// Verifies that closed checks and checks still running are excluded.
///
/// Expected: Ok with only the expired open check
#[tokio::test]
async fn finds_only_expired_open_checks() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = factory::activity_check::ActivityCheckFactory::new(db, "1")
        .deadline(now - Duration::minutes(5))
        .build()
        .await?;
    factory::activity_check::ActivityCheckFactory::new(db, "1")
        .deadline(now - Duration::minutes(5))
        .closed(true)
        .build()
        .await?;
    factory::activity_check::ActivityCheckFactory::new(db, "1")
        .deadline(now + Duration::minutes(5))
        .build()
        .await?;

    let repo = ActivityCheckRepository::new(db);
    let found = repo.find_expired(now).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, expired.id);

    Ok(())
}
