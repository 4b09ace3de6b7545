use super::*;

/// Tests recording responses.
///
/// Verifies a user's second response is rejected and responses come back in order.
///
/// Expected: Ok(true) for new responders, Ok(false) for repeats
#[tokio::test]
async fn records_each_user_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let check = factory::create_activity_check(db, "1").await?;
    let now = Utc::now();

    let repo = ActivityCheckRepository::new(db);

    assert!(repo.add_response(check.id, 10, now).await?);
    assert!(repo.add_response(check.id, 11, now + Duration::seconds(1)).await?);
    assert!(!repo.add_response(check.id, 10, now + Duration::seconds(2)).await?);

    let responses = repo.get_responses(check.id).await?;
    assert_eq!(
        responses.iter().map(|r| r.user_id).collect::<Vec<_>>(),
        vec![10, 11]
    );

    Ok(())
}

/// Tests that the same user can respond to different checks.
///
/// Expected: Ok(true) for both
#[tokio::test]
async fn responses_are_per_check() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_activity_check(db, "1").await?;
    let second = factory::create_activity_check(db, "1").await?;
    factory::create_activity_response(db, first.id, "10").await?;

    let repo = ActivityCheckRepository::new(db);

    assert!(repo.add_response(second.id, 10, Utc::now()).await?);
    assert_eq!(repo.get_responses(first.id).await?.len(), 1);

    Ok(())
}
