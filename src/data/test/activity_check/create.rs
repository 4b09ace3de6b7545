use super::*;

/// Tests creating an activity check and attaching its message.
///
/// Expected: Ok with an open check, then the message ID stored
#[tokio::test]
async fn creates_open_check_and_sets_message() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let deadline = Utc::now() + Duration::hours(24);

    let repo = ActivityCheckRepository::new(db);
    let check = repo
        .create(CreateActivityCheckParam {
            guild_id: 1,
            channel_id: 2,
            started_by: 3,
            deadline,
        })
        .await?;

    assert!(!check.closed);
    assert!(check.message_id.is_none());
    assert_eq!(check.deadline.timestamp(), deadline.timestamp());

    repo.set_message_id(check.id, 99).await?;

    let stored = repo.get_by_id(check.id).await?.unwrap();
    assert_eq!(stored.message_id, Some(99));

    Ok(())
}
