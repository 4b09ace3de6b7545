use super::*;

/// Tests adding points for a member without a row.
///
/// Expected: Ok with a new entry that started from zero
#[tokio::test]
async fn creates_entry_for_new_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardRepository::new(db);
    let (previous, entry) = repo.apply_change(1, 42, PointsChange::Add(15)).await?;

    assert_eq!(previous, 0);
    assert_eq!(entry.user_id, 42);
    assert_eq!(entry.points, 15);
    assert_eq!(repo.find(1, 42).await?.unwrap().points, 15);

    Ok(())
}

/// Tests changing an existing member's total.
///
/// Verifies the row is updated in place and its timestamp moves forward.
///
/// Expected: Ok with the old total reported and one row holding the new total
#[tokio::test]
async fn updates_existing_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let earlier = Utc::now() - Duration::days(1);
    factory::leaderboard_entry::LeaderboardEntryFactory::new(db, "1")
        .user_id("42")
        .points(10)
        .updated_at(earlier)
        .build()
        .await?;

    let repo = LeaderboardRepository::new(db);
    let (previous, entry) = repo.apply_change(1, 42, PointsChange::Set(3)).await?;

    assert_eq!(previous, 10);
    assert_eq!(entry.points, 3);
    assert!(entry.updated_at > earlier);
    assert_eq!(LeaderboardEntry::find().count(db).await?, 1);

    Ok(())
}

/// Tests removing more points than a member holds.
///
/// Expected: Ok with the total floored at zero
#[tokio::test]
async fn removal_floors_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::leaderboard_entry::LeaderboardEntryFactory::new(db, "1")
        .user_id("42")
        .points(10)
        .build()
        .await?;

    let repo = LeaderboardRepository::new(db);
    let (previous, entry) = repo
        .apply_change(1, 42, PointsChange::Remove(25))
        .await?;

    assert_eq!(previous, 10);
    assert_eq!(entry.points, 0);

    let (_, fresh) = repo.apply_change(1, 43, PointsChange::Remove(5)).await?;
    assert_eq!(fresh.points, 0);

    Ok(())
}

/// Tests several additions for one member issued at once.
///
/// Expected: the stored total is the sum of every addition
#[tokio::test]
async fn concurrent_additions_accumulate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardRepository::new(db);
    let (first, second, third) = tokio::join!(
        repo.apply_change(1, 42, PointsChange::Add(5)),
        repo.apply_change(1, 42, PointsChange::Add(7)),
        repo.apply_change(1, 42, PointsChange::Add(3)),
    );
    first?;
    second?;
    third?;

    assert_eq!(repo.find(1, 42).await?.unwrap().points, 15);
    assert_eq!(LeaderboardEntry::find().count(db).await?, 1);

    Ok(())
}
