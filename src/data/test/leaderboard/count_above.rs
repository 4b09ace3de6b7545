use super::*;

/// Tests counting members with strictly more points.
///
/// Expected: Ok with ties and other guilds excluded
#[tokio::test]
async fn counts_strictly_higher_scores() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for points in [50, 30, 30, 10] {
        factory::create_leaderboard_entry(db, "1", points).await?;
    }
    factory::create_leaderboard_entry(db, "2", 100).await?;

    let repo = LeaderboardRepository::new(db);

    assert_eq!(repo.count_above(1, 30).await?, 1);
    assert_eq!(repo.count_above(1, 10).await?, 3);
    assert_eq!(repo.count_above(1, 50).await?, 0);

    Ok(())
}
