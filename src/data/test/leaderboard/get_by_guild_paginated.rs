use super::*;

/// Tests leaderboard ordering.
///
/// Verifies entries are sorted by points descending, with ties going to whoever
/// reached the score first.
///
/// Expected: Ok with entries in standing order
#[tokio::test]
async fn orders_by_points_then_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(LeaderboardEntry)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    for (user_id, points, age) in [("1", 20, 1), ("2", 50, 1), ("3", 20, 5)] {
        factory::leaderboard_entry::LeaderboardEntryFactory::new(db, "1")
            .user_id(user_id)
            .points(points)
            .updated_at(now - Duration::hours(age))
            .build()
            .await?;
    }

    let repo = LeaderboardRepository::new(db);
    let (entries, total) = repo.get_by_guild_paginated(1, 0, 10).await?;

    assert_eq!(total, 3);
    assert_eq!(
        entries.iter().map(|e| e.user_id).collect::<Vec<_>>(),
        vec![2, 3, 1]
    );
    assert_eq!(repo.count_by_guild(1).await?, 3);

    Ok(())
}
