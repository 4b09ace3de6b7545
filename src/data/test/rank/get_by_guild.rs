use super::*;

/// Tests listing ranks lowest threshold first.
///
/// Expected: Ok with the guild's ranks in ascending threshold order
#[tokio::test]
async fn lists_ranks_by_threshold() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_leaderboard_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for min_points in [100, 0, 50] {
        factory::create_rank(db, "1", min_points).await?;
    }
    factory::create_rank(db, "2", 25).await?;

    let repo = RankRepository::new(db);
    let ranks = repo.get_by_guild(1).await?;

    assert_eq!(
        ranks.iter().map(|r| r.min_points).collect::<Vec<_>>(),
        vec![0, 50, 100]
    );

    Ok(())
}
