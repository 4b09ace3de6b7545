use super::*;

/// Tests creating a rank with a linked role.
///
/// Expected: Ok with the rank findable by its threshold
#[tokio::test]
async fn creates_rank_with_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_leaderboard_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RankRepository::new(db);
    let rank = repo
        .create(CreateRankParam {
            guild_id: 1,
            name: "Veteran".to_string(),
            role_id: Some(500),
            min_points: 100,
        })
        .await?;

    assert_eq!(rank.name, "Veteran");
    assert_eq!(rank.role_id, Some(500));

    let found = repo.find_by_min_points(1, 100).await?.unwrap();
    assert_eq!(found.id, rank.id);
    assert!(repo.find_by_min_points(2, 100).await?.is_none());

    Ok(())
}
