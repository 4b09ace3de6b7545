use super::*;

/// Tests deleting a rank of the guild.
///
/// Expected: Ok(Some) with the deleted rank
#[tokio::test]
async fn deletes_rank_of_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_leaderboard_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let rank = factory::create_rank(db, "1", 10).await?;

    let repo = RankRepository::new(db);
    let deleted = repo.delete(1, rank.id).await?.unwrap();

    assert_eq!(deleted.id, rank.id);
    assert!(repo.get_by_guild(1).await?.is_empty());

    Ok(())
}

/// Tests deleting another guild's rank by ID.
///
/// Expected: Ok(None) and the rank remains
#[tokio::test]
async fn ignores_rank_of_other_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_leaderboard_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let rank = factory::create_rank(db, "2", 10).await?;

    let repo = RankRepository::new(db);

    assert!(repo.delete(1, rank.id).await?.is_none());
    assert_eq!(repo.get_by_guild(2).await?.len(), 1);

    Ok(())
}
