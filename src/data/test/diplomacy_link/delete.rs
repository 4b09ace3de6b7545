use super::*;

/// Tests removing a link leaves the partner's reverse link alone.
///
/// Expected: Ok(true) and the reverse row remains
#[tokio::test]
async fn deletes_only_own_direction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(DiplomacyLink)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_diplomacy_link(db, "1", "2").await?;
    factory::create_diplomacy_link(db, "2", "1").await?;

    let repo = DiplomacyLinkRepository::new(db);

    assert!(repo.delete(1, 2).await?);
    assert!(!repo.delete(1, 2).await?);
    assert!(repo.find(2, 1).await?.is_some());
    assert_eq!(repo.count_by_guild(1).await?, 0);

    Ok(())
}
