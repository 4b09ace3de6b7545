use super::*;

/// Tests looking links up by their local channel.
///
/// Expected: Ok with every link using the channel
#[tokio::test]
async fn finds_links_using_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(DiplomacyLink)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::diplomacy_link::DiplomacyLinkFactory::new(db, "1", "2")
        .channel_id("10")
        .build()
        .await?;
    factory::diplomacy_link::DiplomacyLinkFactory::new(db, "1", "3")
        .channel_id("10")
        .build()
        .await?;
    factory::create_diplomacy_link(db, "1", "4").await?;

    let repo = DiplomacyLinkRepository::new(db);
    let links = repo.get_by_channel(10).await?;

    let mut partners: Vec<u64> = links.iter().map(|l| l.partner_guild_id).collect();
    partners.sort_unstable();
    assert_eq!(partners, vec![2, 3]);

    let (page, total) = repo.get_by_guild_paginated(1, 0, 10).await?;
    assert_eq!(page.len(), 3);
    assert_eq!(total, 3);

    Ok(())
}
