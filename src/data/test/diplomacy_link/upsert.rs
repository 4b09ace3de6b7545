use super::*;

/// Tests registering a partner channel twice.
///
/// Verifies the second registration moves the link to the new channel instead of
/// adding a second row.
///
/// Expected: Ok with one row pointing at the latest channel
#[tokio::test]
async fn replaces_channel_for_same_partner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(DiplomacyLink)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiplomacyLinkRepository::new(db);
    let first = repo
        .upsert(CreateDiplomacyLinkParam {
            guild_id: 1,
            partner_guild_id: 2,
            channel_id: 10,
        })
        .await?;
    let second = repo
        .upsert(CreateDiplomacyLinkParam {
            guild_id: 1,
            partner_guild_id: 2,
            channel_id: 11,
        })
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.channel_id, 11);
    assert_eq!(DiplomacyLink::find().count(db).await?, 1);
    assert_eq!(repo.find(1, 2).await?.unwrap().channel_id, 11);

    Ok(())
}
