use super::*;

/// Tests collecting grants for a member from their user grant and their roles.
///
/// Verifies that grants for roles the member does not hold, and grants in other
/// guilds, are excluded.
///
/// Expected: Ok with exactly the member's applicable grants
#[tokio::test]
async fn collects_user_and_role_grants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_grant(db, "1", "100", 1).await?;
    factory::create_role_grant(db, "1", "10", 2).await?;
    factory::create_role_grant(db, "1", "11", 4).await?;
    factory::create_role_grant(db, "1", "12", 8).await?;
    factory::create_user_grant(db, "2", "100", 16).await?;

    let repo = PermissionGrantRepository::new(db);
    let grants = repo.get_for_member(1, 100, &[10, 11]).await?;

    let mut values: Vec<i64> = grants.iter().map(|g| g.permissions.bits()).collect();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 4]);

    Ok(())
}

/// Tests a member without roles.
///
/// Expected: Ok with only the user's own grant
#[tokio::test]
async fn handles_member_without_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_grant(db, "1", "100", 1).await?;
    factory::create_role_grant(db, "1", "100", 2).await?;

    let repo = PermissionGrantRepository::new(db);
    let grants = repo.get_for_member(1, 100, &[]).await?;

    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].subject, Subject::user(100));

    Ok(())
}
