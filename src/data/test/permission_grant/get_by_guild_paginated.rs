use super::*;

/// Tests listing grants with roles before users.
///
/// Expected: Ok with roles first and the total across pages
#[tokio::test]
async fn lists_roles_before_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_grant(db, "1", "100", 1).await?;
    factory::create_role_grant(db, "1", "10", 1).await?;
    factory::create_role_grant(db, "1", "11", 1).await?;
    factory::create_role_grant(db, "2", "12", 1).await?;

    let repo = PermissionGrantRepository::new(db);
    let (first, total) = repo.get_by_guild_paginated(1, 0, 2).await?;
    let (second, _) = repo.get_by_guild_paginated(1, 1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|g| g.subject.kind == SubjectKind::Role));
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].subject, Subject::user(100));
    assert_eq!(repo.count_by_guild(1).await?, 3);

    Ok(())
}
