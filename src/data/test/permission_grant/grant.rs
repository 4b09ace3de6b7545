use super::*;

/// Tests granting permissions to a role without an existing grant.
///
/// Expected: Ok with a new row
#[tokio::test]
async fn creates_grant_for_new_subject() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PermissionGrantRepository::new(db);
    let grant = repo
        .grant(1, Subject::role(10), bits(&[Permission::ManageRanks]))
        .await?;

    assert_eq!(grant.guild_id, 1);
    assert_eq!(grant.subject.kind, SubjectKind::Role);
    assert_eq!(grant.listed(), vec![Permission::ManageRanks]);

    Ok(())
}

/// Tests granting permissions to a subject that already has a grant.
///
/// Verifies the existing row is merged in place instead of duplicated.
///
/// Expected: Ok with a single row holding the old and new bits
#[tokio::test]
async fn merges_into_existing_grant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing =
        factory::create_user_grant(db, "1", "20", bits(&[Permission::ManageRanks]).bits())
            .await?;

    let repo = PermissionGrantRepository::new(db);
    let grant = repo
        .grant(
            1,
            Subject::user(20),
            bits(&[Permission::ManageBlacklist, Permission::UseProxy]),
        )
        .await?;

    assert_eq!(grant.id, existing.id);
    assert_eq!(
        grant.listed(),
        vec![
            Permission::ManageBlacklist,
            Permission::ManageRanks,
            Permission::UseProxy
        ]
    );
    assert_eq!(PermissionGrant::find().count(db).await?, 1);

    Ok(())
}

/// Tests two grants for the same new subject issued at once.
///
/// Expected: one row holding the bits of both grants
#[tokio::test]
async fn concurrent_grants_merge() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PermissionGrantRepository::new(db);
    let subject = Subject::role(30);
    let (first, second) = tokio::join!(
        repo.grant(1, subject, bits(&[Permission::ManageRanks])),
        repo.grant(1, subject, bits(&[Permission::UseProxy])),
    );
    first?;
    second?;

    let stored = repo.find(1, subject).await?.unwrap();
    assert_eq!(
        stored.listed(),
        vec![Permission::ManageRanks, Permission::UseProxy]
    );
    assert_eq!(PermissionGrant::find().count(db).await?, 1);

    Ok(())
}

/// Tests that a role and a user sharing an ID keep separate grants.
///
/// Expected: Ok with two rows
#[tokio::test]
async fn separates_roles_and_users_with_same_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PermissionGrantRepository::new(db);
    repo.grant(1, Subject::role(5), bits(&[Permission::ManageRanks]))
        .await?;
    repo.grant(1, Subject::user(5), bits(&[Permission::UseProxy]))
        .await?;

    let role = repo.find(1, Subject::role(5)).await?.unwrap();
    let user = repo.find(1, Subject::user(5)).await?.unwrap();

    assert_eq!(role.listed(), vec![Permission::ManageRanks]);
    assert_eq!(user.listed(), vec![Permission::UseProxy]);

    Ok(())
}
