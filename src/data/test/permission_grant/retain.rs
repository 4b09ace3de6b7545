use super::*;

fn keep_all_but(permissions: &[Permission]) -> FieldValue {
    let assignment = Permission::assignment();
    assignment.revoke(assignment.full(), permissions)
}

/// Tests masking a grant that keeps some of its bits.
///
/// Expected: Ok(Some) with only the kept bits
#[tokio::test]
async fn keeps_remaining_bits() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_grant(
        db,
        "1",
        "10",
        bits(&[Permission::ManageRanks, Permission::UseProxy]).bits(),
    )
    .await?;

    let repo = PermissionGrantRepository::new(db);
    let grant = repo
        .retain(1, Subject::role(10), keep_all_but(&[Permission::UseProxy]))
        .await?
        .unwrap();

    assert_eq!(grant.listed(), vec![Permission::ManageRanks]);

    Ok(())
}

/// Tests masking away the last bits of a grant.
///
/// Expected: Ok(None) and the row is deleted
#[tokio::test]
async fn deletes_emptied_grant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_grant(db, "1", "20", bits(&[Permission::UseProxy]).bits()).await?;
    factory::create_user_grant(db, "1", "21", bits(&[Permission::UseProxy]).bits()).await?;

    let repo = PermissionGrantRepository::new(db);
    let result = repo
        .retain(1, Subject::user(20), keep_all_but(&[Permission::UseProxy]))
        .await?;

    assert!(result.is_none());
    assert!(repo.find(1, Subject::user(20)).await?.is_none());
    assert!(repo.find(1, Subject::user(21)).await?.is_some());

    Ok(())
}

/// Tests masking a subject without a grant.
///
/// Expected: Ok(None) without inserting a row
#[tokio::test]
async fn ignores_missing_grant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(PermissionGrant)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PermissionGrantRepository::new(db);
    let result = repo
        .retain(1, Subject::role(10), keep_all_but(&[Permission::UseProxy]))
        .await?;

    assert!(result.is_none());
    assert_eq!(PermissionGrant::find().count(db).await?, 0);

    Ok(())
}
