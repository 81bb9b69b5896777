use tests::{ids, DbTest};

#[tokio::test]
async fn second_resolve_issues_no_queries() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r1").await;
    test.log.clear();

    let first = test.db.resolve(&role, "permissions").await.unwrap();
    assert_eq!(test.log.len(), 2);

    test.log.clear();
    let second = test.db.resolve(&role, "permissions").await.unwrap();

    assert!(test.log.is_empty());
    assert!(first.ptr_eq(&second));
}

#[tokio::test]
async fn memo_is_visible_on_the_record() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;

    assert!(user.resolved("roles").is_none());

    let roles = test.db.resolve(&user, "roles").await.unwrap();
    let memo = user.resolved("roles").unwrap();

    assert!(roles.ptr_eq(&memo));
    assert!(user.resolved("profile").is_none());
}

#[tokio::test]
async fn null_results_are_memoized() {
    let test = DbTest::new().await;
    let user = test.load("User", "u2").await;
    test.log.clear();

    assert!(test.db.resolve(&user, "profile").await.unwrap().is_null());
    assert_eq!(test.log.len(), 1);

    assert!(test.db.resolve(&user, "profile").await.unwrap().is_null());
    assert_eq!(test.log.len(), 1);
}

#[tokio::test]
async fn memo_survives_store_changes() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r2").await;

    let before = test.db.resolve(&role, "permissions").await.unwrap();
    assert_eq!(ids(&before), ["p2"]);

    test.db.delete("RolePermission", "rp3").await.unwrap();

    let after = test.db.resolve(&role, "permissions").await.unwrap();
    assert_eq!(ids(&after), ["p2"]);

    // A freshly loaded record sees the change
    let reloaded = test.load("Role", "r2").await;
    let fresh = test.db.resolve(&reloaded, "permissions").await.unwrap();
    assert!(fresh.is_empty());
}

#[tokio::test]
async fn concurrent_resolves_agree() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;

    let (a, b) = tokio::join!(
        test.db.resolve(&user, "roles"),
        test.db.resolve(&user, "roles"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // Whichever finished first is memoized and returned to both
    assert!(a.ptr_eq(&b));
    assert!(a.ptr_eq(&user.resolved("roles").unwrap()));
}

#[tokio::test]
async fn nested_resolution_memoizes_inner_records() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r1").await;

    let links = test.db.resolve(&role, "rolePermissions").await.unwrap();
    let link = &links.records()[0];

    let permission = test.db.resolve(link, "permission").await.unwrap();
    assert_eq!(ids(&permission), ["p1"]);

    test.log.clear();
    let again = test.db.resolve(&role, "rolePermissions").await.unwrap();
    let permission_again = test.db.resolve(&again.records()[0], "permission").await.unwrap();

    assert!(test.log.is_empty());
    assert!(permission.ptr_eq(&permission_again));
}
