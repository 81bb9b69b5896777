use onyx::Db;
use pretty_assertions::assert_eq;
use tests::{fixture_with_resolver, ids, DbTest};

#[tokio::test]
async fn role_permissions_through_join_table() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r1").await;
    test.log.clear();

    let permissions = test.db.resolve(&role, "permissions").await.unwrap();

    assert_eq!(ids(&permissions), ["p1", "p2"]);
    assert_eq!(
        test.log.queried_entities(),
        ["RolePermission", "Permission"]
    );
}

#[tokio::test]
async fn user_roles_issue_one_query_per_pipeline() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;
    test.log.clear();

    let roles = test.db.resolve(&user, "roles").await.unwrap();

    assert_eq!(ids(&roles), ["r1", "r2"]);
    assert_eq!(test.log.len(), 2);
    assert_eq!(test.log.queries_on("UserRole"), 1);
    assert_eq!(test.log.queries_on("Role"), 1);
}

#[tokio::test]
async fn has_many_list() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r1").await;

    let links = test.db.resolve(&role, "rolePermissions").await.unwrap();

    assert!(links.as_many().is_some());
    assert_eq!(ids(&links), ["rp1", "rp2"]);
    for link in links.records() {
        assert_eq!(link.get("roleId").unwrap().as_str(), Some("r1"));
    }
}

#[tokio::test]
async fn belongs_to_first_or_null() {
    let test = DbTest::new().await;
    let link = test.load("RolePermission", "rp3").await;

    let role = test.db.resolve(&link, "role").await.unwrap();
    let role = role.as_one().unwrap();

    assert_eq!(role.entity(), "Role");
    assert_eq!(role.get("name").unwrap().as_str(), Some("viewer"));
}

#[tokio::test]
async fn belongs_to_dangling_reference_is_null() {
    let test = DbTest::new().await;
    let link = test.load("RolePermission", "rp-dangling").await;

    let role = test.db.resolve(&link, "role").await.unwrap();

    assert!(role.is_null());
    assert!(role.is_empty());
}

#[tokio::test]
async fn missing_profile_is_null() {
    let test = DbTest::new().await;
    let user = test.load("User", "u2").await;

    let profile = test.db.resolve(&user, "profile").await.unwrap();
    assert!(profile.is_null());

    let user = test.load("User", "u1").await;
    let profile = test.db.resolve(&user, "profile").await.unwrap();
    let profile = profile.as_one().unwrap();
    assert_eq!(profile.get("age").unwrap().as_i64(), Some(36));
}

#[tokio::test]
async fn empty_projection_skips_outer_query() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r3").await;
    test.log.clear();

    let permissions = test.db.resolve(&role, "permissions").await.unwrap();

    assert!(permissions.is_empty());
    assert!(permissions.as_many().is_some());
    assert_eq!(test.log.queried_entities(), ["RolePermission"]);
}

#[tokio::test]
async fn user_without_roles() {
    let test = DbTest::new().await;
    let user = test.load("User", "u2").await;

    let roles = test.db.resolve(&user, "roles").await.unwrap();
    assert!(roles.is_empty());

    let user_roles = test.db.resolve(&user, "userRoles").await.unwrap();
    assert!(user_roles.is_empty());
}

#[tokio::test]
async fn list_terminal_on_single_reference() {
    let test = DbTest::new().await;
    let link = test.load("UserRole", "ur1").await;

    // `UserRole.role` ends in `.list()`, so even a single match is a list
    let role = test.db.resolve(&link, "role").await.unwrap();

    assert_eq!(role.len(), 1);
    assert_eq!(ids(&role), ["r1"]);
}

#[tokio::test]
async fn projection_of_a_resolver_collects_identifiers() {
    let schema = fixture_with_resolver(
        "User",
        "grantedRoles",
        r#"db.from("Role")
            .where(inOp("id", db.from("UserRole").where(eq("userId", this.id)).list().values('role')))
            .list()"#,
    );

    let test = DbTest::with_builder(Db::builder().schema_json(schema)).await;
    tests::seed::rbac(&test.db).await;
    test.log.clear();

    let user = test.load("User", "u1").await;
    let roles = test.db.resolve(&user, "grantedRoles").await.unwrap();

    assert_eq!(ids(&roles), ["r1", "r2"]);
    // UserRole, one `role` lookup per link, then Role
    assert_eq!(test.log.queries_on("UserRole"), 1);
    assert_eq!(test.log.queries_on("Role"), 3);
}

#[tokio::test]
async fn results_are_deterministic_across_records() {
    let test = DbTest::new().await;

    let first = test.load("User", "u1").await;
    let second = test.load("User", "u1").await;

    let a = test.db.resolve(&first, "roles").await.unwrap();
    let b = test.db.resolve(&second, "roles").await.unwrap();

    assert_eq!(a.ids(), b.ids());
    // Memoization is per record instance
    assert!(!a.ptr_eq(&b));
}
