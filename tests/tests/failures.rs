use onyx::{
    schema::{Entity, Identifier},
    stmt::Type,
    CancelToken, Db, Record, ResolveOptions,
};
use serde_json::json;
use std::time::Duration;
use tests::{ids, seed::row_of, DbTest};

#[tokio::test]
async fn store_failure_is_wrapped_and_not_memoized() {
    let test = DbTest::new().await;
    let role = test.load("Role", "r1").await;

    test.faults.fail_queries_on("RolePermission");

    let err = test.db.resolve(&role, "permissions").await.unwrap_err();

    assert!(err.is_resolver_execution_failed(), "{err}");
    assert!(err.root().is_driver_operation_failed());
    assert!(err
        .to_string()
        .starts_with("failed to resolve `Role.permissions` for id `r1`"));
    assert!(err.to_string().ends_with("connection reset"));
    assert!(role.resolved("permissions").is_none());

    test.faults.clear();
    test.log.clear();

    let permissions = test.db.resolve(&role, "permissions").await.unwrap();
    assert_eq!(ids(&permissions), ["p1", "p2"]);
    assert_eq!(test.log.len(), 2);
}

#[tokio::test]
async fn failure_in_outer_query_after_projection() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;
    test.log.clear();

    test.faults.fail_queries_on("Role");

    let err = test.db.resolve(&user, "roles").await.unwrap_err();
    assert!(err.is_resolver_execution_failed());
    assert!(user.resolved("roles").is_none());

    // The projection ran before the failing query
    assert_eq!(test.log.queried_entities(), ["UserRole", "Role"]);
    let (_, response) = test.log.pop().unwrap();
    assert!(response.is_ok());
    let (_, response) = test.log.pop().unwrap();
    assert!(response.is_err());
}

#[tokio::test]
async fn unknown_resolver() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;
    test.log.clear();

    let err = test.db.resolve(&user, "friends").await.unwrap_err();

    assert!(err.is_unknown_resolver());
    assert_eq!(err.to_string(), "unknown resolver `User.friends`");
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn unbound_attribute_on_a_drifted_record() {
    let test = DbTest::new().await;

    // The record was shaped by an older version of the entity, before
    // `permissionId` existed.
    let old = Entity::new("RolePermission", Identifier::new("id", Type::String));
    let link = Record::materialize(&old, row_of(json!({ "id": "rp1" }))).unwrap();

    let err = test.db.resolve(&link, "permission").await.unwrap_err();

    assert!(err.is_unbound_attribute(), "{err}");
    assert_eq!(
        err.to_string(),
        "attribute `permissionId` is not bound on `RolePermission` record"
    );
    assert_eq!(test.log.queries_on("Permission"), 0);
}

#[tokio::test]
async fn cancelled_before_the_first_query() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;
    test.log.clear();

    let token = CancelToken::new();
    token.cancel();

    let options = ResolveOptions::new().cancel_token(token);
    let err = test
        .db
        .resolve_with(&user, "roles", &options)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(test.log.is_empty());
    assert!(user.resolved("roles").is_none());

    // Cancellation is per call
    let roles = test.db.resolve(&user, "roles").await.unwrap();
    assert_eq!(roles.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_between_queries() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;
    test.log.clear();

    test.faults.set_latency(Duration::from_millis(50));

    let token = CancelToken::new();
    let options = ResolveOptions::new().cancel_token(token.clone());

    // Trips while the `UserRole` lookup is in flight
    let (result, ()) = tokio::join!(test.db.resolve_with(&user, "roles", &options), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    });

    let err = result.unwrap_err();
    assert!(err.is_cancelled(), "{err}");
    assert_eq!(test.log.queried_entities(), ["UserRole"]);
    assert!(user.resolved("roles").is_none());
}

#[tokio::test(start_paused = true)]
async fn deadline_exceeded_during_a_slow_query() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;

    test.faults.set_latency(Duration::from_millis(50));

    let options = ResolveOptions::new().timeout(Duration::from_millis(10));
    let err = test
        .db
        .resolve_with(&user, "roles", &options)
        .await
        .unwrap_err();

    assert!(err.is_deadline_exceeded(), "{err}");
    assert!(user.resolved("roles").is_none());
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_applies_by_default() {
    let test = DbTest::with_builder(
        Db::builder()
            .schema_path(tests::FIXTURE_SCHEMA)
            .resolve_timeout(Duration::from_millis(10)),
    )
    .await;
    tests::seed::rbac(&test.db).await;

    let user = test.load("User", "u1").await;
    test.faults.set_latency(Duration::from_millis(50));

    let err = test.db.resolve(&user, "roles").await.unwrap_err();
    assert!(err.is_deadline_exceeded(), "{err}");

    // An explicit deadline outranks the configured one
    let options = ResolveOptions::new().timeout(Duration::from_secs(1));
    let roles = test.db.resolve_with(&user, "roles", &options).await.unwrap();
    assert_eq!(roles.len(), 2);
}
