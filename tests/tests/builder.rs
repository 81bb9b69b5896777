use onyx::{
    config::{Options, Source},
    Config, Db,
};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tests::{fixture_with_resolver, DbTest, FIXTURE_SCHEMA};

const BROKEN: &str = r#"db.from("Role").orderBy("name").list()"#;

#[tokio::test]
async fn malformed_resolver_fails_strict_build() {
    let schema = fixture_with_resolver("User", "sortedRoles", BROKEN);

    let err = DbTest::try_with_builder(Db::builder().schema_json(schema))
        .await
        .err()
        .unwrap();

    assert!(err.is_malformed_resolver(), "{err}");
    assert!(err.to_string().contains("User.sortedRoles"), "{err}");
}

#[tokio::test]
async fn malformed_resolver_is_isolated_when_not_strict() {
    let schema = fixture_with_resolver("User", "sortedRoles", BROKEN);

    let test = DbTest::with_builder(
        Db::builder()
            .schema_json(schema)
            .strict_resolvers(false),
    )
    .await;
    tests::seed::rbac(&test.db).await;

    let user = test.load("User", "u1").await;
    test.log.clear();

    let err = test.db.resolve(&user, "sortedRoles").await.unwrap_err();
    assert!(err.is_malformed_resolver());
    assert!(test.log.is_empty());

    // Reported the same way on every use
    let again = test.db.resolve(&user, "sortedRoles").await.unwrap_err();
    assert_eq!(err.to_string(), again.to_string());

    let roles = test.db.resolve(&user, "roles").await.unwrap();
    assert_eq!(roles.len(), 2);
}

#[tokio::test]
async fn compiled_resolver_is_exposed() {
    let test = DbTest::empty().await;

    let expr = test.db.resolver("Role", "permissions").unwrap();
    assert_eq!(expr.entity(), "Permission");
    assert_eq!(expr.query_count(), 2);

    assert!(test
        .db
        .resolver("Role", "members")
        .unwrap_err()
        .is_unknown_resolver());
    assert!(test
        .db
        .resolver("Widget", "parts")
        .unwrap_err()
        .is_unknown_entity());
}

#[tokio::test]
async fn builder_reads_schema_from_config() {
    let config = Config::load_with_env(
        Options {
            schema_path: Some(FIXTURE_SCHEMA.into()),
            resolve_timeout: Some(Duration::from_secs(5)),
            work_dir: Some(env!("CARGO_MANIFEST_DIR").into()),
            ..Options::default()
        },
        |_| None,
    )
    .unwrap();

    assert_eq!(config.schema_path.source, Source::Explicit);

    let test = DbTest::with_builder(Db::builder().config(config)).await;

    assert_eq!(
        test.db.schema().database_id.as_deref(),
        Some("bbabca0e-82ce-11f0-0000-a2ce78b61b6a")
    );
    assert_eq!(test.db.schema().entities().len(), 7);
}

#[tokio::test]
async fn missing_schema_file() {
    let err = DbTest::try_with_builder(Db::builder().schema_path("does/not/exist.json"))
        .await
        .err()
        .unwrap();

    assert!(err.is_invalid_schema(), "{err}");
}
