use onyx::{Field, Record, Value};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{seed::row_of, DbTest};

#[tokio::test]
async fn attributes_are_coerced_and_nullable_absent_is_null() {
    let test = DbTest::new().await;
    let user = test.load("User", "u1").await;

    assert_eq!(user.entity(), "User");
    assert_eq!(user.id(), &Value::from("u1"));
    assert_eq!(user.get("isActive"), Some(&Value::Bool(true)));
    assert!(user.get("createdAt").unwrap().as_timestamp().is_some());
    assert!(user.get("lastLoginAt").unwrap().is_null());
    assert!(user.get("nope").is_none());

    let names: Vec<_> = user.attributes().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        [
            "createdAt",
            "deletedAt",
            "email",
            "id",
            "isActive",
            "lastLoginAt",
            "updatedAt",
            "username"
        ]
    );
}

#[tokio::test]
async fn undeclared_keys_are_kept_as_extras() {
    let test = DbTest::empty().await;

    let saved = test
        .db
        .save(
            "User",
            row_of(json!({
                "id": "u7",
                "username": "linus",
                "nickname": "torvalds",
                "prefs": { "theme": "dark" }
            })),
        )
        .await
        .unwrap();

    assert_eq!(saved.extra("nickname"), Some(&json!("torvalds")));
    assert_eq!(saved.extra("prefs"), Some(&json!({ "theme": "dark" })));
    assert_eq!(saved.extras().len(), 2);

    let loaded = test.load("User", "u7").await;
    assert_eq!(loaded.extras(), saved.extras());

    let row = loaded.to_row();
    assert_eq!(row.get("nickname"), Some(&json!("torvalds")));
    assert_eq!(row.get("username"), Some(&json!("linus")));
}

#[tokio::test]
async fn bad_timestamp_fails_with_the_offending_value() {
    let test = DbTest::empty().await;
    let entity = test.db.schema().expect_entity("User").unwrap();

    let err = Record::materialize(
        entity,
        row_of(json!({ "id": "u1", "createdAt": "yesterday" })),
    )
    .unwrap_err();

    assert!(err.is_type_coercion());
    assert_eq!(
        err.to_string(),
        "cannot coerce attribute `createdAt` to Timestamp (got \"yesterday\")"
    );
}

#[tokio::test]
async fn save_rejects_rows_that_do_not_coerce() {
    let test = DbTest::empty().await;

    let err = test
        .db
        .save(
            "UserProfile",
            row_of(json!({ "id": "up9", "age": "thirty" })),
        )
        .await
        .unwrap_err();

    assert!(err.is_type_coercion(), "{err}");
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn lenient_scalar_forms() {
    let test = DbTest::empty().await;
    let entity = test.db.schema().expect_entity("UserProfile").unwrap();

    let profile = Record::materialize(
        entity,
        row_of(json!({ "id": "up1", "age": "41", "createdAt": 1714564800000_i64 })),
    )
    .unwrap();

    assert_eq!(profile.get("age").unwrap().as_i64(), Some(41));
    assert_eq!(
        profile
            .get("createdAt")
            .unwrap()
            .as_timestamp()
            .unwrap()
            .to_rfc3339(),
        "2024-05-01T12:00:00+00:00"
    );
}

#[tokio::test]
async fn get_field_reads_attribute_then_extra_then_resolver() {
    let test = DbTest::new().await;
    test.db
        .save(
            "User",
            row_of(json!({ "id": "u3", "username": "ken", "team": "unix" })),
        )
        .await
        .unwrap();
    test.db
        .save(
            "UserRole",
            row_of(json!({ "id": "ur3", "userId": "u3", "roleId": "r2" })),
        )
        .await
        .unwrap();

    let user = test.load("User", "u3").await;
    test.log.clear();

    match user.get_field(&test.db, "username").await.unwrap() {
        Field::Attribute(value) => assert_eq!(value.as_str(), Some("ken")),
        field => panic!("expected an attribute, got {field:?}"),
    }

    match user.get_field(&test.db, "team").await.unwrap() {
        Field::Extra(value) => assert_eq!(value, &json!("unix")),
        field => panic!("expected an extra, got {field:?}"),
    }
    assert!(test.log.is_empty());

    match user.get_field(&test.db, "roles").await.unwrap() {
        Field::Resolved(roles) => assert_eq!(roles.len(), 1),
        field => panic!("expected a resolved value, got {field:?}"),
    }
    assert_eq!(test.log.len(), 2);

    let err = user.get_field(&test.db, "friends").await.unwrap_err();
    assert!(err.is_unknown_resolver());
    assert_eq!(err.to_string(), "unknown resolver `User.friends`");
}
