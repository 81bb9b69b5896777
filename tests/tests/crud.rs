use onyx::{Db, Filter};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{seed::row_of, DbTest};

fn generated_ids_schema() -> String {
    json!({
        "tables": [
            {
                "name": "Note",
                "identifier": { "name": "id", "type": "String", "generator": "UUID" },
                "attributes": [
                    { "name": "id", "type": "String" },
                    { "name": "body", "type": "String", "isNullable": true }
                ]
            },
            {
                "name": "Ticket",
                "identifier": { "name": "id", "type": "Int", "generator": "Sequence" },
                "attributes": [
                    { "name": "id", "type": "Int" },
                    { "name": "title", "type": "String", "isNullable": true }
                ]
            }
        ]
    })
    .to_string()
}

fn counters_schema() -> String {
    json!({
        "tables": [
            {
                "name": "Counter",
                "identifier": { "name": "id", "type": "Int" },
                "attributes": [{ "name": "id", "type": "Int" }],
                "resolvers": [
                    {
                        "name": "items",
                        "resolver": "db.from(\"Item\").where(eq(\"counterId\", this.id)).list()"
                    }
                ]
            },
            {
                "name": "Item",
                "identifier": { "name": "id", "type": "String" },
                "attributes": [
                    { "name": "id", "type": "String" },
                    { "name": "counterId", "type": "Int", "isNullable": true },
                    { "name": "dueAt", "type": "Timestamp", "isNullable": true }
                ]
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn save_then_find_by_id() {
    let test = DbTest::empty().await;

    let saved = test
        .db
        .save("Role", row_of(json!({ "id": "r1", "name": "admin" })))
        .await
        .unwrap();
    assert_eq!(saved.get("name").unwrap().as_str(), Some("admin"));

    let found = test.db.find_by_id("Role", "r1").await.unwrap().unwrap();
    assert_eq!(found.id(), saved.id());
    assert_eq!(found.to_row(), saved.to_row());

    assert!(test.db.find_by_id("Role", "r9").await.unwrap().is_none());
}

#[tokio::test]
async fn save_replaces_existing_record() {
    let test = DbTest::new().await;

    test.db
        .save("Role", row_of(json!({ "id": "r1", "name": "root" })))
        .await
        .unwrap();

    let role = test.load("Role", "r1").await;
    assert_eq!(role.get("name").unwrap().as_str(), Some("root"));
    assert!(role.get("isSystem").unwrap().is_null());
}

#[tokio::test]
async fn save_requires_an_identifier_without_generator() {
    let test = DbTest::empty().await;

    let err = test
        .db
        .save("Role", row_of(json!({ "name": "admin" })))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "cannot save `Role` without a value for identifier `id`"
    );
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn generated_identifiers() {
    let test = DbTest::with_builder(Db::builder().schema_json(generated_ids_schema())).await;

    let note = test
        .db
        .save("Note", row_of(json!({ "body": "hello" })))
        .await
        .unwrap();
    let id = note.id().as_str().unwrap();
    assert_eq!(id.len(), 36);

    let first = test
        .db
        .save("Ticket", row_of(json!({ "title": "one" })))
        .await
        .unwrap();
    let second = test
        .db
        .save("Ticket", row_of(json!({ "title": "two" })))
        .await
        .unwrap();

    assert_eq!(first.id().as_i64(), Some(1));
    assert_eq!(second.id().as_i64(), Some(2));
}

#[tokio::test]
async fn query_and_first() {
    let test = DbTest::new().await;

    let links = test
        .db
        .query("RolePermission", Filter::eq("roleId", "r1"))
        .await
        .unwrap();
    let ids: Vec<_> = links.iter().map(|l| l.id().as_str().unwrap()).collect();
    assert_eq!(ids, ["rp1", "rp2"]);

    let granted = test
        .db
        .query(
            "RolePermission",
            Filter::in_list("permissionId", vec!["p2".into(), "p3".into()]),
        )
        .await
        .unwrap();
    assert_eq!(granted.len(), 3);

    let active = test
        .db
        .first("User", Filter::eq("isActive", true))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id().as_str(), Some("u1"));

    assert!(test
        .db
        .first("User", Filter::eq("username", "nobody"))
        .await
        .unwrap()
        .is_none());

    assert_eq!(test.db.query("Role", Filter::all()).await.unwrap().len(), 3);

    let op = test.log.pop().unwrap().0;
    assert_eq!(op.as_query().unwrap().limit, None);
}

#[tokio::test]
async fn delete_reports_whether_the_record_existed() {
    let test = DbTest::new().await;

    assert!(test.db.delete("UserRole", "ur1").await.unwrap());
    assert!(!test.db.delete("UserRole", "ur1").await.unwrap());
    assert!(test.db.find_by_id("UserRole", "ur1").await.unwrap().is_none());

    let user = test.load("User", "u1").await;
    let roles = test.db.resolve(&user, "roles").await.unwrap();
    assert_eq!(roles.len(), 1);
}

#[tokio::test]
async fn unknown_entity() {
    let test = DbTest::empty().await;

    let err = test.db.find_by_id("Widget", "w1").await.unwrap_err();
    assert!(err.is_unknown_entity());

    let err = test
        .db
        .query("Widget", Filter::all())
        .await
        .unwrap_err();
    assert!(err.is_unknown_entity());
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn saved_rows_are_stored_in_coerced_form() {
    let test = DbTest::with_builder(Db::builder().schema_json(counters_schema())).await;

    let counter = test
        .db
        .save("Counter", row_of(json!({ "id": "7" })))
        .await
        .unwrap();
    assert_eq!(counter.id().as_i64(), Some(7));

    let found = test.db.find_by_id("Counter", 7_i64).await.unwrap().unwrap();
    assert_eq!(found.id(), counter.id());

    test.db
        .save(
            "Item",
            row_of(json!({ "id": "i1", "counterId": "7", "dueAt": "2024-05-01", "note": 1 })),
        )
        .await
        .unwrap();

    let item = test.load("Item", "i1").await;
    assert_eq!(item.extra("note"), Some(&json!(1)));

    let due = test
        .db
        .query("Item", Filter::eq("dueAt", item.get("dueAt").unwrap().clone()))
        .await
        .unwrap();
    assert_eq!(due.len(), 1);

    let items = test.db.resolve(&found, "items").await.unwrap();
    assert_eq!(items.len(), 1);
}
