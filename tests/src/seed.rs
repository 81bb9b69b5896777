//! Fixture rows shared by the scenario tests.
//!
//! * Roles `r1` (admin) and `r2` (viewer), plus `r3` with no permissions.
//! * Permissions `p1`, `p2`, `p3`; `r1` holds `p1` and `p2`, `r2` holds `p2`.
//! * User `u1` holds `r1` and `r2`, user `u2` holds nothing and has no
//!   profile.
//! * Row `rp-dangling` references a role that does not exist.

use onyx::{Db, Row};
use serde_json::json;

pub async fn rbac(db: &Db) {
    let rows = [
        ("Role", json!({"id": "r1", "name": "admin", "isSystem": true})),
        ("Role", json!({"id": "r2", "name": "viewer", "isSystem": false})),
        ("Role", json!({"id": "r3", "name": "empty"})),
        ("Permission", json!({"id": "p1", "name": "users.read"})),
        ("Permission", json!({"id": "p2", "name": "users.write"})),
        ("Permission", json!({"id": "p3", "name": "billing.read"})),
        ("RolePermission", json!({"id": "rp1", "roleId": "r1", "permissionId": "p1"})),
        ("RolePermission", json!({"id": "rp2", "roleId": "r1", "permissionId": "p2"})),
        ("RolePermission", json!({"id": "rp3", "roleId": "r2", "permissionId": "p2"})),
        ("RolePermission", json!({"id": "rp-dangling", "roleId": "r9", "permissionId": "p3"})),
        (
            "User",
            json!({
                "id": "u1",
                "username": "ada",
                "email": "ada@example.com",
                "isActive": true,
                "createdAt": "2024-05-01T12:00:00Z"
            }),
        ),
        ("User", json!({"id": "u2", "username": "grace", "isActive": false})),
        ("UserRole", json!({"id": "ur1", "userId": "u1", "roleId": "r1"})),
        ("UserRole", json!({"id": "ur2", "userId": "u1", "roleId": "r2"})),
        (
            "UserProfile",
            json!({"id": "up1", "userId": "u1", "firstName": "Ada", "age": 36}),
        ),
    ];

    for (entity, row) in rows {
        db.save(entity, row_of(row)).await.unwrap();
    }
}

/// Builds a [`Row`] from a JSON object literal.
pub fn row_of(json: serde_json::Value) -> Row {
    Row::try_from(json).unwrap()
}
