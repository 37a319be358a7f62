use diesel::connection::SimpleConnection;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn foreign_keys_are_enforced_on_every_connection() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("connection");

    let result = conn.batch_execute(
        "INSERT INTO keyboards (name, manufacturer_id, description, price, stock) \
         VALUES ('Orphan', 999, 'd', 1.0, 1);",
    );
    assert!(result.is_err());
}
