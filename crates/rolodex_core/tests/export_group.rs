use rolodex_core::db::open_db_in_memory;
use rolodex_core::{
    export_group, import_table, Contact, ContactRepository, ExportError, FieldMap, FieldValue,
    Group, GroupRepository, SqliteContactRepository, SqliteGroupRepository,
};
use uuid::Uuid;

#[test]
fn export_missing_group_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    let contacts = SqliteContactRepository::try_new(&conn).unwrap();

    let ghost = Uuid::new_v4();
    let err = export_group(&groups, &contacts, ghost).unwrap_err();
    assert!(matches!(err, ExportError::GroupNotFound(id) if id == ghost));
}

#[test]
fn empty_group_exports_empty_rows_and_columns_despite_schema() {
    let conn = open_db_in_memory().unwrap();
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    let contacts = SqliteContactRepository::try_new(&conn).unwrap();

    let group = Group::new("prepared but empty", None);
    groups.create_group(&group).unwrap();
    groups
        .update_group_schema(group.id, &["name".to_string(), "email".to_string()])
        .unwrap();

    let export = export_group(&groups, &contacts, group.id).unwrap();
    assert!(export.rows.is_empty());
    assert!(export.columns.is_empty());
}

#[test]
fn export_returns_rows_verbatim_and_stored_columns() {
    let conn = open_db_in_memory().unwrap();
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    let contacts = SqliteContactRepository::try_new(&conn).unwrap();

    let group = Group::new("roster", None);
    groups.create_group(&group).unwrap();

    let payload = b"name,email\nAda,ada@example.com\nGrace,grace@example.com\n";
    import_table(&groups, &contacts, group.id, "roster.csv", payload).unwrap();

    let export = export_group(&groups, &contacts, group.id).unwrap();
    assert_eq!(
        export.columns,
        vec!["name".to_string(), "email".to_string()]
    );
    assert_eq!(export.rows.len(), 2);

    let ada = export
        .rows
        .iter()
        .find(|row| row.get("name") == Some(&FieldValue::from("Ada")))
        .unwrap();
    assert_eq!(ada.get("email"), Some(&FieldValue::from("ada@example.com")));
}

#[test]
fn export_does_not_reconcile_rows_with_schema() {
    let conn = open_db_in_memory().unwrap();
    let groups = SqliteGroupRepository::try_new(&conn).unwrap();
    let contacts = SqliteContactRepository::try_new(&conn).unwrap();

    let group = Group::new("drifted", None);
    groups.create_group(&group).unwrap();
    groups
        .update_group_schema(group.id, &["name".to_string()])
        .unwrap();

    // A contact written outside the import path can carry keys the stored
    // schema never listed.
    let mut data = FieldMap::new();
    data.insert("nickname".to_string(), FieldValue::from("Lovelace"));
    contacts
        .create_contact(&Contact::new(group.id, data))
        .unwrap();

    let export = export_group(&groups, &contacts, group.id).unwrap();
    assert_eq!(export.columns, vec!["name".to_string()]);
    assert_eq!(export.rows.len(), 1);
    assert_eq!(
        export.rows[0].get("nickname"),
        Some(&FieldValue::from("Lovelace"))
    );
    assert!(export.rows[0].get("name").is_none());
}
