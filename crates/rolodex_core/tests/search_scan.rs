use rolodex_core::db::open_db_in_memory;
use rolodex_core::{
    search_contacts, Contact, ContactRepository, FieldMap, FieldValue, SqliteContactRepository,
};
use uuid::Uuid;

#[test]
fn substring_match_is_case_insensitive_both_directions() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_id = Uuid::new_v4();

    let alice = contact(group_id, &[("name", "Alice Johnson"), ("city", "Berlin")]);
    repo.create_contact(&alice).unwrap();
    repo.create_contact(&contact(group_id, &[("name", "bob")]))
        .unwrap();

    let lower_query = search_contacts(&repo, group_id, "alice").unwrap();
    assert_eq!(lower_query.len(), 1);
    assert_eq!(lower_query[0].id, alice.id);

    let upper_query = search_contacts(&repo, group_id, "BERL").unwrap();
    assert_eq!(upper_query.len(), 1);
    assert_eq!(upper_query[0].id, alice.id);
}

#[test]
fn search_is_scoped_to_the_group() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_a = Uuid::new_v4();
    let group_b = Uuid::new_v4();

    let ours = contact(group_a, &[("name", "Alice")]);
    repo.create_contact(&ours).unwrap();
    repo.create_contact(&contact(group_b, &[("name", "Alice Clone")]))
        .unwrap();

    let hits = search_contacts(&repo, group_a, "alice").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, ours.id);
}

#[test]
fn empty_query_returns_every_contact_including_empty_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_id = Uuid::new_v4();

    repo.create_contact(&contact(group_id, &[("name", "Alice")]))
        .unwrap();
    repo.create_contact(&contact(group_id, &[])).unwrap();

    let hits = search_contacts(&repo, group_id, "").unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn non_text_values_match_by_canonical_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_id = Uuid::new_v4();

    let mut data = FieldMap::new();
    data.insert("age".to_string(), FieldValue::Number(42.0));
    data.insert("active".to_string(), FieldValue::Bool(true));
    data.insert("note".to_string(), FieldValue::Null);
    let typed = Contact::new(group_id, data);
    repo.create_contact(&typed).unwrap();
    repo.create_contact(&contact(group_id, &[("name", "bob")]))
        .unwrap();

    let by_number = search_contacts(&repo, group_id, "42.0").unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, typed.id);

    let by_bool = search_contacts(&repo, group_id, "TRUE").unwrap();
    assert_eq!(by_bool.len(), 1);
    assert_eq!(by_bool[0].id, typed.id);
}

#[test]
fn contact_with_multiple_matching_fields_appears_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_id = Uuid::new_v4();

    let double = contact(group_id, &[("a", "match me"), ("b", "match too")]);
    repo.create_contact(&double).unwrap();

    let hits = search_contacts(&repo, group_id, "match").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, double.id);
}

#[test]
fn no_match_returns_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let group_id = Uuid::new_v4();

    repo.create_contact(&contact(group_id, &[("name", "Alice")]))
        .unwrap();

    assert!(search_contacts(&repo, group_id, "zzz").unwrap().is_empty());
}

fn contact(group_id: Uuid, entries: &[(&str, &str)]) -> Contact {
    let data: FieldMap = entries
        .iter()
        .map(|(key, value)| (key.to_string(), FieldValue::from(*value)))
        .collect();
    Contact::new(group_id, data)
}
