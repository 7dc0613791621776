use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::error::PeopleError;
use crate::mapper::{assign, map_from_bag, FieldMapping, MappedRecord, PropertyBag, RecordMapper, Shape};
use crate::person::Person;

fn bag(entries: &[(&str, Value)]) -> PropertyBag {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Only knows how to read profile bags
#[derive(Debug, Default, PartialEq)]
struct ProfileOnly {
    email: Option<String>,
}

static PROFILE_ONLY: Lazy<Vec<FieldMapping<ProfileOnly>>> = Lazy::new(|| {
    vec![FieldMapping::<ProfileOnly>::new("Email", |r, v| assign(&mut r.email, v)).profile("WorkEmail")]
});

impl MappedRecord for ProfileOnly {
    fn create() -> Self {
        Self::default()
    }

    fn field_mappings() -> &'static [FieldMapping<Self>] {
        &PROFILE_ONLY
    }
}

/// Non-optional fields, a numeric field and one field reachable only by name
#[derive(Debug, Default, PartialEq)]
struct Contact {
    name: String,
    tags: Vec<String>,
    rank: f64,
    department: Option<String>,
}

static CONTACT: Lazy<Vec<FieldMapping<Contact>>> = Lazy::new(|| {
    vec![
        FieldMapping::<Contact>::new("Name", |r, v| assign(&mut r.name, v)).search("PreferredName"),
        FieldMapping::<Contact>::new("Tags", |r, v| assign(&mut r.tags, v)).search_split("Tags"),
        FieldMapping::<Contact>::new("Rank", |r, v| assign(&mut r.rank, v)).search("Rank"),
        FieldMapping::<Contact>::new("Department", |r, v| assign(&mut r.department, v)),
    ]
});

impl MappedRecord for Contact {
    fn create() -> Self {
        Self::default()
    }

    fn field_mappings() -> &'static [FieldMapping<Self>] {
        &CONTACT
    }
}

#[derive(Debug, Default)]
struct BlankKey {
    value: Option<String>,
}

static BLANK_KEY: Lazy<Vec<FieldMapping<BlankKey>>> = Lazy::new(|| {
    vec![FieldMapping::<BlankKey>::new("Value", |r, v| assign(&mut r.value, v)).search("  ")]
});

impl MappedRecord for BlankKey {
    fn create() -> Self {
        Self::default()
    }

    fn field_mappings() -> &'static [FieldMapping<Self>] {
        &BLANK_KEY
    }
}

#[test]
fn test_no_descriptors_for_shape_is_configuration_error() {
    let bags = [
        bag(&[]),
        bag(&[("WorkEmail", json!("a@x.com"))]),
        bag(&[("Email", json!("a@x.com")), ("Anything", json!(1))]),
    ];
    for b in &bags {
        let result = map_from_bag::<ProfileOnly>(b, Shape::Search);
        assert!(matches!(result, Err(PeopleError::Configuration(_))));
    }

    let record: ProfileOnly =
        map_from_bag(&bag(&[("WorkEmail", json!("a@x.com"))]), Shape::Profile).unwrap();
    assert_eq!(record.email.as_deref(), Some("a@x.com"));
}

#[test]
fn test_blank_source_key_is_configuration_error() {
    let err = map_from_bag::<BlankKey>(&bag(&[("  ", json!("x"))]), Shape::Search).unwrap_err();
    match err {
        PeopleError::Configuration(msg) => assert!(msg.contains("Value")),
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_missing_keys_leave_defaults() {
    let person: Person = map_from_bag(&bag(&[]), Shape::Search).unwrap();
    assert_eq!(person, Person::default());

    let contact: Contact = map_from_bag(&bag(&[("Unrelated", json!("x"))]), Shape::Search).unwrap();
    assert_eq!(contact, Contact::default());
}

#[test]
fn test_profile_split_uses_pipe_delimiter() {
    let person: Person =
        map_from_bag(&bag(&[("SPS-Interests", json!("cooking|reading|"))]), Shape::Profile).unwrap();
    assert_eq!(
        person.interests,
        Some(vec!["cooking".to_string(), "reading".to_string()])
    );
}

#[test]
fn test_wrong_delimiter_keeps_whole_string() {
    let props = bag(&[
        ("WorkEmail", json!("a@x.com")),
        ("SPS-Skills", json!("go;rust;")),
    ]);
    let person: Person = map_from_bag(&props, Shape::Profile).unwrap();
    assert_eq!(person.email_address.as_deref(), Some("a@x.com"));
    assert_eq!(person.skills, Some(vec!["go;rust;".to_string()]));
}

#[test]
fn test_empty_or_null_split_value_stays_unset() {
    let person: Person = map_from_bag(
        &bag(&[("Skills", json!("")), ("Interests", Value::Null)]),
        Shape::Search,
    )
    .unwrap();
    assert_eq!(person.skills, None);
    assert_eq!(person.interests, None);
}

#[test]
fn test_split_of_non_string_is_type_mismatch() {
    let err = map_from_bag::<Person>(&bag(&[("Skills", json!(7))]), Shape::Search).unwrap_err();
    match err {
        PeopleError::TypeMismatch { field, key, .. } => {
            assert_eq!(field, "Skills");
            assert_eq!(key, "Skills");
        }
        other => panic!("Expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_scalar_type_mismatch_is_not_coerced() {
    let err = map_from_bag::<Contact>(&bag(&[("Rank", json!("high"))]), Shape::Search).unwrap_err();
    assert!(matches!(err, PeopleError::TypeMismatch { ref field, .. } if field == "Rank"));

    let err = map_from_bag::<Person>(&bag(&[("PreferredName", json!(42))]), Shape::Search).unwrap_err();
    assert!(matches!(err, PeopleError::TypeMismatch { .. }));
}

#[test]
fn test_typed_scalars_assign_directly() {
    let contact: Contact = map_from_bag(
        &bag(&[
            ("PreferredName", json!("Ada")),
            ("Rank", json!(12.5)),
            ("Tags", json!(";a;;b;")),
        ]),
        Shape::Search,
    )
    .unwrap();
    assert_eq!(contact.name, "Ada");
    assert_eq!(contact.rank, 12.5);
    assert_eq!(contact.tags, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_input_bag_is_not_mutated() {
    let row = bag(&[("Skills", json!("a;b")), ("PreferredName", json!("Ada"))]);
    let before = row.clone();
    let _person: Person = map_from_bag(&row, Shape::Search).unwrap();
    assert_eq!(row, before);
}

#[test]
fn test_name_fallback_is_opt_in() {
    let row = bag(&[("PreferredName", json!("Ada")), ("Department", json!("R&D"))]);

    let contact: Contact = map_from_bag(&row, Shape::Search).unwrap();
    assert_eq!(contact.department, None);

    let contact: Contact = RecordMapper::new(Shape::Search)
        .with_name_fallback(true)
        .map(&row)
        .unwrap();
    assert_eq!(contact.department.as_deref(), Some("R&D"));
}

#[test]
fn test_name_fallback_never_overrides_descriptor() {
    // "Name" matches the published name of a field that already has a search descriptor
    let row = bag(&[("PreferredName", json!("Ada")), ("Name", json!("Impostor"))]);
    let contact: Contact = RecordMapper::new(Shape::Search)
        .with_name_fallback(true)
        .map(&row)
        .unwrap();
    assert_eq!(contact.name, "Ada");
}

#[test]
fn test_same_field_different_keys_per_shape() {
    let row = bag(&[("JobTitle", json!("Engineer")), ("Title", json!("Wrong source"))]);
    let from_search: Person = map_from_bag(&row, Shape::Search).unwrap();
    let from_profile: Person = map_from_bag(&row, Shape::Profile).unwrap();
    assert_eq!(from_search.title.as_deref(), Some("Engineer"));
    assert_eq!(from_profile.title.as_deref(), Some("Wrong source"));
}

#[test]
fn test_name_fallback_skips_values_that_do_not_fit() {
    // LastModified has no profile descriptor, so it is only reachable by name
    let props = bag(&[
        ("DisplayName", json!("Ada")),
        ("LastModified", json!("yesterday-ish")),
        ("Office", json!(12)),
    ]);
    let person: Person = RecordMapper::new(Shape::Profile)
        .with_name_fallback(true)
        .map(&props)
        .unwrap();
    assert_eq!(person.display_name.as_deref(), Some("Ada"));
    assert_eq!(person.last_modified, None);
    assert_eq!(person.office, None);

    let contact: Contact = RecordMapper::new(Shape::Search)
        .with_name_fallback(true)
        .map(&bag(&[("Department", json!(["not", "a", "string"]))]))
        .unwrap();
    assert_eq!(contact.department, None);
}

#[test]
fn test_descriptor_mismatch_still_fails_with_name_fallback() {
    let err = RecordMapper::new(Shape::Search)
        .with_name_fallback(true)
        .map::<Contact>(&bag(&[("Rank", json!("high"))]))
        .unwrap_err();
    assert!(matches!(err, PeopleError::TypeMismatch { ref field, .. } if field == "Rank"));
}
