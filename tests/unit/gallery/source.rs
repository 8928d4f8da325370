use std::path::PathBuf;

use super::*;

const TWO_PERSONS: &str = r#"
persons:
  - given_names: Grace
    family_name: Hopper
    sorting: 2
    date_of_entry: "1943-12-01"
    portrait_file: hopper.png
  - given_names: Ada
    family_name: Lovelace
    sorting: 1
    date_of_entry: 1833
    portrait_file: sub/lovelace.jpg
"#;

#[test]
fn parses_records_and_joins_portrait_dir() {
    let def = GalleryDefinition::from_yaml_str(TWO_PERSONS, Path::new("/portraits")).unwrap();
    let persons = def.persons();
    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0].given_names, "Grace");
    assert_eq!(persons[0].sort_key, SortKey::Integer(2));
    assert_eq!(persons[0].portrait, PathBuf::from("/portraits/hopper.png"));
    assert_eq!(persons[1].date_of_entry, "1833");
    assert_eq!(
        persons[1].portrait,
        PathBuf::from("/portraits/sub/lovelace.jpg")
    );
}

#[test]
fn missing_persons_root_is_parse_error() {
    let err = GalleryDefinition::from_yaml_str("people: []\n", Path::new(".")).unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
    assert!(err.to_string().contains("persons"));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let err = GalleryDefinition::from_yaml_str("persons: [\n  - {", Path::new(".")).unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
}

#[test]
fn missing_sorting_is_parse_error_naming_the_record() {
    let yaml = r#"
persons:
  - given_names: A
    family_name: B
    date_of_entry: x
    portrait_file: a.png
"#;
    let err = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
    let msg = err.to_string();
    assert!(msg.contains("persons[0]"));
    assert!(msg.contains("sorting"));
}

#[test]
fn ill_typed_name_is_parse_error() {
    let yaml = r#"
persons:
  - given_names: [A]
    family_name: B
    sorting: 1
    date_of_entry: x
    portrait_file: a.png
"#;
    let err = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("given_names"));
}

#[test]
fn text_sort_keys_are_accepted() {
    let yaml = r#"
persons:
  - {given_names: A, family_name: B, sorting: "b", date_of_entry: x, portrait_file: a.png}
  - {given_names: C, family_name: D, sorting: "a", date_of_entry: y, portrait_file: c.png}
"#;
    let def = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap();
    assert_eq!(def.persons()[1].sort_key, SortKey::from("a"));
}

#[test]
fn mixed_sort_key_kinds_are_rejected() {
    let yaml = r#"
persons:
  - {given_names: A, family_name: B, sorting: 1, date_of_entry: x, portrait_file: a.png}
  - {given_names: C, family_name: D, sorting: "a", date_of_entry: y, portrait_file: c.png}
"#;
    let err = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
}

#[test]
fn null_persons_yields_empty_definition() {
    let def = GalleryDefinition::from_yaml_str("persons:\n", Path::new(".")).unwrap();
    assert!(def.persons().is_empty());
}

#[test]
fn integer_sort_keys_beyond_f64_precision_stay_distinct() {
    let yaml = r#"
persons:
  - {given_names: B, family_name: B, sorting: 9007199254740993, date_of_entry: x, portrait_file: b.png}
  - {given_names: A, family_name: A, sorting: 9007199254740992, date_of_entry: y, portrait_file: a.png}
  - {given_names: C, family_name: C, sorting: 18446744073709551615, date_of_entry: z, portrait_file: c.png}
"#;
    let def = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap();
    assert_eq!(
        def.persons()[0].sort_key,
        SortKey::Integer(9_007_199_254_740_993)
    );
    assert_eq!(
        def.persons()[2].sort_key,
        SortKey::Integer(i128::from(u64::MAX))
    );

    let pagination = crate::gallery::paginate::paginate(def.into_persons(), 12).unwrap();
    let order: Vec<&str> = pagination
        .sorted()
        .iter()
        .map(|p| p.given_names.as_str())
        .collect();
    assert_eq!(order, ["A", "B", "C"]);
}

#[test]
fn fractional_and_integer_keys_interleave_by_value() {
    let yaml = r#"
persons:
  - {given_names: A, family_name: A, sorting: 2, date_of_entry: x, portrait_file: a.png}
  - {given_names: B, family_name: B, sorting: 1.5, date_of_entry: y, portrait_file: b.png}
"#;
    let def = GalleryDefinition::from_yaml_str(yaml, Path::new(".")).unwrap();
    assert_eq!(def.persons()[1].sort_key, SortKey::Float(1.5));
    assert!(def.persons()[1].sort_key < def.persons()[0].sort_key);
}

#[test]
fn unreadable_definition_file_is_parse_error() {
    let path = std::env::temp_dir().join(format!(
        "portrait_gallery_bad_utf8_{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, [b'p', 0xff, 0xfe, b'\n']).unwrap();
    let err = GalleryDefinition::from_path(&path, Path::new(".")).unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
    assert_eq!(err.exit_code(), 3);
    std::fs::remove_file(&path).ok();

    let missing =
        GalleryDefinition::from_path(Path::new("/definitely/missing.yaml"), Path::new("."));
    assert!(matches!(missing, Err(GalleryError::Parse(_))));
}
