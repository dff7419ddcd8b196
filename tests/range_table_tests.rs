//! Integration tests for loading range tables and looking ISBNs up in them.

mod common;

use std::io::Write;
use std::sync::Arc;

use isbnr::{Isbn, IsbnError, RangeRule, RangeTable, RegistrationGroup};
use tempfile::NamedTempFile;

#[test]
fn test_bundled_stats() {
    let stats = RangeTable::bundled().stats();
    assert!((200..400).contains(&stats.group_count), "{stats:?}");
    assert!(stats.rule_count > stats.group_count, "{stats:?}");
    assert!(
        (1_000_000_000..2_000_000_000).contains(&stats.valid_isbn_count),
        "{stats:?}"
    );
}

#[test]
fn test_list_registration_groups() {
    let groups = isbnr::list_registration_groups();
    assert_eq!(groups.len(), RangeTable::bundled().len());
    assert!(groups.len() >= 200);
    assert_eq!(groups[0].to_string(), "978-0");
    assert_eq!(groups[0].name, "English language");

    let france = groups
        .iter()
        .find(|group| group.to_string() == "979-10")
        .expect("France is bundled");
    assert_eq!(france.name, "France");
}

#[test]
fn test_isbn10_and_isbn13_groups() {
    let table = RangeTable::bundled();
    let isbn10: Vec<_> = table.isbn10_groups().collect();
    let isbn13: Vec<_> = table.isbn13_groups().collect();

    assert!(isbn10.iter().all(|group| group.prefix == "978"));
    assert!(isbn10.len() < isbn13.len());
    assert!(isbn13.iter().any(|group| group.prefix == "979"));
    assert!(table.group("979", "8").is_some());
    assert!(table.group("978", "99999").is_none());
}

#[test]
fn test_registration_group_names() {
    let table = RangeTable::bundled();
    for (prefix, identifier, name) in [
        ("978", "2", "French language"),
        ("978", "3", "German language"),
        ("978", "4", "Japan"),
        ("978", "85", "Brazil"),
        ("978", "88", "Italy"),
        ("978", "611", "Thailand"),
        ("978", "99970", "Haiti"),
        ("979", "12", "Italy"),
    ] {
        let group = table.group(prefix, identifier).unwrap();
        assert_eq!(group.name, name, "{prefix}-{identifier}");
    }
}

#[test]
fn test_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "date": "Sun, 18 Oct 2026 10:00:00 GMT",
            "groups": [
                {{
                    "prefix": "978",
                    "identifier": "0",
                    "name": "English language",
                    "rules": [{{"length": 2, "start": "0000000", "end": "1999999"}}]
                }}
            ]
        }}"#
    )
    .unwrap();

    let table = RangeTable::from_path(file.path()).unwrap();
    assert_eq!(table.date(), Some("Sun, 18 Oct 2026 10:00:00 GMT"));
    assert_eq!(table.entries()[0].rules, vec![RangeRule::new(2, "00", "19")]);

    let table = Arc::new(table);
    let isbn = Isbn::parse_with("0001234560", &table).unwrap();
    assert_eq!(isbn.to_formatted_string(), "0-00-123456-0");

    let outside = Isbn::parse_with("0321234561", &table).unwrap();
    assert!(outside.has_valid_registration_group());
    assert!(!outside.is_valid());
}

#[test]
fn test_from_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = RangeTable::from_path(dir.path().join("missing.json"));
    assert!(matches!(result, Err(IsbnError::Io(_))));
}

#[test]
fn test_from_range_message_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"<?xml version="1.0" encoding="utf-8"?>
<ISBNRangeMessage>
  <MessageDate>Sun, 18 Oct 2026 10:00:00 GMT</MessageDate>
  <RegistrationGroups>
    <Group>
      <Prefix>978-952</Prefix>
      <Agency>Finland</Agency>
      <Rules>
        <Rule><Range>0000000-1999999</Range><Length>2</Length></Rule>
        <Rule><Range>2000000-4999999</Range><Length>3</Length></Rule>
      </Rules>
    </Group>
  </RegistrationGroups>
</ISBNRangeMessage>"#
    )
    .unwrap();

    let table = Arc::new(RangeTable::from_range_message_path(file.path()).unwrap());
    assert_eq!(table.date(), Some("Sun, 18 Oct 2026 10:00:00 GMT"));
    assert_eq!(table.stats().rule_count, 2);

    let isbn = Isbn::parse_with("9789521234569", &table).unwrap();
    assert_eq!(isbn.to_formatted_string(), "978-952-12-3456-9");
    assert_eq!(isbn.group_name().unwrap(), "Finland");

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        RangeTable::from_range_message_path(dir.path().join("RangeMessage.xml")),
        Err(IsbnError::Io(_))
    ));
}

#[test]
fn test_from_json_list_form() {
    let table = RangeTable::from_json_str(
        r#"[{"prefix": "979", "identifier": "10", "name": "France",
             "rules": [{"length": 0, "start": "0000000", "end": "0999999"},
                       {"length": 3, "start": "2000000", "end": "6999999"}]}]"#,
    )
    .unwrap();

    assert_eq!(table.date(), None);
    assert_eq!(table.len(), 1);
    // zero-length rules are unassigned ranges
    assert_eq!(table.entries()[0].rules.len(), 1);
}

#[test]
fn test_malformed_tables() {
    assert!(matches!(
        RangeTable::from_json_str("{not json"),
        Err(IsbnError::Json(_))
    ));

    for json in [
        r#"[{"prefix": "97", "identifier": "0", "name": "x"}]"#,
        r#"[{"prefix": "978", "identifier": "", "name": "x"}]"#,
        r#"[{"prefix": "978", "identifier": "12345678", "name": "x"}]"#,
        r#"[{"prefix": "978", "identifier": "0", "name": "x",
             "rules": [{"length": 8, "start": "00000000", "end": "99999999"}]}]"#,
        r#"[{"prefix": "978", "identifier": "0", "name": "x",
             "rules": [{"length": 3, "start": "1", "end": "999"}]}]"#,
    ] {
        assert!(
            matches!(RangeTable::from_json_str(json), Err(IsbnError::InvalidRangeTable(_))),
            "{json}"
        );
    }
}

#[test]
fn test_table_order_decides_match() {
    let table = Arc::new(
        RangeTable::from_entries(vec![
            common::entry("978", "0", "First", &[(2, "00", "99")]),
            common::entry("978", "0", "Second", &[(3, "000", "999")]),
        ])
        .unwrap(),
    );

    let isbn = Isbn::parse_with("0001234560", &table).unwrap();
    assert_eq!(isbn.group_name().unwrap(), "First");
    assert_eq!(isbn.publisher_identifier().unwrap(), "00");
}

#[test]
fn test_empty_table() {
    let table = Arc::new(RangeTable::default());
    let isbn = Isbn::parse_with("9780123456786", &table).unwrap();

    assert!(!isbn.has_valid_registration_group());
    assert_eq!(isbn.to_formatted_string(), "9780123456786");
    assert_eq!(isbn, Isbn::parse("9780123456786").unwrap());
}

#[test]
fn test_registration_group_identity_ignores_name() {
    assert_eq!(
        RegistrationGroup::new("978", "0", "English language"),
        RegistrationGroup::new("978", "0", "")
    );
    assert_ne!(
        RegistrationGroup::new("978", "1", ""),
        RegistrationGroup::new("979", "1", "")
    );
}
