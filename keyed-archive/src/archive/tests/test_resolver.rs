#[cfg(test)]
mod resolver_tests {
    use std::time::SystemTime;

    use base64::{prelude::BASE64_STANDARD, Engine};
    use plist::{Date, Dictionary, Integer, Uid, Value};

    use crate::{
        archive::{
            models::{Archive, ResolvedValue},
            resolver::Unarchiver,
        },
        error::archive::ArchiveError,
    };

    fn archive(top: Vec<(&str, u64)>, objects: Vec<Value>) -> Archive {
        Archive {
            version: 100_000,
            archiver: "NSKeyedArchiver".to_string(),
            entry_points: top
                .into_iter()
                .map(|(name, uid)| (name.to_string(), uid))
                .collect(),
            objects,
        }
    }

    fn class_metadata(name: &str) -> Value {
        let mut metadata = Dictionary::new();
        metadata.insert("$classname".to_string(), Value::String(name.to_string()));
        Value::Dictionary(metadata)
    }

    /// An archived `ArchiverType { value: 0, name: "Panda" }` behind the `root` entry point
    fn sample_archive() -> Archive {
        let mut object = Dictionary::new();
        object.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        object.insert("value".to_string(), Value::Integer(Integer::from(0i64)));
        object.insert("name".to_string(), Value::String("Panda".to_string()));

        archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
                class_metadata("ArchiverType"),
            ],
        )
    }

    #[test]
    fn can_resolve_null_reference_without_table() {
        let archive = archive(vec![], vec![]);
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.resolve(0).unwrap();

        assert_eq!(result, ResolvedValue::Null);
    }

    #[test]
    fn can_parse_simple_custom_type() {
        let archive = sample_archive();
        let mut unarchiver = Unarchiver::new(&archive);

        let parsed = unarchiver.parse().unwrap();

        assert_eq!(parsed.len(), 1);
        let (name, root) = &parsed[0];
        assert_eq!(name, "root");
        assert_eq!(root.get("$type").unwrap().as_str(), Some("ArchiverType"));
        assert_eq!(root.get("value"), Some(&ResolvedValue::SignedInteger(0)));
        assert_eq!(root.get("name").unwrap().as_str(), Some("Panda"));
        assert_eq!(root.get("$class"), None);
    }

    #[test]
    fn can_resolve_root_entry() {
        let archive = sample_archive();
        let mut unarchiver = Unarchiver::new(&archive);

        let root = unarchiver.root().unwrap();

        assert_eq!(root.get("$type").unwrap().as_str(), Some("ArchiverType"));
    }

    #[test]
    fn cant_resolve_missing_root_entry() {
        let mut archive = sample_archive();
        archive.entry_points = vec![("main".to_string(), 1)];
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.root();

        assert!(matches!(result, Err(ArchiveError::MissingRootEntry)));
    }

    #[test]
    fn can_parse_any_entry_point() {
        let mut archive = sample_archive();
        archive.entry_points = vec![("main".to_string(), 1)];
        let mut unarchiver = Unarchiver::new(&archive);

        let parsed = unarchiver.parse().unwrap();

        assert_eq!(parsed[0].0, "main");
        assert_eq!(
            parsed[0].1.get("$type").unwrap().as_str(),
            Some("ArchiverType")
        );
    }

    #[test]
    fn can_resolve_self_reference() {
        let mut object = Dictionary::new();
        object.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        object.insert("me".to_string(), Value::Uid(Uid::new(1)));
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
                class_metadata("Node"),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let root = unarchiver.resolve(1).unwrap();

        assert_eq!(root.get("me"), Some(&ResolvedValue::Cycle));
    }

    #[test]
    fn can_resolve_mutual_cycle() {
        let mut first = Dictionary::new();
        first.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        first.insert("next".to_string(), Value::Uid(Uid::new(3)));
        let mut second = Dictionary::new();
        second.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        second.insert("next".to_string(), Value::Uid(Uid::new(1)));
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(first),
                class_metadata("Node"),
                Value::Dictionary(second),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let root = unarchiver.resolve(1).unwrap();

        let next = root.get("next").unwrap();
        assert_eq!(next.get("$type").unwrap().as_str(), Some("Node"));
        assert_eq!(next.get("next"), Some(&ResolvedValue::Cycle));
    }

    #[test]
    fn can_resolve_cached_value_without_second_traversal() {
        let archive = sample_archive();
        let mut unarchiver = Unarchiver::new(&archive);

        let first = unarchiver.resolve(1).unwrap();
        let traversals = unarchiver.resolutions;
        let second = unarchiver.resolve(1).unwrap();

        assert_eq!(first, second);
        assert_eq!(unarchiver.resolutions, traversals);
    }

    #[test]
    fn can_share_substructure_between_entry_points() {
        let mut archive = sample_archive();
        archive.entry_points = vec![("root".to_string(), 1), ("alias".to_string(), 1)];
        let mut unarchiver = Unarchiver::new(&archive);

        let parsed = unarchiver.parse().unwrap();

        assert_eq!(parsed[0].1, parsed[1].1);
        assert_eq!(unarchiver.resolutions, 1);
    }

    #[test]
    fn can_resolve_data_as_base64() {
        let bytes = vec![0x00, 0x01, 0x02, 0xff, 0x7f];
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Data(bytes.clone()),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.resolve(1).unwrap();

        match result {
            ResolvedValue::Data(text) => {
                assert_eq!(BASE64_STANDARD.decode(text).unwrap(), bytes)
            }
            other => panic!("expected base64 data, got {other:?}"),
        }
    }

    #[test]
    fn can_resolve_mixed_sequence_in_order() {
        let mut object = Dictionary::new();
        object.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        object.insert(
            "items".to_string(),
            Value::Array(vec![
                Value::Integer(Integer::from(1i64)),
                Value::Uid(Uid::new(3)),
                Value::String("inline".to_string()),
                Value::Uid(Uid::new(0)),
            ]),
        );
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
                class_metadata("Bag"),
                Value::String("referenced".to_string()),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let root = unarchiver.resolve(1).unwrap();

        assert_eq!(
            root.get("items"),
            Some(&ResolvedValue::Array(vec![
                ResolvedValue::SignedInteger(1),
                ResolvedValue::String("referenced".to_string()),
                ResolvedValue::String("inline".to_string()),
                ResolvedValue::Null,
            ]))
        );
    }

    #[test]
    fn can_resolve_primitive_table_slots() {
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Boolean(true),
                Value::Real(1.5),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        assert_eq!(unarchiver.resolve(1).unwrap(), ResolvedValue::Boolean(true));
        assert_eq!(unarchiver.resolve(2).unwrap(), ResolvedValue::Double(1.5));
    }

    #[test]
    fn can_carry_dates_through_resolution() {
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Date(Date::from(SystemTime::UNIX_EPOCH)),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.resolve(1).unwrap();

        assert!(matches!(result, ResolvedValue::Date(_)));
    }

    #[test]
    fn cant_resolve_reference_outside_table() {
        let archive = archive(
            vec![("root", 5)],
            vec![
                Value::String("$null".to_string()),
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.parse();

        assert!(matches!(
            result,
            Err(ArchiveError::ReferenceOutOfRange(5, 3))
        ));
    }

    #[test]
    fn cant_resolve_object_without_class() {
        let mut object = Dictionary::new();
        object.insert("name".to_string(), Value::String("Panda".to_string()));
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.parse();

        assert!(matches!(
            result,
            Err(ArchiveError::MissingClassReference(1))
        ));
    }

    #[test]
    fn cant_resolve_object_with_null_class() {
        let mut object = Dictionary::new();
        object.insert("$class".to_string(), Value::Uid(Uid::new(0)));
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.parse();

        assert!(matches!(
            result,
            Err(ArchiveError::MissingClassReference(1))
        ));
    }

    #[test]
    fn cant_resolve_invalid_class_metadata() {
        let mut object = Dictionary::new();
        object.insert("$class".to_string(), Value::Uid(Uid::new(2)));
        let archive = archive(
            vec![("root", 1)],
            vec![
                Value::String("$null".to_string()),
                Value::Dictionary(object),
                Value::String("not metadata".to_string()),
            ],
        );
        let mut unarchiver = Unarchiver::new(&archive);

        let result = unarchiver.parse();

        assert!(matches!(
            result,
            Err(ArchiveError::InvalidClassMetadata(2))
        ));
    }
}
