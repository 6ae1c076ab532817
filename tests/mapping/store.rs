//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use multifind::mapping::{JsonFileStore, MappingStore, MemoryStore};

    use crate::common::{foo_bar, mapping, mapping_set};

    #[test]
    fn missing_file_loads_empty_set() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("mappings.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn file_store_saves_current_shape() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("mappings.json"));
        let mappings = mapping_set(vec![
            mapping(&["foo", "baz"], &["bar"]),
            mapping(&["qux"], &["quux", "corge"]),
        ]);

        store.save(&mappings).unwrap();

        assert_eq!(store.load().unwrap(), mappings);
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["mappings"][0]["searchTerms"], json!(["foo", "baz"]));
        assert!(raw["mappings"][0].get("mappedTerm").is_none());
    }

    #[test]
    fn file_store_normalizes_records_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mappings.json");
        fs::write(
            &path,
            r#"{"mappings":[
                {"searchTerms":["foo"],"mappedTerm":"bar"},
                {"searchTerms":[],"mappedTerms":["lost"]}
            ]}"#,
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(0).unwrap().mapped_terms, vec!["bar"]);
        assert_eq!(loaded.get(0).unwrap().search_color.as_str(), "#fff34d");
        assert!(loaded.get(1).unwrap().search_terms.is_empty());
        assert_eq!(loaded.get(1).unwrap().mapped_terms, vec!["lost"]);
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();

        assert!(store.load().unwrap().is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn memory_store_rewrites_legacy_blob_on_save() {
        let store = MemoryStore::with_blob(json!({
            "mappings": [{ "searchTerms": "foo", "mappedTerm": "bar" }]
        }));

        let loaded = store.load().unwrap();
        assert_eq!(loaded.get(0).unwrap().search_terms, vec!["foo"]);

        store.save(&loaded).unwrap();
        let raw = store.raw().unwrap();
        assert_eq!(raw["mappings"][0]["searchTerms"], json!(["foo"]));
        assert_eq!(raw["mappings"][0]["mappedTerms"], json!(["bar"]));
    }

    #[test]
    fn memory_store_replaces_whole_set() {
        let store = MemoryStore::new();
        store.save(&foo_bar()).unwrap();
        store.save(&mapping_set(vec![mapping(&["a"], &["b"])])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().search_terms, vec!["a"]);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use std::fs;

    use tempfile::tempdir;

    use multifind::highlight::HighlightError;
    use multifind::mapping::{JsonFileStore, MappingStore};

    #[test]
    fn corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mappings.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::new(&path).load();

        assert!(matches!(result, Err(HighlightError::ParseError(_))));
    }

    #[test]
    fn save_into_missing_directory() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("mappings.json"));

        let result = store.save(&crate::common::foo_bar());

        assert!(matches!(result, Err(HighlightError::IoError(_))));
    }
}
