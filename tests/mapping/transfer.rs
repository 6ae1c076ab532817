//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use multifind::mapping::transfer::{export_json_at, EXPORT_FILE_NAME};
    use multifind::mapping::{export_json, import_json};

    use crate::common::{foo_bar, mapping, mapping_set};

    #[test]
    fn export_carries_millisecond_utc_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 15).unwrap();

        let exported: Value = serde_json::from_str(&export_json_at(&foo_bar(), at).unwrap()).unwrap();

        assert_eq!(exported["exportDate"], json!("2024-03-05T08:30:15.000Z"));
        assert_eq!(
            exported["mappings"],
            json!([{
                "searchTerms": ["foo"],
                "mappedTerms": ["bar"],
                "searchColor": "#111",
                "mappedColor": "#222"
            }])
        );
    }

    #[test]
    fn export_is_indented() {
        let exported = export_json(&foo_bar()).unwrap();

        assert!(exported.contains('\n'));
        assert!(exported.contains("  \"mappings\""));
    }

    #[test]
    fn exported_bundle_imports_back() {
        let mappings = mapping_set(vec![
            mapping(&["foo"], &["bar"]),
            mapping(&["Größe"], &["size", "dimension"]),
        ]);

        let imported = import_json(&export_json(&mappings).unwrap()).unwrap();

        assert_eq!(imported, mappings);
    }

    #[test]
    fn import_accepts_legacy_records() {
        let imported = import_json(
            r#"{"mappings":[{"searchTerms":["foo"],"mappedTerm":"bar","searchColor":"red"}]}"#,
        )
        .unwrap();

        let mapping = imported.get(0).unwrap();
        assert_eq!(mapping.mapped_terms, vec!["bar"]);
        assert_eq!(mapping.search_color.as_str(), "red");
        assert_eq!(mapping.mapped_color.as_str(), "#4dd0e1");
    }

    #[test]
    fn import_without_export_date() {
        assert!(import_json(r#"{"mappings":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn default_file_name() {
        assert_eq!(EXPORT_FILE_NAME, "multi-find-settings.json");
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
    use multifind::highlight::HighlightError;
    use multifind::mapping::{export_json, import_json, MappingSet};

    #[test]
    fn export_of_empty_set() {
        let result = export_json(&MappingSet::empty());
        assert!(matches!(result, Err(HighlightError::InvalidInput(_))));
    }

    #[test]
    fn import_of_invalid_json() {
        let result = import_json("{\"mappings\": [");
        assert!(matches!(result, Err(HighlightError::ParseError(_))));
    }

    #[test]
    fn import_without_mappings_array() {
        for content in [r#"{}"#, r#"{"mappings":{"a":1}}"#, r#"[]"#, r#""mappings""#] {
            let result = import_json(content);
            assert!(
                matches!(result, Err(HighlightError::InvalidInput(_))),
                "{} should be rejected",
                content
            );
        }
    }
}
