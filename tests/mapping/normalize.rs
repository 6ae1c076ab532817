//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use serde_json::json;

    use multifind::mapping::{normalize_blob, normalize_record, normalize_records, Color};

    #[test]
    fn current_shape_is_kept() {
        let mapping = normalize_record(&json!({
            "searchTerms": ["foo", "baz"],
            "mappedTerms": ["bar"],
            "searchColor": "#111",
            "mappedColor": "#222"
        }));

        assert_eq!(mapping.search_terms, vec!["foo", "baz"]);
        assert_eq!(mapping.mapped_terms, vec!["bar"]);
        assert_eq!(mapping.search_color, Color::from("#111"));
        assert_eq!(mapping.mapped_color, Color::from("#222"));
    }

    #[test]
    fn legacy_mapped_term_is_lifted() {
        let mapping = normalize_record(&json!({
            "searchTerms": ["foo"],
            "mappedTerm": "bar"
        }));

        assert_eq!(mapping.mapped_terms, vec!["bar"]);
    }

    #[test]
    fn plural_list_wins_over_legacy_field() {
        let mapping = normalize_record(&json!({
            "searchTerms": ["foo"],
            "mappedTerm": "old",
            "mappedTerms": ["new"]
        }));

        assert_eq!(mapping.mapped_terms, vec!["new"]);
    }

    #[test]
    fn scalar_search_terms_are_lifted() {
        let mapping = normalize_record(&json!({
            "searchTerms": "foo",
            "mappedTerms": ["bar"]
        }));

        assert_eq!(mapping.search_terms, vec!["foo"]);
    }

    #[test]
    fn missing_colors_get_defaults() {
        let mapping = normalize_record(&json!({
            "searchTerms": ["foo"],
            "mappedTerms": ["bar"],
            "searchColor": 42
        }));

        assert_eq!(mapping.search_color.as_str(), "#fff34d");
        assert_eq!(mapping.mapped_color.as_str(), "#4dd0e1");
    }

    #[test]
    fn non_string_terms_are_dropped() {
        let mapping = normalize_record(&json!({
            "searchTerms": ["foo", 1, null, "baz"],
            "mappedTerms": [true, "bar"]
        }));

        assert_eq!(mapping.search_terms, vec!["foo", "baz"]);
        assert_eq!(mapping.mapped_terms, vec!["bar"]);
    }

    #[test]
    fn records_keep_their_order() {
        let set = normalize_records(&[
            json!({ "searchTerms": ["a"], "mappedTerms": ["b"] }),
            json!({ "searchTerms": ["c"], "mappedTerm": "d" }),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().search_terms, vec!["a"]);
        assert_eq!(set.get(1).unwrap().mapped_terms, vec!["d"]);
    }

    #[test]
    fn record_without_mapped_terms_keeps_search_terms() {
        let mapping = normalize_record(&json!({ "searchTerms": ["foo"] }));

        assert_eq!(mapping.search_terms, vec!["foo"]);
        assert!(mapping.mapped_terms.is_empty());
        assert!(mapping.has_terms());
    }

    #[test]
    fn unusable_record_keeps_later_groups_in_place() {
        let set = normalize_records(&[
            json!({ "searchTerms": ["alpha"], "mappedTerms": [] }),
            json!({ "searchTerms": ["beta"], "mappedTerms": ["gamma"] }),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().search_terms, vec!["alpha"]);
        assert_eq!(set.get(1).unwrap().search_terms, vec!["beta"]);
        assert_eq!(set.get(1).unwrap().mapped_terms, vec!["gamma"]);
    }

    #[test]
    fn blob_mappings_are_read() {
        let set = normalize_blob(&json!({
            "mappings": [{ "searchTerms": ["a"], "mappedTerms": ["b"] }],
            "exportDate": "2024-01-01T00:00:00.000Z"
        }));

        assert_eq!(set.len(), 1);
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
    use serde_json::json;

    use multifind::mapping::{normalize_blob, normalize_record, normalize_records, Color};

    #[test]
    fn record_with_only_empty_terms() {
        let mapping = normalize_record(&json!({ "searchTerms": [""], "mappedTerms": [1] }));

        assert_eq!(mapping.search_terms, vec![""]);
        assert!(mapping.mapped_terms.is_empty());
        assert!(!mapping.has_terms());
    }

    #[test]
    fn record_that_is_not_an_object() {
        for record in [json!("foo=bar"), json!(null), json!(7)] {
            let mapping = normalize_record(&record);

            assert!(!mapping.has_terms());
            assert_eq!(mapping.search_color, Color::default_search());
            assert_eq!(mapping.mapped_color, Color::default_mapped());
        }
    }

    #[test]
    fn invalid_records_hold_their_group() {
        let set = normalize_records(&[
            json!(7),
            json!({ "mappedTerms": ["b"] }),
            json!({ "searchTerms": ["a"], "mappedTerms": ["b"] }),
        ]);

        assert_eq!(set.len(), 3);
        assert!(!set.get(0).unwrap().has_terms());
        assert_eq!(set.get(1).unwrap().mapped_terms, vec!["b"]);
        assert_eq!(set.get(2).unwrap().search_terms, vec!["a"]);
    }

    #[test]
    fn blob_without_mappings_array() {
        assert!(normalize_blob(&json!({})).is_empty());
        assert!(normalize_blob(&json!({ "mappings": { "0": {} } })).is_empty());
        assert!(normalize_blob(&json!([])).is_empty());
    }
}
