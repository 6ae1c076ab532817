//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use multifind::mapping::{parse_term_list, Color, Mapping, MappingSet};

    #[test]
    fn term_list_is_split_on_semicolons() {
        assert_eq!(
            parse_term_list(" apple; pear ;;banana; "),
            vec!["apple", "pear", "banana"]
        );
    }

    #[test]
    fn mapping_from_lists() {
        let mapping = Mapping::from_lists(
            "rust;cargo",
            "crate",
            Color::from("#fff34d"),
            Color::from("#4dd0e1"),
        )
        .unwrap();

        assert_eq!(mapping.search_terms, vec!["rust", "cargo"]);
        assert_eq!(mapping.mapped_terms, vec!["crate"]);
        assert_eq!(mapping.search_color.as_str(), "#fff34d");
    }

    #[test]
    fn set_appends_distinct_mapping() {
        let first = Mapping::from_lists("a", "b", Color::default_search(), Color::default_mapped())
            .unwrap();
        let second = Mapping::from_lists("a", "c", Color::default_search(), Color::default_mapped())
            .unwrap();

        let set = MappingSet::empty()
            .with_mapping(first)
            .unwrap()
            .with_mapping(second)
            .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().mapped_terms, vec!["c"]);
    }

    #[test]
    fn serializes_in_camel_case() {
        let mapping = Mapping::from_lists("a", "b", Color::from("#111"), Color::from("#222"))
            .unwrap();
        let value = serde_json::to_value(MappingSet::new(vec![mapping])).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{
                "searchTerms": ["a"],
                "mappedTerms": ["b"],
                "searchColor": "#111",
                "mappedColor": "#222"
            }])
        );
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
    use multifind::mapping::{Color, Mapping, MappingSet};

    #[test]
    fn empty_search_list() {
        let result = Mapping::from_lists(" ; ", "b", Color::default_search(), Color::default_mapped());
        assert!(matches!(result, Err(HighlightError::InvalidInput(_))));
    }

    #[test]
    fn empty_mapped_list() {
        let result = Mapping::from_lists("a", "", Color::default_search(), Color::default_mapped());
        assert!(matches!(result, Err(HighlightError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_mapping() {
        let mapping = Mapping::from_lists("a;b", "c", Color::from("#111"), Color::from("#222"))
            .unwrap();
        let same_terms = Mapping::from_lists("a; b", "c", Color::from("#333"), Color::from("#444"))
            .unwrap();
        let set = MappingSet::new(vec![mapping]);

        assert!(set.contains_equivalent(&same_terms));
        assert!(set.with_mapping(same_terms).is_err());
    }
}
