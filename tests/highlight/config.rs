//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;
    use std::time::Duration;

    use tempfile::tempdir;

    use multifind::highlight::config::{ConfigManager, EngineConfig};
    use multifind::ScanMode;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.scan_mode, ScanMode::Cursor);
        assert_eq!(config.min_idle_remaining(), Duration::from_millis(10));
        assert_eq!(config.full_pass_timeout(), Duration::from_millis(1000));
        assert_eq!(config.incremental_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn toml_file_fills_missing_fields_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multifind.toml");
        fs::write(&path, "chunk_size = 8\nscan_mode = \"gap-fill\"\n").unwrap();

        let config = ConfigManager::load_from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.scan_mode, ScanMode::GapFill);
        assert_eq!(config.default_search_color, "#fff34d");
    }

    #[test]
    fn json_file_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multifind.json");
        fs::write(&path, r#"{ "incremental_timeout_ms": 250 }"#).unwrap();

        let config = ConfigManager::load_from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(config.incremental_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn example_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("example.toml");
        let path = path.to_str().unwrap();

        ConfigManager::generate_example_config(path).unwrap();

        assert_eq!(
            ConfigManager::load_from_file(path).unwrap(),
            EngineConfig::default()
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
    use std::fs;

    use tempfile::tempdir;

    use multifind::highlight::config::{ConfigManager, EngineConfig};
    use multifind::highlight::HighlightError;

    #[test]
    fn zero_chunk_size() {
        let config = EngineConfig {
            chunk_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(HighlightError::ConfigError(_))));
    }

    #[test]
    fn timeout_out_of_range() {
        let zero = EngineConfig {
            full_pass_timeout_ms: 0,
            ..EngineConfig::default()
        };
        let huge = EngineConfig {
            incremental_timeout_ms: 600_000,
            ..EngineConfig::default()
        };

        assert!(zero.validate().is_err());
        assert!(huge.validate().is_err());
    }

    #[test]
    fn blank_default_color() {
        let config = EngineConfig {
            default_mapped_color: "  ".to_string(),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_scan_mode_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multifind.toml");
        fs::write(&path, "scan_mode = \"sideways\"\n").unwrap();

        let result = ConfigManager::load_from_file(path.to_str().unwrap());

        assert!(matches!(result, Err(HighlightError::ConfigError(_))));
    }

    #[test]
    fn missing_explicit_file() {
        let result = ConfigManager::new(Some("/definitely/not/here/multifind.toml"));
        assert!(matches!(result, Err(HighlightError::ConfigError(_))));
    }
}
