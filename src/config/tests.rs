#[cfg(test)]
mod tests {
    use crate::config::model::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.ingest.chunk_size_lines, 100);
        assert_eq!(config.ingest.preview_rows, 5);
        assert!(!config.ingest.allow_extra_headers);
        assert!(!config.ingest.reject_invalid_rows);
        assert_eq!(config.defaults.year, "2025");
        assert_eq!(config.defaults.quota, "AI");
        assert_eq!(config.defaults.gender, "Gender-Neutral");
        assert_eq!(config.defaults.category, "OPEN");
        assert_eq!(config.defaults.round, "1");
        assert_eq!(config.logging.verbosity, "normal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.ingest.chunk_size_lines = 0;
        assert!(config.validate().is_err());

        config.ingest.chunk_size_lines = 250;
        config.ingest.preview_rows = 500;
        assert!(config.validate().is_err());

        config.ingest.preview_rows = 10;
        config.logging.verbosity = "chatty".to_string();
        assert!(config.validate().is_err());

        config.logging.verbosity = "verbose".to_string();
        config.defaults.round = "  ".to_string();
        assert!(config.validate().is_err());

        config.defaults.round = "1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "ingest": { "chunk_size_lines": 25 }, "defaults": { "year": "2024" } }"#,
        )
        .unwrap();

        assert_eq!(config.ingest.chunk_size_lines, 25);
        assert_eq!(config.ingest.preview_rows, 5);
        assert_eq!(config.defaults.year, "2024");
        assert_eq!(config.defaults.quota, "AI");
        assert_eq!(config.io.snapshot_path, "data/snapshot.json");
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "ingest": { "chunk_size_lines": 0 } }"#).unwrap();

        assert!(Config::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_or_default_without_file() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load_or_default(temp_dir.path().join("missing.json"))
            .await
            .unwrap();

        assert_eq!(config.ingest.chunk_size_lines, 100);
    }
}
