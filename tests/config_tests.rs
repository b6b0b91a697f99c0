use tempfile::TempDir;
use treequill::config::{Config, OutputFormat};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert!(config.erase_unknown);
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert_eq!(config.indent_size, 2);
    assert!(!config.create_backup);
    assert!(config.lineage.is_empty());
}

#[test]
fn test_config_path() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/treequill/config.toml"));
    }
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: Config = toml::from_str("output_format = \"json\"").unwrap();

    assert_eq!(config.output_format, OutputFormat::Json);
    assert!(config.erase_unknown);
    assert_eq!(config.indent_size, 2);
}

#[test]
fn test_lineage_table() {
    let config: Config = toml::from_str(
        r#"
erase_unknown = false

[lineage]
Article = ["Node"]
Node = ["ContentEntityBase"]
"#,
    )
    .unwrap();

    assert!(!config.erase_unknown);
    assert_eq!(config.lineage.resolve("Article"), vec!["Node", "ContentEntityBase"]);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config {
        output_format: OutputFormat::Json,
        indent_size: 4,
        create_backup: true,
        ..Config::default()
    };
    config.lineage.declare("Article", ["Node"]);

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_or_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(Config::load_from(&missing), Config::default());

    let invalid = dir.path().join("invalid.toml");
    std::fs::write(&invalid, "indent_size = \"wide\"").unwrap();
    assert_eq!(Config::load_from(&invalid), Config::default());
}
