use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use treequill::config::Config;
use treequill::document::lineage::TypeLineage;
use treequill::document::parser::parse_yaml;
use treequill::file::loader::{load_shape_file, load_tree_file};
use treequill::file::saver::save_tree_file;

fn write_gzipped(path: &Path, content: &str) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_gzip_yaml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.yaml.gz");
    let tree = parse_yaml("items: [1, 2, 3]\nmeta: {owner: Ann}").unwrap();

    save_tree_file(&path, &tree, &Config::default()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    assert_eq!(load_tree_file(&path, &TypeLineage::default()).unwrap(), tree);
}

#[test]
fn test_gzip_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json.gz");
    let tree = parse_yaml("a: {b: [true, ~, 2.5]}").unwrap();

    save_tree_file(&path, &tree, &Config::default()).unwrap();
    assert_eq!(load_tree_file(&path, &TypeLineage::default()).unwrap(), tree);
}

#[test]
fn test_gzip_backup_keeps_compressed_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.yaml.gz");
    write_gzipped(&path, "version: 1\n");

    let config = Config {
        create_backup: true,
        ..Config::default()
    };
    save_tree_file(&path, &parse_yaml("version: 2").unwrap(), &config).unwrap();

    let backup = dir.path().join("data.yaml.gz.bak");
    let original = fs::read(&backup).unwrap();
    assert_eq!(&original[..2], &[0x1f, 0x8b]);
    assert_eq!(
        load_tree_file(&path, &TypeLineage::default()).unwrap(),
        parse_yaml("version: 2").unwrap()
    );
}

#[test]
fn test_gzip_shape_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shape.yaml.gz");
    write_gzipped(&path, "title: string\n");
    assert!(load_shape_file(&path).is_ok());
}
