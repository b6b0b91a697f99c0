use std::fs;
use tempfile::TempDir;
use treequill::config::{Config, OutputFormat};
use treequill::document::lineage::TypeLineage;
use treequill::document::node::TreeValue;
use treequill::document::parser::parse_yaml;
use treequill::document::tree::DataTree;
use treequill::file::loader::{load_shape_file, load_text_file, load_tree_file};
use treequill::file::saver::{save_tree_file, serialize_tree};
use treequill::shape::check_full_requirements;

#[test]
fn test_load_yaml_and_json_agree() {
    let dir = TempDir::new().unwrap();
    let yaml_path = dir.path().join("data.yaml");
    let json_path = dir.path().join("data.json");
    fs::write(&yaml_path, "name: Ann\ntags: [a, b]\nscore: 1.5\n").unwrap();
    fs::write(&json_path, r#"{"name": "Ann", "tags": ["a", "b"], "score": 1.5}"#).unwrap();

    let lineage = TypeLineage::default();
    assert_eq!(
        load_tree_file(&yaml_path, &lineage).unwrap(),
        load_tree_file(&json_path, &lineage).unwrap()
    );
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = load_tree_file(dir.path().join("nope.yaml"), &TypeLineage::default());
    assert!(result.is_err());
}

#[test]
fn test_set_and_save_as_json() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.yaml");
    let target = dir.path().join("out.json");
    fs::write(&source, "user:\n  name: Ann\n").unwrap();

    let mut data = DataTree::new(load_tree_file(&source, &TypeLineage::default()).unwrap());
    data.set("user.roles", TreeValue::Array(vec![])).unwrap();
    data.set("user.roles.0", "admin".into()).unwrap();

    let config = Config {
        indent_size: 2,
        ..Config::default()
    };
    save_tree_file(&target, data.value(), &config).unwrap();

    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(
        written,
        "{\n  \"user\": {\n    \"name\": \"Ann\",\n    \"roles\": [\n      \"admin\"\n    ]\n  }\n}\n"
    );
}

#[test]
fn test_yaml_output_round_trips() {
    let tree = parse_yaml("a: 1\nb: [x, {c: ~}]\nd: 'two words'\n").unwrap();
    let yaml = serialize_tree(&tree, OutputFormat::Yaml, 2).unwrap();
    assert_eq!(parse_yaml(&yaml).unwrap(), tree);
}

#[test]
fn test_shape_file_checks_loaded_tree() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("data.yaml");
    let shape_path = dir.path().join("shape.yaml");
    fs::write(&data_path, "email: ann@example.com\n").unwrap();
    fs::write(&shape_path, "- phone: string\n- email: string\n").unwrap();

    let data = load_tree_file(&data_path, &TypeLineage::default()).unwrap();
    let definition = load_shape_file(&shape_path).unwrap();
    assert!(check_full_requirements(&definition, &data).result);
}

#[test]
fn test_load_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.txt");
    fs::write(&path, "Hi {{name}}\n").unwrap();
    assert_eq!(load_text_file(&path).unwrap(), "Hi {{name}}\n");
}
