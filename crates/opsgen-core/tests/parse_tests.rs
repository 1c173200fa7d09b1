use std::fs;

use opsgen_core::error::LoadError;
use opsgen_core::parse::{self, SpecVersion};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const SWAGGER2: &str = include_str!("fixtures/swagger2.json");

#[test]
fn load_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petstore.yml");
    fs::write(&path, PETSTORE).unwrap();

    let spec = parse::load(&path).expect("should load petstore.yml");
    assert_eq!(spec.version(), &SpecVersion::OpenApi3("3.0.3".to_string()));
    assert_eq!(spec.title(), "Swagger Petstore");
    assert_eq!(spec.paths().count(), 9);
    assert_eq!(spec.source(), path.display().to_string());
}

#[test]
fn load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.JSON");
    fs::write(&path, SWAGGER2).unwrap();

    let spec = parse::load(&path).expect("should load inventory.JSON");
    assert!(spec.version().is_swagger2());
    assert_eq!(spec.version().as_str(), "2.0");
}

#[test]
fn paths_keep_document_order() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let paths: Vec<&str> = spec.paths().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths[0], "/pets");
    assert_eq!(paths[1], "/pets/{petId}");
    assert_eq!(paths[8], "/health");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");
    let err = parse::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn unknown_extension_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.txt");
    fs::write(&path, PETSTORE).unwrap();
    let err = parse::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("spec.txt"));
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"openapi\": ").unwrap();
    let err = parse::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Parse { format: "JSON", .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn non_object_root_is_invalid() {
    let err = parse::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, LoadError::InvalidSpec { .. }));
}

#[test]
fn yaml_integer_keys_are_stringified() {
    let spec = parse::from_yaml(
        r#"
openapi: 3.0.0
paths:
  /a:
    get:
      responses:
        200:
          description: ok
"#,
    )
    .unwrap();
    let responses = &spec.root()["paths"]["/a"]["get"]["responses"];
    assert!(responses.get("200").is_some());
}
