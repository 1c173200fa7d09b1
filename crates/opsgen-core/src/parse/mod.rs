pub mod document;
pub mod ref_resolve;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
pub use document::{SpecDocument, SpecVersion};

/// Spec file formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SpecFormat::Yaml),
            "json" => Some(SpecFormat::Json),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SpecFormat::Yaml => "YAML",
            SpecFormat::Json => "JSON",
        }
    }
}

/// Load a spec file, dispatching on its extension.
pub fn load(path: &Path) -> Result<SpecDocument, LoadError> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(LoadError::NotFound(display));
    }
    let format = SpecFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat {
            path: display.clone(),
        })?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    log::debug!("loading {} spec from {}", format.label(), display);
    parse_str(&content, format, &display)
}

/// Parse an OpenAPI/Swagger spec from YAML text.
pub fn from_yaml(input: &str) -> Result<SpecDocument, LoadError> {
    parse_str(input, SpecFormat::Yaml, "<yaml>")
}

/// Parse an OpenAPI/Swagger spec from JSON text.
pub fn from_json(input: &str) -> Result<SpecDocument, LoadError> {
    parse_str(input, SpecFormat::Json, "<json>")
}

/// Parse text of a known format; `source` names the input in error messages.
pub fn parse_str(input: &str, format: SpecFormat, source: &str) -> Result<SpecDocument, LoadError> {
    let root = match format {
        SpecFormat::Json => serde_json::from_str::<Value>(input).map_err(|e| LoadError::Parse {
            path: source.to_string(),
            format: format.label(),
            message: e.to_string(),
        })?,
        SpecFormat::Yaml => yaml_tree(input, source)?,
    };
    validate(root, source)
}

#[cfg(feature = "yaml")]
fn yaml_tree(input: &str, source: &str) -> Result<Value, LoadError> {
    let yaml: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(input).map_err(|e| LoadError::Parse {
            path: source.to_string(),
            format: SpecFormat::Yaml.label(),
            message: e.to_string(),
        })?;
    Ok(yaml_to_json(yaml))
}

#[cfg(not(feature = "yaml"))]
fn yaml_tree(_input: &str, source: &str) -> Result<Value, LoadError> {
    Err(LoadError::MissingYamlSupport {
        path: source.to_string(),
    })
}

/// Convert a YAML tree into the JSON tree the rest of the crate works on.
/// Mapping keys are stringified, tags are dropped.
#[cfg(feature = "yaml")]
fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

#[cfg(feature = "yaml")]
fn yaml_key(key: serde_yaml_ng::Value) -> String {
    use serde_yaml_ng::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

fn validate(root: Value, source: &str) -> Result<SpecDocument, LoadError> {
    if !root.is_object() {
        return Err(LoadError::InvalidSpec {
            path: source.to_string(),
            reason: "document root is not an object".to_string(),
        });
    }
    let version = SpecVersion::detect(&root).ok_or_else(|| LoadError::InvalidSpec {
        path: source.to_string(),
        reason: "missing `openapi` or `swagger` version field".to_string(),
    })?;
    match document::get(&root, "paths") {
        Some(Value::Object(_)) => {}
        Some(_) => {
            return Err(LoadError::InvalidSpec {
                path: source.to_string(),
                reason: "`paths` is not an object".to_string(),
            });
        }
        None => {
            return Err(LoadError::InvalidSpec {
                path: source.to_string(),
                reason: "missing `paths` object".to_string(),
            });
        }
    }
    Ok(SpecDocument::new(root, version, source.to_string()))
}
