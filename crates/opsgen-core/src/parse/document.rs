use serde_json::{Map, Value};

/// Default title used when a spec has no `info.title`.
pub const DEFAULT_TITLE: &str = "Generated API";
/// Default version used when a spec has no `info.version`.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Look up `key` on an object node. Anything that is not an object has no keys.
pub fn get<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.as_object()?.get(key)
}

/// The keys of an object node in document order, or nothing for non-objects.
pub fn keys_of(node: &Value) -> Vec<&str> {
    node.as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

pub fn get_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    get(node, key).and_then(Value::as_str)
}

pub fn get_bool(node: &Value, key: &str) -> Option<bool> {
    get(node, key).and_then(Value::as_bool)
}

pub fn get_f64(node: &Value, key: &str) -> Option<f64> {
    get(node, key).and_then(Value::as_f64)
}

pub fn get_u64(node: &Value, key: &str) -> Option<u64> {
    get(node, key).and_then(Value::as_u64)
}

/// Render a scalar as text. YAML happily turns `openapi: 3.0` into a float.
fn scalar_to_string(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Which family of spec a document claims to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    Swagger2(String),
    OpenApi3(String),
}

impl SpecVersion {
    pub fn detect(root: &Value) -> Option<Self> {
        if let Some(v) = get(root, "openapi").and_then(scalar_to_string) {
            return Some(SpecVersion::OpenApi3(v));
        }
        get(root, "swagger")
            .and_then(scalar_to_string)
            .map(SpecVersion::Swagger2)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SpecVersion::Swagger2(v) | SpecVersion::OpenApi3(v) => v,
        }
    }

    pub fn is_swagger2(&self) -> bool {
        matches!(self, SpecVersion::Swagger2(_))
    }
}

/// A parsed OpenAPI/Swagger document. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    root: Value,
    version: SpecVersion,
    source: String,
}

impl SpecDocument {
    pub(crate) fn new(root: Value, version: SpecVersion, source: String) -> Self {
        Self {
            root,
            version,
            source,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn version(&self) -> &SpecVersion {
        &self.version
    }

    /// Where the document came from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path templates and their path items, in document order.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &Value)> {
        get(&self.root, "paths")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(Map::iter)
    }

    pub fn title(&self) -> &str {
        self.info_str("title").unwrap_or(DEFAULT_TITLE)
    }

    pub fn api_version(&self) -> String {
        get(&self.root, "info")
            .and_then(|info| get(info, "version"))
            .and_then(scalar_to_string)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    pub fn description(&self) -> &str {
        self.info_str("description").unwrap_or("")
    }

    fn info_str(&self, key: &str) -> Option<&str> {
        get(&self.root, "info")
            .and_then(|info| get_str(info, key))
            .filter(|s| !s.trim().is_empty())
    }

    /// The spec-derived base URL: `servers[0].url` for OpenAPI 3 (with server
    /// variables replaced by their defaults), `schemes[0]://host/basePath` for
    /// Swagger 2. Trailing slashes are trimmed.
    pub fn base_url(&self) -> Option<String> {
        let url = match self.version {
            SpecVersion::OpenApi3(_) => self.openapi3_server_url(),
            SpecVersion::Swagger2(_) => self.swagger2_base_url(),
        }?;
        let trimmed = url.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn openapi3_server_url(&self) -> Option<String> {
        let server = get(&self.root, "servers")?.as_array()?.first()?;
        let mut url = get_str(server, "url")?.to_string();
        if let Some(variables) = get(server, "variables") {
            for name in keys_of(variables) {
                let default = get(variables, name)
                    .and_then(|var| get(var, "default"))
                    .and_then(scalar_to_string);
                if let Some(default) = default {
                    url = url.replace(&format!("{{{name}}}"), &default);
                }
            }
        }
        Some(url)
    }

    fn swagger2_base_url(&self) -> Option<String> {
        let host = get_str(&self.root, "host")?;
        let scheme = get(&self.root, "schemes")
            .and_then(Value::as_array)
            .and_then(|schemes| schemes.first())
            .and_then(Value::as_str)
            .unwrap_or("https");
        let base_path = get_str(&self.root, "basePath").unwrap_or("");
        let base_path = if base_path.is_empty() || base_path.starts_with('/') {
            base_path.to_string()
        } else {
            format!("/{base_path}")
        };
        Some(format!("{scheme}://{host}{base_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(root: Value) -> SpecDocument {
        let version = SpecVersion::detect(&root).unwrap();
        SpecDocument::new(root, version, "test".to_string())
    }

    #[test]
    fn test_accessors_on_non_objects() {
        assert!(get(&json!([1, 2]), "a").is_none());
        assert!(keys_of(&json!("scalar")).is_empty());
        assert_eq!(keys_of(&json!({"b": 1, "a": 2})), vec!["b", "a"]);
    }

    #[test]
    fn test_numeric_version_marker() {
        let v = SpecVersion::detect(&json!({"openapi": 3.0})).unwrap();
        assert_eq!(v.as_str(), "3.0");
        let v = SpecVersion::detect(&json!({"swagger": "2.0"})).unwrap();
        assert!(v.is_swagger2());
        assert!(SpecVersion::detect(&json!({"info": {}})).is_none());
    }

    #[test]
    fn test_info_defaults() {
        let d = doc(json!({"openapi": "3.0.0", "paths": {}}));
        assert_eq!(d.title(), "Generated API");
        assert_eq!(d.api_version(), "1.0.0");
        assert_eq!(d.description(), "");
        assert_eq!(d.base_url(), None);
    }

    #[test]
    fn test_server_variables_substituted() {
        let d = doc(json!({
            "openapi": "3.0.0",
            "servers": [{
                "url": "https://{region}.example.com/v1/",
                "variables": {"region": {"default": "eu"}}
            }],
            "paths": {}
        }));
        assert_eq!(d.base_url().as_deref(), Some("https://eu.example.com/v1"));
    }

    #[test]
    fn test_swagger2_base_url() {
        let d = doc(json!({
            "swagger": "2.0",
            "host": "petstore.swagger.io",
            "basePath": "/v2",
            "schemes": ["http"],
            "paths": {}
        }));
        assert_eq!(d.base_url().as_deref(), Some("http://petstore.swagger.io/v2"));

        let d = doc(json!({"swagger": "2.0", "host": "api.example.com", "paths": {}}));
        assert_eq!(d.base_url().as_deref(), Some("https://api.example.com"));
    }
}
