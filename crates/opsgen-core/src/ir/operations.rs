use serde::Serialize;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Parse a path-item key. Keys are lowercase in OpenAPI documents.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Title-cased form, as PowerShell's `-Method` expects it.
    pub fn title(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
            HttpMethod::Head => "Head",
            HttpMethod::Options => "Options",
        }
    }
}

/// Synthetic parameters that are not declared by the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardParam {
    BaseUri,
    Headers,
    AuthToken,
    NoThrow,
    TimeoutSec,
    RetryMode,
}

impl StandardParam {
    pub fn name(&self) -> &'static str {
        match self {
            StandardParam::BaseUri => "BaseUri",
            StandardParam::Headers => "Headers",
            StandardParam::AuthToken => "AuthToken",
            StandardParam::NoThrow => "NoThrow",
            StandardParam::TimeoutSec => "TimeoutSec",
            StandardParam::RetryMode => "RetryMode",
        }
    }
}

/// Name of the synthetic request body parameter.
pub const BODY_PARAM_NAME: &str = "Body";

/// Where a parameter's value goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    Standard(StandardParam),
}

/// Semantic parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
    StringArray,
    /// Structured payload, serialized as JSON.
    Object,
    /// String-keyed map, used for extra request headers.
    StringMap,
    /// Presence flag.
    Switch,
}

/// Validation constraints carried over from the parameter schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Declared item type of an array parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self == &Constraints::default()
    }
}

/// One parameter of a generated callable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Name as declared in the spec (may contain `[`, `.`, ...).
    pub original_name: String,
    /// Sanitized identifier used in generated code.
    pub safe_name: String,
    pub location: ParameterLocation,
    pub param_type: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    pub description: String,
}

impl ParameterDescriptor {
    /// A synthetic, optional parameter.
    pub fn standard(kind: StandardParam, param_type: ParamType, description: &str) -> Self {
        Self {
            original_name: kind.name().to_string(),
            safe_name: kind.name().to_string(),
            location: ParameterLocation::Standard(kind),
            param_type,
            required: false,
            constraints: None,
            description: description.to_string(),
        }
    }

    pub fn is_standard(&self, kind: StandardParam) -> bool {
        self.location == ParameterLocation::Standard(kind)
    }
}

/// A fully resolved operation: one per (path, method) pair.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDescriptor {
    /// Callable name, unique within the module.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    pub method: HttpMethod,
    pub path: String,
    /// Path params (sorted), query params (sorted, capped), body, standard params.
    pub parameters: Vec<ParameterDescriptor>,
    pub summary: String,
    pub description: String,
    pub has_body: bool,
    pub body_required: bool,
    pub deprecated: bool,
    /// Query parameters dropped by the query cap, by original name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted_query_parameters: Vec<String>,
}

impl FunctionDescriptor {
    pub fn path_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.by_location(ParameterLocation::Path)
    }

    pub fn query_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.by_location(ParameterLocation::Query)
    }

    pub fn body_parameter(&self) -> Option<&ParameterDescriptor> {
        self.by_location(ParameterLocation::Body).next()
    }

    pub fn standard_parameter(&self, kind: StandardParam) -> Option<&ParameterDescriptor> {
        self.by_location(ParameterLocation::Standard(kind)).next()
    }

    fn by_location(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}
