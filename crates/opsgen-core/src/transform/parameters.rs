use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::name_normalizer::safe_name;
use crate::ir::{
    BODY_PARAM_NAME, Constraints, ParamType, ParameterDescriptor, ParameterLocation,
    StandardParam,
};
use crate::parse::document::{get, get_bool, get_f64, get_str, get_u64};
use crate::parse::ref_resolve::RefResolver;

static NULL: Value = Value::Null;

/// Default number of query parameters exposed per callable.
pub const DEFAULT_MAX_QUERY_PARAMS: usize = 20;

/// Identifiers every generated callable already uses: the synthetic
/// parameters, PowerShell common parameters and their aliases, automatic
/// variables and the locals of the generated function body.
/// Compared case-insensitively.
const RESERVED_NAMES: &[&str] = &[
    "baseuri",
    "headers",
    "authtoken",
    "nothrow",
    "timeoutsec",
    "retrymode",
    "body",
    "verbose",
    "debug",
    "erroraction",
    "warningaction",
    "informationaction",
    "progressaction",
    "errorvariable",
    "warningvariable",
    "informationvariable",
    "outvariable",
    "outbuffer",
    "pipelinevariable",
    "vb",
    "db",
    "ea",
    "wa",
    "infa",
    "proga",
    "ev",
    "wv",
    "iv",
    "ov",
    "ob",
    "pv",
    "args",
    "input",
    "host",
    "error",
    "this",
    "true",
    "false",
    "null",
    "psitem",
    "uri",
    "query",
    "value",
    "key",
    "requestheaders",
    "requestparams",
    "attempt",
    "attempts",
    "delayms",
];

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub max_query_params: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_query_params: DEFAULT_MAX_QUERY_PARAMS,
        }
    }
}

/// The parameter set of one operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractedParameters {
    pub parameters: Vec<ParameterDescriptor>,
    pub omitted_query: Vec<String>,
    pub has_body: bool,
    pub body_required: bool,
}

/// Collect, resolve, type and name the parameters of `operation`.
///
/// Path-item parameters come first; an operation parameter with the same
/// name and location replaces the path-item one. `context` names the
/// operation in diagnostics.
pub fn extract_parameters(
    operation: &Value,
    path_item: &Value,
    resolver: &RefResolver<'_>,
    options: &ExtractOptions,
    context: &str,
) -> ExtractedParameters {
    let mut declared: IndexMap<(String, Bucket), ParameterDescriptor> = IndexMap::new();
    let mut has_body = false;
    let mut body_required = false;

    let entries = [get(path_item, "parameters"), get(operation, "parameters")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .flatten();

    for entry in entries {
        let param = match resolver.resolve(entry) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{context}: skipping parameter: {e}");
                continue;
            }
        };
        let Some(name) = get_str(param, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let bucket = match get_str(param, "in") {
            Some("path") => Bucket::Path,
            Some("query") => Bucket::Query,
            // Swagger 2 request bodies
            Some("body") | Some("formData") => {
                has_body = true;
                body_required |= get_bool(param, "required").unwrap_or(false);
                continue;
            }
            other => {
                log::debug!(
                    "{context}: dropping parameter {name} (in: {})",
                    other.unwrap_or("<missing>")
                );
                continue;
            }
        };
        let descriptor = build_descriptor(name, param, bucket, resolver, context);
        declared.insert((name.to_string(), bucket), descriptor);
    }

    let (mut path_params, mut query_params): (Vec<_>, Vec<_>) = declared
        .into_values()
        .partition(|p| p.location == ParameterLocation::Path);

    path_params.sort_by(|a, b| a.original_name.cmp(&b.original_name));
    query_params.sort_by(|a, b| a.original_name.cmp(&b.original_name));

    // Names are settled before the cap so it counts exposed parameters.
    let mut ordered = path_params;
    ordered.extend(query_params);
    let (path_params, mut query_params): (Vec<_>, Vec<_>) = make_names_unique(ordered, context)
        .into_iter()
        .partition(|p| p.location == ParameterLocation::Path);

    let omitted_query: Vec<String> = if query_params.len() > options.max_query_params {
        query_params
            .split_off(options.max_query_params)
            .into_iter()
            .map(|p| p.original_name)
            .collect()
    } else {
        Vec::new()
    };
    if !omitted_query.is_empty() {
        log::warn!(
            "{context}: exposing {} of {} query parameters; omitted: {}",
            options.max_query_params,
            options.max_query_params + omitted_query.len(),
            omitted_query.join(", ")
        );
    }

    let mut parameters = path_params;
    parameters.extend(query_params);

    if let Some(request_body) = get(operation, "requestBody") {
        has_body = true;
        match resolver.resolve(request_body) {
            Ok(rb) => body_required |= get_bool(rb, "required").unwrap_or(false),
            Err(e) => log::warn!("{context}: request body: {e}"),
        }
    }

    if has_body {
        parameters.push(ParameterDescriptor {
            original_name: "body".to_string(),
            safe_name: BODY_PARAM_NAME.to_string(),
            location: ParameterLocation::Body,
            param_type: ParamType::Object,
            required: false,
            constraints: None,
            description: "Request body, serialized as JSON.".to_string(),
        });
    }

    parameters.extend(standard_parameters());

    ExtractedParameters {
        parameters,
        omitted_query,
        has_body,
        body_required,
    }
}

/// The synthetic parameters every operation carries, in fixed order.
pub fn standard_parameters() -> [ParameterDescriptor; 3] {
    [
        ParameterDescriptor::standard(
            StandardParam::BaseUri,
            ParamType::String,
            "Base URL of the API. Overrides the URL from the spec.",
        ),
        ParameterDescriptor::standard(
            StandardParam::AuthToken,
            ParamType::String,
            "Authentication token sent with the request.",
        ),
        ParameterDescriptor::standard(
            StandardParam::NoThrow,
            ParamType::Switch,
            "Return $null instead of throwing when the request fails.",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Bucket {
    Path,
    Query,
}

fn build_descriptor(
    name: &str,
    param: &Value,
    bucket: Bucket,
    resolver: &RefResolver<'_>,
    context: &str,
) -> ParameterDescriptor {
    // OpenAPI 3 keeps type info under `schema`; Swagger 2 puts it on the
    // parameter itself.
    let schema = match get(param, "schema") {
        Some(s) => resolver.resolve(s).unwrap_or_else(|e| {
            log::warn!("{context}: parameter {name}: {e}; treating as string");
            &NULL
        }),
        None => param,
    };

    let description = get_str(param, "description")
        .or_else(|| get_str(schema, "description"))
        .unwrap_or("")
        .trim()
        .to_string();

    let (location, required) = match bucket {
        Bucket::Path => (ParameterLocation::Path, true),
        Bucket::Query => (
            ParameterLocation::Query,
            get_bool(param, "required").unwrap_or(false),
        ),
    };

    let constraints = extract_constraints(schema, resolver);

    ParameterDescriptor {
        original_name: name.to_string(),
        safe_name: safe_name(name),
        location,
        param_type: map_schema_type(schema),
        required,
        constraints: (!constraints.is_empty()).then_some(constraints),
        description,
    }
}

/// The primary `type` of a schema; OpenAPI 3.1 allows `["string", "null"]`.
fn schema_type(schema: &Value) -> Option<&str> {
    match get(schema, "type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => types.iter().filter_map(Value::as_str).find(|t| *t != "null"),
        _ => None,
    }
}

pub fn map_schema_type(schema: &Value) -> ParamType {
    match schema_type(schema) {
        Some("integer") => ParamType::Integer,
        Some("number") => ParamType::Float,
        Some("boolean") => ParamType::Boolean,
        Some("array") => ParamType::StringArray,
        _ => ParamType::String,
    }
}

fn extract_constraints(schema: &Value, resolver: &RefResolver<'_>) -> Constraints {
    let enum_values = get(schema, "enum")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(enum_value_text).collect())
        .unwrap_or_default();

    let item_type = get(schema, "items")
        .and_then(|items| resolver.resolve(items).ok())
        .and_then(schema_type)
        .map(str::to_string);

    Constraints {
        enum_values,
        pattern: get_str(schema, "pattern").map(str::to_string),
        min_length: get_u64(schema, "minLength"),
        max_length: get_u64(schema, "maxLength"),
        minimum: get_f64(schema, "minimum"),
        maximum: get_f64(schema, "maximum"),
        item_type,
    }
}

fn enum_value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Enforce unique safe names. A name that clashes with a reserved identifier
/// gets its location appended; later duplicates are dropped.
fn make_names_unique(params: Vec<ParameterDescriptor>, context: &str) -> Vec<ParameterDescriptor> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(params.len());

    for mut param in params {
        if RESERVED_NAMES.contains(&param.safe_name.to_lowercase().as_str()) {
            let suffix = match param.location {
                ParameterLocation::Path => "path",
                _ => "query",
            };
            param.safe_name = format!("{}_{suffix}", param.safe_name);
        }
        if seen.insert(param.safe_name.to_lowercase()) {
            result.push(param);
        } else {
            log::warn!(
                "{context}: dropping parameter {} (name {} already in use)",
                param.original_name,
                param.safe_name
            );
        }
    }

    result
}
