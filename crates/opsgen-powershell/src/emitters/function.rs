use minijinja::{Environment, context};
use opsgen_core::error::GeneratorError;
use opsgen_core::ir::{
    Binding, ExecutableFunction, ParamType, ParameterDescriptor, ParameterLocation, RetryPolicy,
    StandardParam,
};
use serde::Serialize;

use super::render;
use crate::type_mapper::{attributes, ps_quote, ps_type};

#[derive(Debug, Serialize)]
struct FunctionView {
    name: String,
    synopsis: String,
    description: String,
    parameters: Vec<ParamView>,
    example: String,
    notes: Vec<String>,
    deprecated: bool,
    uri_expr: String,
    query: Vec<QueryView>,
    method: &'static str,
    body: Option<String>,
    timeout: bool,
    auth_header: String,
    retry: Option<RetryPolicy>,
}

#[derive(Debug, Serialize)]
struct ParamView {
    name: String,
    help: String,
    attributes: Vec<String>,
    declaration: String,
}

#[derive(Debug, Serialize)]
struct QueryView {
    parameter: String,
    key: String,
    boolean: bool,
}

/// Render one advanced function. `base_url` becomes the default of `-BaseUri`.
pub fn emit_function(
    env: &Environment<'_>,
    function: &ExecutableFunction,
    base_url: Option<&str>,
) -> Result<String, GeneratorError> {
    let view = build_view(function, base_url);
    render(env, "function.ps1.j2", context! { f => view })
}

fn build_view(function: &ExecutableFunction, base_url: Option<&str>) -> FunctionView {
    let parameters = function
        .parameters
        .iter()
        .map(|p| ParamView {
            name: p.safe_name.clone(),
            help: parameter_help(p),
            attributes: attributes(p),
            declaration: declaration(p, base_url),
        })
        .collect();

    let query = function
        .request
        .query_bindings
        .iter()
        .map(|b| QueryView {
            parameter: b.parameter.clone(),
            key: ps_quote(&b.wire_name),
            boolean: function
                .parameter(&b.parameter)
                .is_some_and(|p| p.param_type == ParamType::Boolean),
        })
        .collect();

    FunctionView {
        name: function.name.clone(),
        synopsis: function.summary.clone(),
        description: function.description.clone(),
        parameters,
        example: example(function, base_url),
        notes: notes(function),
        deprecated: function.deprecated,
        uri_expr: uri_expression(&function.path, &function.request.path_bindings),
        query,
        method: function.method.title(),
        body: function.request.body.clone(),
        timeout: function.request.timeout,
        auth_header: ps_quote(&function.request.auth_header),
        retry: function.request.retry,
    }
}

fn parameter_help(param: &ParameterDescriptor) -> String {
    let mut help = if param.description.is_empty() {
        match param.location {
            ParameterLocation::Path => format!("Value for the {{{}}} path segment.", param.original_name),
            ParameterLocation::Query => format!("Value of the '{}' query parameter.", param.original_name),
            _ => String::new(),
        }
    } else {
        param.description.clone()
    };
    if param.original_name != param.safe_name && !matches!(param.location, ParameterLocation::Standard(_)) {
        help.push_str(&format!(" Sent as '{}'.", param.original_name));
    }
    help
}

fn declaration(param: &ParameterDescriptor, base_url: Option<&str>) -> String {
    let mut decl = format!(
        "{}${}",
        ps_type(param.param_type, param.constraints.as_ref()),
        param.safe_name
    );
    let default = match param.location {
        ParameterLocation::Standard(StandardParam::BaseUri) => base_url.map(ps_quote),
        ParameterLocation::Standard(StandardParam::RetryMode) => Some(ps_quote("Default")),
        _ => None,
    };
    if let Some(default) = default {
        decl.push_str(" = ");
        decl.push_str(&default);
    }
    decl
}

fn example(function: &ExecutableFunction, base_url: Option<&str>) -> String {
    let mut line = function.name.clone();
    for p in function.parameters.iter().filter(|p| p.required) {
        let value = match p.location {
            ParameterLocation::Standard(StandardParam::BaseUri) => {
                base_url.unwrap_or("https://api.example.com").to_string()
            }
            _ => format!("<{}>", p.safe_name),
        };
        line.push_str(&format!(" -{} {}", p.safe_name, value));
    }
    line
}

fn notes(function: &ExecutableFunction) -> Vec<String> {
    let mut notes = Vec::new();
    if function.deprecated {
        notes.push("This operation is deprecated.".to_string());
    }
    notes.push(format!("{} {}", function.method.as_str(), function.path));
    notes.push(format!("Enhancement level: {}", function.level));
    if !function.omitted_query_parameters.is_empty() {
        notes.push(format!(
            "Query parameters not exposed by this function: {}",
            function.omitted_query_parameters.join(", ")
        ));
    }
    notes
}

/// Build the double-quoted PowerShell string for a path template, with each
/// bound `{placeholder}` replaced by its escaped parameter value.
///
/// - `/pets/{petId}` → `"/pets/$([uri]::EscapeDataString([string]$petId))"`
pub fn uri_expression(path: &str, bindings: &[Binding]) -> String {
    let mut out = String::from("\"");
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        out.push_str(&escape_double_quoted(&rest[..start]));
        match bindings.iter().find(|b| b.wire_name == name) {
            Some(b) => out.push_str(&format!(
                "$([uri]::EscapeDataString([string]${}))",
                b.parameter
            )),
            None => out.push_str(&escape_double_quoted(&rest[start..=start + len])),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(&escape_double_quoted(rest));
    out.push('"');
    out
}

fn escape_double_quoted(text: &str) -> String {
    text.replace('`', "``")
        .replace('$', "`$")
        .replace('"', "`\"")
}
