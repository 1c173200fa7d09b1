use serde::Serialize;

use super::operations::{HttpMethod, ParameterDescriptor};
use super::types::EnhancementLevel;

/// A function descriptor after the enhancement level has been applied: the
/// final parameter list plus how the request is built from it.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutableFunction {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    pub description: String,
    pub deprecated: bool,
    pub level: EnhancementLevel,
    pub parameters: Vec<ParameterDescriptor>,
    pub request: RequestPlan,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted_query_parameters: Vec<String>,
}

impl ExecutableFunction {
    pub fn parameter(&self, safe_name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.safe_name == safe_name)
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.safe_name.as_str()).collect()
    }
}

/// How the HTTP request is assembled.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPlan {
    /// `{placeholder}` in the path template and the parameter that fills it.
    pub path_bindings: Vec<Binding>,
    /// Query keys appended when the parameter was supplied by the caller.
    pub query_bindings: Vec<Binding>,
    /// Parameter holding the structured request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub timeout: bool,
    pub auth_header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryPolicy>,
}

/// Maps a wire name to a generated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub wire_name: String,
    pub parameter: String,
}

/// Bounded retry around the request, used when the caller picks `Retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// First backoff delay; doubled after every failed attempt.
    pub initial_delay_ms: u64,
}
