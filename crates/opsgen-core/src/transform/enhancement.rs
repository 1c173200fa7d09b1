use crate::ir::{
    Binding, ClientOptions, Constraints, EnhancementLevel, ExecutableFunction,
    FunctionDescriptor, ModuleDescriptor, ParamType, ParameterDescriptor, ParameterLocation,
    RequestPlan, RetryPolicy, StandardParam,
};

/// Values accepted by the Expert-tier `RetryMode` parameter.
pub const RETRY_MODES: [&str; 3] = ["Default", "Ignore", "Retry"];

/// First delay of the retry backoff; doubled after each failed attempt.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Apply an enhancement level to a function descriptor.
///
/// Parameters, in order: path parameters, then (Advanced and up) query
/// parameters and the body, then the synthetic parameters `BaseUri`,
/// `Headers`, `AuthToken`, `TimeoutSec` (Standard and up), `NoThrow` and
/// `RetryMode` (Expert).
pub fn compose(
    function: &FunctionDescriptor,
    level: EnhancementLevel,
    base_url: Option<&str>,
    client: &ClientOptions,
) -> ExecutableFunction {
    let advanced = level >= EnhancementLevel::Advanced;
    let mut parameters: Vec<ParameterDescriptor> = function.path_parameters().cloned().collect();

    if advanced {
        parameters.extend(function.query_parameters().cloned());
        if let Some(body) = function.body_parameter() {
            let mut body = body.clone();
            body.required = function.body_required;
            parameters.push(body);
        }
    }

    let mut base_uri = function
        .standard_parameter(StandardParam::BaseUri)
        .cloned()
        .unwrap_or_else(|| {
            ParameterDescriptor::standard(StandardParam::BaseUri, ParamType::String, "Base URL of the API.")
        });
    base_uri.required = base_url.is_none();
    parameters.push(base_uri);

    parameters.push(ParameterDescriptor::standard(
        StandardParam::Headers,
        ParamType::StringMap,
        "Additional request headers.",
    ));

    if let Some(token) = function.standard_parameter(StandardParam::AuthToken) {
        let mut token = token.clone();
        token.description = format!(
            "Authentication token, sent in the {} header.",
            client.auth_header
        );
        parameters.push(token);
    }

    if level >= EnhancementLevel::Standard {
        parameters.push(ParameterDescriptor::standard(
            StandardParam::TimeoutSec,
            ParamType::Integer,
            "Request timeout in seconds.",
        ));
    }

    if let Some(no_throw) = function.standard_parameter(StandardParam::NoThrow) {
        parameters.push(no_throw.clone());
    }

    if level == EnhancementLevel::Expert {
        let mut retry = ParameterDescriptor::standard(
            StandardParam::RetryMode,
            ParamType::String,
            "Failure handling: Default rethrows, Ignore returns $null, Retry retries the request.",
        );
        retry.constraints = Some(Constraints {
            enum_values: RETRY_MODES.iter().map(|m| m.to_string()).collect(),
            ..Constraints::default()
        });
        parameters.push(retry);
    }

    let request = RequestPlan {
        path_bindings: function.path_parameters().map(binding).collect(),
        query_bindings: if advanced {
            function.query_parameters().map(binding).collect()
        } else {
            Vec::new()
        },
        body: parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
            .map(|p| p.safe_name.clone()),
        timeout: level >= EnhancementLevel::Standard,
        auth_header: client.auth_header.clone(),
        retry: (level == EnhancementLevel::Expert).then(|| RetryPolicy {
            attempts: client.retry_attempts.max(1),
            initial_delay_ms: RETRY_INITIAL_DELAY_MS,
        }),
    };

    ExecutableFunction {
        name: function.name.clone(),
        method: function.method,
        path: function.path.clone(),
        summary: function.summary.clone(),
        description: function.description.clone(),
        deprecated: function.deprecated,
        level,
        parameters,
        request,
        omitted_query_parameters: if advanced {
            function.omitted_query_parameters.clone()
        } else {
            Vec::new()
        },
    }
}

fn binding(param: &ParameterDescriptor) -> Binding {
    Binding {
        wire_name: param.original_name.clone(),
        parameter: param.safe_name.clone(),
    }
}

impl ModuleDescriptor {
    /// Every function composed at the module's enhancement level.
    pub fn executable_functions(&self) -> Vec<ExecutableFunction> {
        self.functions
            .iter()
            .map(|f| compose(f, self.level, self.base_url.as_deref(), &self.client))
            .collect()
    }
}
