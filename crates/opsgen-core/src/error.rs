use thiserror::Error;

/// Fatal errors raised while loading a spec file. Any of these aborts the run
/// before output is written.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("spec file not found: {0}")]
    NotFound(String),

    #[error("unsupported spec format for {path}: expected .yaml, .yml or .json")]
    UnsupportedFormat { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as {format}: {message}")]
    Parse {
        path: String,
        format: &'static str,
        message: String,
    },

    #[error("invalid spec {path}: {reason}")]
    InvalidSpec { path: String, reason: String },

    #[error(
        "cannot read YAML spec {path}: YAML support is not available. \
         Rebuild opsgen with the `yaml` feature enabled or supply the spec as JSON instead"
    )]
    MissingYamlSupport { path: String },
}

/// A `$ref` that could not be followed. Recoverable: callers log and skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unresolved reference: {0}")]
    Unresolved(String),

    #[error("external reference not supported: {0}")]
    External(String),

    #[error("reference depth limit exceeded while following: {0}")]
    DepthExceeded(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("cannot read config {path}: YAML support is not available")]
    MissingYamlSupport { path: String },
}

/// Errors surfaced by code generators.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(String),

    #[error("generation failed: {0}")]
    Other(String),
}
