use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::ir::{ClientOptions, EnhancementLevel};
use crate::transform::TransformOptions;
use crate::transform::parameters::DEFAULT_MAX_QUERY_PARAMS;

/// Top-level project configuration loaded from `.opsgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpsgenConfig {
    pub input: Option<String>,
    pub output: String,
    pub module_name: Option<String>,
    pub base_url: Option<String>,
    pub level: EnhancementLevel,
    pub naming: NamingConfig,
    pub client: ClientConfig,
}

impl Default for OpsgenConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: "out".to_string(),
            module_name: None,
            base_url: None,
            level: EnhancementLevel::default(),
            naming: NamingConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

/// Naming overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Map from operationId or derived callable name to a custom name.
    pub aliases: IndexMap<String, String>,
    /// Extra keyword → verb entries consulted during verb inference.
    pub verbs: IndexMap<String, String>,
}

/// Runtime options baked into every generated function.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub auth_header: String,
    pub max_query_params: usize,
    pub retry_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let client = ClientOptions::default();
        Self {
            auth_header: client.auth_header,
            max_query_params: DEFAULT_MAX_QUERY_PARAMS,
            retry_attempts: client.retry_attempts,
        }
    }
}

impl OpsgenConfig {
    /// Transform options described by this config.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            module_name: self.module_name.clone(),
            base_url: self.base_url.clone(),
            level: self.level,
            aliases: self.naming.aliases.clone(),
            verbs: self.naming.verbs.clone(),
            client: ClientOptions {
                auth_header: self.client.auth_header.clone(),
                retry_attempts: self.client.retry_attempts,
            },
            max_query_params: self.client.max_query_params,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".opsgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OpsgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content, path).map(Some)
}

#[cfg(feature = "yaml")]
fn parse_config(content: &str, path: &Path) -> Result<OpsgenConfig, ConfigError> {
    serde_yaml_ng::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(not(feature = "yaml"))]
fn parse_config(_content: &str, path: &Path) -> Result<OpsgenConfig, ConfigError> {
    Err(ConfigError::MissingYamlSupport {
        path: path.display().to_string(),
    })
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# opsgen configuration
input: openapi.yaml
output: out
# module_name: PetStore          # defaults to the sanitized spec title
# base_url: https://api.example.com
level: standard                  # basic | standard | advanced | expert

naming:
  aliases: {}
    # createChatCompletion: Send-ChatCompletion   # operationId or derived name -> custom name
  verbs: {}
    # archive: Remove                             # extra keyword -> verb entries

client:
  auth_header: X-API-Key
  max_query_params: 20
  retry_attempts: 3
"#
}
