use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::operations::FunctionDescriptor;

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct IrInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

/// How much generated functionality each callable receives. Each level is a
/// strict superset of the one before it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementLevel {
    /// Base URL, headers, auth token; one request, errors surface as-is.
    Basic,
    /// Basic + request timeout.
    #[default]
    Standard,
    /// Standard + request body and typed query parameters.
    Advanced,
    /// Advanced + retry mode and retry loop.
    Expert,
}

impl EnhancementLevel {
    pub const ALL: [EnhancementLevel; 4] = [
        EnhancementLevel::Basic,
        EnhancementLevel::Standard,
        EnhancementLevel::Advanced,
        EnhancementLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnhancementLevel::Basic => "Basic",
            EnhancementLevel::Standard => "Standard",
            EnhancementLevel::Advanced => "Advanced",
            EnhancementLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for EnhancementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnhancementLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnhancementLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown enhancement level '{s}' (expected Basic, Standard, Advanced or Expert)")
            })
    }
}

/// Runtime behaviour shared by every generated callable.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOptions {
    /// Header the auth-token parameter is sent in.
    pub auth_header: String,
    /// Attempts made by the Expert-tier retry loop.
    pub retry_attempts: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auth_header: "X-API-Key".to_string(),
            retry_attempts: 3,
        }
    }
}

/// Root object handed to an emitter.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDescriptor {
    /// Module display name, sanitized.
    pub name: String,
    pub info: IrInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub level: EnhancementLevel,
    pub client: ClientOptions,
    pub functions: Vec<FunctionDescriptor>,
}
