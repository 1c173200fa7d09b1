use thiserror::Error;
use url::Url;

/// Rejected command-line or prompt input. Checked before anything is generated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error(
        "invalid module name '{0}': must start with a letter and contain only letters, digits, '.', '_' or '-'"
    )]
    InvalidModuleName(String),

    #[error("invalid base URI '{uri}': {reason}")]
    InvalidBaseUri { uri: String, reason: String },
}

/// Module names must match `[A-Za-z][A-Za-z0-9._-]*`.
pub fn validate_module_name(name: &str) -> Result<(), InputError> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(InputError::InvalidModuleName(name.to_string()))
    }
}

/// Parse an absolute `http`/`https` URL. Returns it with trailing slashes trimmed.
pub fn validate_base_uri(uri: &str) -> Result<String, InputError> {
    let invalid = |reason: String| InputError::InvalidBaseUri {
        uri: uri.to_string(),
        reason,
    };
    let parsed = Url::parse(uri.trim()).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("scheme '{other}' is not http or https"))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(uri.trim().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names() {
        assert!(validate_module_name("PetStore").is_ok());
        assert!(validate_module_name("Pet.Store_v2-beta").is_ok());
        assert_eq!(
            validate_module_name("2Pets"),
            Err(InputError::InvalidModuleName("2Pets".to_string()))
        );
        assert!(validate_module_name("").is_err());
        assert!(validate_module_name("Pet Store").is_err());
        assert!(validate_module_name("Pets/../x").is_err());
    }

    #[test]
    fn test_base_uris() {
        assert_eq!(
            validate_base_uri("https://api.example.com/v1/").unwrap(),
            "https://api.example.com/v1"
        );
        assert_eq!(
            validate_base_uri("http://localhost:8080").unwrap(),
            "http://localhost:8080"
        );
        assert!(validate_base_uri("ftp://files.example.com").is_err());
        assert!(validate_base_uri("api.example.com").is_err());
        assert!(validate_base_uri("not a url").is_err());
    }

    #[test]
    fn test_error_message_names_input() {
        let err = validate_base_uri("ftp://x").unwrap_err();
        assert!(err.to_string().contains("ftp://x"));
        assert!(err.to_string().contains("scheme 'ftp'"));
    }
}
