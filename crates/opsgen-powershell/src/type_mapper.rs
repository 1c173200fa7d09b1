use opsgen_core::ir::{Constraints, ParamType, ParameterDescriptor};

/// Map a `ParamType` to its PowerShell type literal.
///
/// Arrays use the declared item type when one is known: `integer` items give
/// `[long[]]`, anything unrecognised falls back to `[string[]]`.
pub fn ps_type(param_type: ParamType, constraints: Option<&Constraints>) -> String {
    match param_type {
        ParamType::String => "[string]".to_string(),
        ParamType::Integer => "[long]".to_string(),
        ParamType::Float => "[double]".to_string(),
        ParamType::Boolean => "[bool]".to_string(),
        ParamType::StringArray => {
            let item = constraints.and_then(|c| c.item_type.as_deref());
            match item {
                Some("integer") => "[long[]]",
                Some("number") => "[double[]]",
                Some("boolean") => "[bool[]]",
                _ => "[string[]]",
            }
            .to_string()
        }
        ParamType::Object => "[object]".to_string(),
        ParamType::StringMap => "[hashtable]".to_string(),
        ParamType::Switch => "[switch]".to_string(),
    }
}

/// Quote a value as a PowerShell single-quoted string.
pub fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Attribute lines placed above a parameter declaration, outermost first.
pub fn attributes(param: &ParameterDescriptor) -> Vec<String> {
    let mut attrs = vec![if param.required {
        "[Parameter(Mandatory = $true)]".to_string()
    } else {
        "[Parameter()]".to_string()
    }];

    if param.required && matches!(param.param_type, ParamType::String) {
        attrs.push("[ValidateNotNullOrEmpty()]".to_string());
    }

    let Some(c) = param.constraints.as_ref() else {
        return attrs;
    };

    if !c.enum_values.is_empty() {
        let values: Vec<String> = c.enum_values.iter().map(|v| ps_quote(v)).collect();
        attrs.push(format!("[ValidateSet({})]", values.join(", ")));
    }

    if param.param_type == ParamType::String {
        if let Some(pattern) = &c.pattern {
            // ValidatePattern ignores case unless told otherwise
            attrs.push(format!(
                "[ValidatePattern({})]",
                ps_quote(&format!("(?-i){pattern}"))
            ));
        }
        if c.min_length.is_some() || c.max_length.is_some() {
            let min = c.min_length.unwrap_or(0);
            let max = c
                .max_length
                .map_or_else(|| "[int]::MaxValue".to_string(), |m| m.to_string());
            attrs.push(format!("[ValidateLength({min}, {max})]"));
        }
    }

    if let Some(range) = validate_range(param.param_type, c) {
        attrs.push(range);
    }

    attrs
}

fn validate_range(param_type: ParamType, c: &Constraints) -> Option<String> {
    let bound_type = match param_type {
        ParamType::Integer => "[long]",
        ParamType::Float => "[double]",
        _ => return None,
    };
    if c.minimum.is_none() && c.maximum.is_none() {
        return None;
    }
    let integer = param_type == ParamType::Integer;
    let min = match c.minimum {
        Some(v) if integer => format!("{}", v.ceil() as i64),
        Some(v) => format!("{v}"),
        None => format!("{bound_type}::MinValue"),
    };
    let max = match c.maximum {
        Some(v) if integer => format!("{}", v.floor() as i64),
        Some(v) => format!("{v}"),
        None => format!("{bound_type}::MaxValue"),
    };
    Some(format!("[ValidateRange({min}, {max})]"))
}
