use heck::ToPascalCase;

/// Turn a declared parameter name into a safe identifier.
///
/// - `filter[first_name][eq]` → `filter_first_name_eq`
/// - `page.size` → `page_size`
/// - `2fa-code` → `_2fa_code`
pub fn safe_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for ch in name.chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '_' };
        if ch == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        result.push(ch);
    }

    let trimmed = result.trim_matches('_');
    if trimmed.is_empty() {
        return "param".to_string();
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// PascalCase a path segment or title, keeping only ASCII letters and digits.
pub fn pascal_identifier(text: &str) -> String {
    text.to_pascal_case()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Module name derived from a spec title.
///
/// - `Swagger Petstore` → `SwaggerPetstore`
/// - `3D printing` → `Api3dPrinting`
pub fn module_name(title: &str) -> String {
    let name = pascal_identifier(title);
    if name.is_empty() {
        "GeneratedApi".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Api{name}")
    } else {
        name
    }
}

/// Whether a path segment is a `{placeholder}`.
pub fn is_placeholder(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}
