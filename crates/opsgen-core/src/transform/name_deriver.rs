use std::collections::HashSet;

use heck::{ToPascalCase, ToSnakeCase};
use indexmap::IndexMap;

use super::name_normalizer::{is_placeholder, pascal_identifier};
use crate::ir::HttpMethod;

/// Keyword → verb entries every table starts from. Keywords are lowercase
/// single words; verbs follow PowerShell's approved verb list.
const BUILTIN_VERBS: &[(&str, &str)] = &[
    // create
    ("create", "New"),
    ("generate", "New"),
    ("allocate", "New"),
    ("provision", "New"),
    ("new", "New"),
    ("make", "New"),
    // read
    ("get", "Get"),
    ("fetch", "Get"),
    ("retrieve", "Get"),
    ("list", "Get"),
    ("read", "Get"),
    ("show", "Get"),
    ("describe", "Get"),
    ("lookup", "Get"),
    ("find", "Find"),
    ("search", "Search"),
    ("query", "Search"),
    // update
    ("update", "Update"),
    ("modify", "Update"),
    ("patch", "Update"),
    ("edit", "Update"),
    ("change", "Update"),
    ("set", "Set"),
    ("put", "Set"),
    ("replace", "Set"),
    ("assign", "Set"),
    ("configure", "Set"),
    // delete
    ("delete", "Remove"),
    ("remove", "Remove"),
    ("destroy", "Remove"),
    ("purge", "Remove"),
    ("drop", "Remove"),
    ("clear", "Clear"),
    // lifecycle
    ("start", "Start"),
    ("launch", "Start"),
    ("begin", "Start"),
    ("stop", "Stop"),
    ("halt", "Stop"),
    ("terminate", "Stop"),
    ("cancel", "Stop"),
    ("restart", "Restart"),
    ("reboot", "Restart"),
    ("suspend", "Suspend"),
    ("pause", "Suspend"),
    ("resume", "Resume"),
    ("enable", "Enable"),
    ("activate", "Enable"),
    ("disable", "Disable"),
    ("deactivate", "Disable"),
    ("reset", "Reset"),
    ("lock", "Lock"),
    ("unlock", "Unlock"),
    ("approve", "Approve"),
    ("deny", "Deny"),
    ("reject", "Deny"),
    ("register", "Register"),
    ("subscribe", "Register"),
    ("unregister", "Unregister"),
    ("unsubscribe", "Unregister"),
    ("grant", "Grant"),
    ("revoke", "Revoke"),
    ("publish", "Publish"),
    ("unpublish", "Unpublish"),
    ("deploy", "Deploy"),
    ("submit", "Submit"),
    ("wait", "Wait"),
    // comparison and validation
    ("compare", "Compare"),
    ("diff", "Compare"),
    ("test", "Test"),
    ("validate", "Test"),
    ("verify", "Test"),
    ("check", "Test"),
    ("ping", "Test"),
    // data movement
    ("add", "Add"),
    ("append", "Add"),
    ("attach", "Add"),
    ("copy", "Copy"),
    ("clone", "Copy"),
    ("duplicate", "Copy"),
    ("move", "Move"),
    ("transfer", "Move"),
    ("rename", "Rename"),
    ("merge", "Merge"),
    ("split", "Split"),
    ("join", "Join"),
    ("import", "Import"),
    ("upload", "Import"),
    ("export", "Export"),
    ("download", "Export"),
    ("send", "Send"),
    ("notify", "Send"),
    ("sync", "Sync"),
    ("synchronize", "Sync"),
    ("convert", "Convert"),
    ("format", "Format"),
    // generic
    ("invoke", "Invoke"),
    ("execute", "Invoke"),
    ("run", "Invoke"),
    ("call", "Invoke"),
    ("trigger", "Invoke"),
    ("process", "Invoke"),
];

/// Leading operationId tokens that qualify the verb rather than being one
/// (`batchDeleteUsers`, `bulkCreate`, `asyncExport`).
const MODIFIER_TOKENS: &[&str] = &["batch", "bulk", "async", "try"];

/// Immutable keyword → verb map, built once per run and shared by reference.
#[derive(Debug, Clone)]
pub struct VerbTable {
    entries: IndexMap<String, String>,
}

impl Default for VerbTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_VERBS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl VerbTable {
    /// The built-in table extended (or overridden) by user entries.
    pub fn with_overrides(extra: &IndexMap<String, String>) -> Self {
        let mut table = Self::default();
        for (keyword, verb) in extra {
            let verb = verb.to_pascal_case();
            if keyword.trim().is_empty() || verb.is_empty() {
                continue;
            }
            table.entries.insert(keyword.trim().to_lowercase(), verb);
        }
        table
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries
            .get(word.to_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the deriver looks at for one operation.
#[derive(Debug, Clone, Copy)]
pub struct NameSource<'a> {
    pub method: HttpMethod,
    pub path: &'a str,
    pub operation_id: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Derive a `Verb-Noun` callable name. Not yet unique: see [`NameRegistry`].
///
/// - `GET /pets` → `Get-PetsList`
/// - `GET /pets/{id}` → `Get-Pets`
/// - `POST /pets` → `New-Pets`
/// - `DELETE /pets/{id}` → `Remove-Pets`
/// - `POST /pets` with operationId `registerPet` → `Register-Pets`
pub fn derive_name(source: &NameSource<'_>, table: &VerbTable) -> String {
    let verb = derive_verb(source, table);
    let (mut noun, ends_with_param) = derive_noun(source.path);
    if verb == "Get" && !ends_with_param {
        noun.push_str("List");
    }
    format!("{verb}-{noun}")
}

/// Verb precedence: operationId first token, then summary/description words,
/// then the HTTP method.
pub fn derive_verb(source: &NameSource<'_>, table: &VerbTable) -> String {
    if let Some(verb) = source
        .operation_id
        .and_then(|id| verb_from_operation_id(id, table))
    {
        return verb.to_string();
    }

    let text = [source.summary, source.description]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(verb) = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .find_map(|w| table.lookup(w))
    {
        return verb.to_string();
    }

    method_verb(source.method).to_string()
}

fn verb_from_operation_id<'t>(operation_id: &str, table: &'t VerbTable) -> Option<&'t str> {
    let snake = operation_id.to_snake_case();
    let tokens: Vec<&str> = snake.split('_').filter(|t| !t.is_empty()).collect();
    let first = tokens.first()?;
    if let Some(verb) = table.lookup(first) {
        return Some(verb);
    }
    if MODIFIER_TOKENS.contains(first) {
        return tokens.get(1).and_then(|t| table.lookup(t));
    }
    None
}

pub fn method_verb(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Get",
        HttpMethod::Post => "New",
        HttpMethod::Put => "Set",
        HttpMethod::Patch => "Update",
        HttpMethod::Delete => "Remove",
        HttpMethod::Head | HttpMethod::Options => "Invoke",
    }
}

/// The resource noun (last literal path segment, PascalCased) and whether the
/// path ends in a `{placeholder}`.
pub fn derive_noun(path: &str) -> (String, bool) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let ends_with_param = segments.last().is_some_and(|s| is_placeholder(s));

    let noun = segments
        .iter()
        .rev()
        .filter(|s| !is_placeholder(s))
        .map(|s| pascal_identifier(s))
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "Resource".to_string());

    (noun, ends_with_param)
}

/// Whether `name` has the `Verb-Noun` shape of a PowerShell command name:
/// `[A-Za-z][A-Za-z0-9]*-[A-Za-z0-9]+`.
pub fn is_verb_noun(name: &str) -> bool {
    let Some((verb, noun)) = name.split_once('-') else {
        return false;
    };
    verb.starts_with(|c: char| c.is_ascii_alphabetic())
        && verb.chars().all(|c| c.is_ascii_alphanumeric())
        && !noun.is_empty()
        && noun.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Hands out unique callable names in first-seen order: `Name`, `Name1`,
/// `Name2`, ... Comparison ignores case since PowerShell command names do.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_lowercase()) {
            return base.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{base}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                log::debug!("name collision on {base}, using {candidate}");
                return candidate;
            }
            suffix += 1;
        }
    }
}
