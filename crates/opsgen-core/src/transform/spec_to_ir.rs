use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::*;
use crate::parse::SpecDocument;
use crate::parse::document::{get, get_bool, get_str, keys_of};
use crate::parse::ref_resolve::RefResolver;

use super::name_deriver::{NameRegistry, NameSource, VerbTable, derive_name, is_verb_noun};
use super::name_normalizer::module_name;
use super::parameters::{DEFAULT_MAX_QUERY_PARAMS, ExtractOptions, extract_parameters};

/// Options controlling naming and the shape of the generated module.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Module name; defaults to the sanitized spec title.
    pub module_name: Option<String>,
    /// Base URL; defaults to the URL declared by the spec.
    pub base_url: Option<String>,
    pub level: EnhancementLevel,
    /// operationId or derived name → custom callable name.
    pub aliases: IndexMap<String, String>,
    /// Extra keyword → verb entries for verb inference.
    pub verbs: IndexMap<String, String>,
    pub client: ClientOptions,
    pub max_query_params: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            module_name: None,
            base_url: None,
            level: EnhancementLevel::default(),
            aliases: IndexMap::new(),
            verbs: IndexMap::new(),
            client: ClientOptions::default(),
            max_query_params: DEFAULT_MAX_QUERY_PARAMS,
        }
    }
}

/// Transform a loaded spec into a module descriptor with default options.
pub fn transform(doc: &SpecDocument) -> ModuleDescriptor {
    transform_with_options(doc, &TransformOptions::default())
}

/// Transform with explicit options.
pub fn transform_with_options(doc: &SpecDocument, options: &TransformOptions) -> ModuleDescriptor {
    let verbs = VerbTable::with_overrides(&options.verbs);
    let resolver = RefResolver::new(doc.root());
    let extract_options = ExtractOptions {
        max_query_params: options.max_query_params,
    };

    // Phase 1: one descriptor per (path, method), named but not yet unique
    let mut functions = Vec::new();
    for (path, item) in doc.paths() {
        let item = match resolver.resolve(item) {
            Ok(item) => item,
            Err(e) => {
                log::warn!("{path}: skipping path item: {e}");
                continue;
            }
        };
        for key in keys_of(item) {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let Some(op) = get(item, key).filter(|op| op.is_object()) else {
                continue;
            };
            functions.push(build_function(
                method,
                path,
                op,
                item,
                &resolver,
                &verbs,
                &extract_options,
                &options.aliases,
            ));
        }
    }

    // Phase 2: collision suffixes, single pass in document order
    let mut registry = NameRegistry::new();
    for function in &mut functions {
        function.name = registry.claim(&function.name);
    }

    let info = IrInfo {
        title: doc.title().to_string(),
        description: doc.description().to_string(),
        version: doc.api_version(),
    };

    ModuleDescriptor {
        name: options
            .module_name
            .clone()
            .unwrap_or_else(|| module_name(&info.title)),
        info,
        base_url: options.base_url.clone().or_else(|| doc.base_url()),
        level: options.level,
        client: options.client.clone(),
        functions,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_function(
    method: HttpMethod,
    path: &str,
    op: &Value,
    path_item: &Value,
    resolver: &RefResolver<'_>,
    verbs: &VerbTable,
    extract_options: &ExtractOptions,
    aliases: &IndexMap<String, String>,
) -> FunctionDescriptor {
    let context = format!("{} {}", method.as_str(), path);
    let operation_id = non_empty(get_str(op, "operationId"));
    let summary = non_empty(get_str(op, "summary"));
    let description = non_empty(get_str(op, "description"));

    let derived = derive_name(
        &NameSource {
            method,
            path,
            operation_id,
            summary,
            description,
        },
        verbs,
    );
    let alias = operation_id
        .and_then(|id| aliases.get(id))
        .or_else(|| aliases.get(&derived));
    let name = match alias {
        Some(alias) if is_verb_noun(alias) => alias.clone(),
        Some(alias) => {
            log::warn!("{context}: ignoring alias {alias:?}, expected a Verb-Noun name; using {derived}");
            derived
        }
        None => derived,
    };

    let extracted = extract_parameters(op, path_item, resolver, extract_options, &context);

    let summary_text = summary
        .or_else(|| description.and_then(|d| d.lines().next()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Calls {context}."));
    let description_text = description
        .or(summary)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Sends a {} request to {path}.", method.as_str()));

    FunctionDescriptor {
        name,
        operation_id: operation_id.map(str::to_string),
        method,
        path: path.to_string(),
        parameters: extracted.parameters,
        summary: summary_text,
        description: description_text,
        has_body: extracted.has_body,
        body_required: extracted.body_required,
        deprecated: get_bool(op, "deprecated").unwrap_or(false),
        omitted_query_parameters: extracted.omitted_query,
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
