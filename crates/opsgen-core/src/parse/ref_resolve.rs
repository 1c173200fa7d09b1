use serde_json::Value;

use super::document::get_str;
use crate::error::ResolveError;

/// Maximum number of pointer segments plus chained references followed before
/// a reference is treated as unresolvable.
pub const MAX_REF_DEPTH: usize = 32;

/// Follows local `$ref` pointers (`#/components/schemas/Pet`,
/// `#/definitions/Pet`, `#/components/parameters/limit`, ...) inside one
/// document. Chained references are followed; the total descent is bounded by
/// [`MAX_REF_DEPTH`] so a self-referencing ref cannot loop forever.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a Value,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Resolve `node`. A node that is not a reference object is returned as-is.
    pub fn resolve<'n>(&self, node: &'n Value) -> Result<&'n Value, ResolveError>
    where
        'a: 'n,
    {
        let mut current = node;
        let mut budget = MAX_REF_DEPTH;
        while let Some(ref_path) = ref_target(current) {
            current = self.lookup(ref_path, &mut budget)?;
        }
        Ok(current)
    }

    /// Resolve a pointer string directly.
    pub fn lookup_ref(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        let mut budget = MAX_REF_DEPTH;
        let target = self.lookup(ref_path, &mut budget)?;
        let mut current = target;
        while let Some(next) = ref_target(current) {
            current = self.lookup(next, &mut budget)?;
        }
        Ok(current)
    }

    fn lookup(&self, ref_path: &str, budget: &mut usize) -> Result<&'a Value, ResolveError> {
        let Some(pointer) = ref_path.strip_prefix('#') else {
            return Err(ResolveError::External(ref_path.to_string()));
        };

        let mut node = self.root;
        // "#/a/b" splits into ["", "a", "b"]; the empty head comes from the '#'.
        for segment in pointer.split('/').skip(1) {
            if *budget == 0 {
                return Err(ResolveError::DepthExceeded(ref_path.to_string()));
            }
            *budget -= 1;

            let key = unescape_segment(segment);
            node = match node {
                Value::Object(map) => map.get(key.as_str()),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(|| ResolveError::Unresolved(ref_path.to_string()))?;
        }

        if *budget == 0 {
            return Err(ResolveError::DepthExceeded(ref_path.to_string()));
        }
        *budget -= 1;
        Ok(node)
    }
}

/// The `$ref` string of a reference object, if `node` is one.
pub fn ref_target(node: &Value) -> Option<&str> {
    get_str(node, "$ref")
}

/// Decode JSON-pointer escapes: `~1` is `/`, `~0` is `~`.
fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
