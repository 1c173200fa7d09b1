use minijinja::{Environment, context};
use opsgen_core::error::GeneratorError;
use opsgen_core::ir::ModuleDescriptor;
use serde::Serialize;

use super::{render, single_line};

const FALLBACK_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
struct ManifestView {
    root_module: String,
    version: String,
    guid: String,
    description: String,
}

/// Emit `<Module>.psd1`.
pub fn emit_manifest(
    env: &Environment<'_>,
    module: &ModuleDescriptor,
    exports: &[String],
) -> Result<String, GeneratorError> {
    let description = match module.info.description.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => single_line(line),
        None => format!("PowerShell client for {}", single_line(&module.info.title)),
    };
    let view = ManifestView {
        root_module: format!("{}.psm1", module.name),
        version: manifest_version(&module.info.version),
        guid: module_guid(&module.name),
        description,
    };
    render(
        env,
        "manifest.psd1.j2",
        context! { manifest => view, exports => exports },
    )
}

/// `ModuleVersion` accepts two to four numeric components; anything else
/// (`v1`, `2.0.0-beta`, `latest`) falls back to `1.0.0`.
pub fn manifest_version(version: &str) -> String {
    let parts: Vec<&str> = version.trim().split('.').collect();
    let numeric = (2..=4).contains(&parts.len())
        && parts.iter().all(|p| !p.is_empty() && p.parse::<u32>().is_ok());
    if numeric {
        version.trim().to_string()
    } else {
        FALLBACK_VERSION.to_string()
    }
}

/// A GUID derived from the module name, stable across runs and platforms.
pub fn module_guid(name: &str) -> String {
    let hi = fnv1a(name.as_bytes(), 0xcbf2_9ce4_8422_2325);
    let lo = fnv1a(name.as_bytes(), hi ^ 0x9e37_79b9_7f4a_7c15);
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        hi >> 32,
        (hi >> 16) & 0xffff,
        (hi & 0x0fff) | 0x5000,
        ((lo >> 48) & 0x3fff) | 0x8000,
        lo & 0xffff_ffff_ffff
    )
}

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    bytes.iter().fold(seed, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}
