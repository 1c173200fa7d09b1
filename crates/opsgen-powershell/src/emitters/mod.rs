pub mod function;
pub mod manifest;
pub mod module;

use minijinja::Environment;
use opsgen_core::error::GeneratorError;

use crate::type_mapper::ps_quote;

/// Keep text from closing a `<# ... #>` help block early.
fn escape_help(value: String) -> String {
    value
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .replace("#>", "# >")
}

fn ps_quote_filter(value: String) -> String {
    ps_quote(&value)
}

/// Template environment shared by all PowerShell emitters.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("help", escape_help);
    env.add_filter("ps_quote", ps_quote_filter);
    env.add_template(
        "function.ps1.j2",
        include_str!("../../templates/function.ps1.j2"),
    )
    .expect("template should be valid");
    env.add_template("module.psm1.j2", include_str!("../../templates/module.psm1.j2"))
        .expect("template should be valid");
    env.add_template(
        "manifest.psd1.j2",
        include_str!("../../templates/manifest.psd1.j2"),
    )
    .expect("template should be valid");
    env
}

fn render(
    env: &Environment<'_>,
    name: &str,
    ctx: minijinja::Value,
) -> Result<String, GeneratorError> {
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(|e| GeneratorError::Template(format!("{name}: {e}")))
}

/// Collapse text onto one line for `#` comments and manifest fields.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
