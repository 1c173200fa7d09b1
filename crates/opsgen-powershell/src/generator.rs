use opsgen_core::error::GeneratorError;
use opsgen_core::ir::ModuleDescriptor;
use opsgen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

/// Above this many functions each one gets its own `Public/<Name>.ps1`.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 50;

/// Layout options for the emitted module.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub split_threshold: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
        }
    }
}

/// PowerShell script module generator.
pub struct PowerShellGenerator;

impl CodeGenerator for PowerShellGenerator {
    type Config = EmitOptions;

    fn generate(
        &self,
        module: &ModuleDescriptor,
        config: &EmitOptions,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment();
        let functions = module.executable_functions();
        let exports: Vec<String> = functions.iter().map(|f| f.name.clone()).collect();
        let rendered = functions
            .iter()
            .map(|f| emitters::function::emit_function(&env, f, module.base_url.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut files = Vec::new();
        if functions.len() <= config.split_threshold {
            files.push(GeneratedFile {
                path: format!("{}.psm1", module.name),
                content: with_newline(emitters::module::emit_module(
                    &env,
                    module,
                    &exports,
                    Some(&rendered),
                )?),
            });
        } else {
            log::debug!(
                "{} functions exceed the split threshold of {}; writing Public/*.ps1",
                functions.len(),
                config.split_threshold
            );
            for (name, content) in exports.iter().zip(&rendered) {
                files.push(GeneratedFile {
                    path: format!("Public/{name}.ps1"),
                    content: format!("# Generated by opsgen. Part of module {}.\n\n{content}\n", module.name),
                });
            }
            files.push(GeneratedFile {
                path: format!("{}.psm1", module.name),
                content: with_newline(emitters::module::emit_module(&env, module, &exports, None)?),
            });
        }

        files.push(GeneratedFile {
            path: format!("{}.psd1", module.name),
            content: with_newline(emitters::manifest::emit_manifest(&env, module, &exports)?),
        });

        Ok(files)
    }
}

fn with_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}
