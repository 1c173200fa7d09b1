pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// A generated file with path (relative to the output directory) and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a module descriptor.
pub trait CodeGenerator {
    type Config;
    fn generate(
        &self,
        module: &ir::ModuleDescriptor,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, error::GeneratorError>;
}
