mod input;

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use dialoguer::{Input, Select};

use opsgen_core::config::{self, CONFIG_FILE_NAME, OpsgenConfig};
use opsgen_core::ir::{EnhancementLevel, ModuleDescriptor};
use opsgen_core::parse::{self, SpecDocument};
use opsgen_core::transform::{self, name_normalizer};
use opsgen_core::{CodeGenerator, GeneratedFile};
use opsgen_powershell::{EmitOptions, PowerShellGenerator};

#[derive(Parser)]
#[command(
    name = "opsgen",
    about = "Generate PowerShell modules from OpenAPI 2.0/3.x specs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PowerShell module from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Module name (defaults to the spec title)
        #[arg(short = 'n', long)]
        module_name: Option<String>,

        /// Base URL baked into the generated functions
        #[arg(short, long)]
        base_url: Option<String>,

        /// Enhancement level
        #[arg(short, long, value_parser = level_parser())]
        level: Option<EnhancementLevel>,

        /// Never prompt; fall back to defaults for missing values
        #[arg(long)]
        non_interactive: bool,
    },

    /// Validate an OpenAPI spec
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the module model derived from an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Enhancement level to compose functions at
        #[arg(short, long, value_parser = level_parser())]
        level: Option<EnhancementLevel>,
    },

    /// Initialize a new opsgen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

/// Accepts the lowercase level names and lists them in `--help`.
fn level_parser() -> impl TypedValueParser<Value = EnhancementLevel> {
    PossibleValuesParser::new(["basic", "standard", "advanced", "expert"])
        .try_map(|s| s.parse::<EnhancementLevel>())
}

/// Flags given to `generate`, before config and prompts fill the gaps.
struct GenerateArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    module_name: Option<String>,
    base_url: Option<String>,
    level: Option<EnhancementLevel>,
    non_interactive: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            module_name,
            base_url,
            level,
            non_interactive,
        } => cmd_generate(GenerateArgs {
            input,
            output,
            module_name,
            base_url,
            level,
            non_interactive,
        }),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            level,
        } => cmd_inspect(input, format, level),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "opsgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OpsgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let loaded = config::load_config(&config_path)?;
    if loaded.is_some() {
        log::debug!("loaded {}", config_path.display());
    }
    Ok(loaded)
}

fn load_spec(path: &Path) -> Result<SpecDocument> {
    parse::load(path).with_context(|| format!("failed to load spec {}", path.display()))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn prompt_text(prompt: &str, default: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    match default {
        Some(default) => input = input.default(default),
        None => input = input.allow_empty(true),
    }
    input
        .interact_text()
        .with_context(|| format!("failed to read {}", prompt.to_lowercase()))
}

fn prompt_level() -> Result<EnhancementLevel> {
    let labels: Vec<&str> = EnhancementLevel::ALL.iter().map(|l| l.as_str()).collect();
    let default_idx = EnhancementLevel::ALL
        .iter()
        .position(|l| *l == EnhancementLevel::default())
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Enhancement level")
        .items(&labels)
        .default(default_idx)
        .interact()
        .context("failed to select enhancement level")?;
    Ok(EnhancementLevel::ALL[selection])
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let file_cfg = try_load_config()?;
    let interactive = !args.non_interactive && std::io::stdin().is_terminal();
    let cfg = file_cfg.clone().unwrap_or_default();

    let spec_path = match args.input.or_else(|| cfg.input.as_ref().map(PathBuf::from)) {
        Some(path) => path,
        None if interactive => PathBuf::from(prompt_text("Path to the OpenAPI spec", None)?),
        None => anyhow::bail!(
            "no spec file given: pass --input or set `input` in {CONFIG_FILE_NAME}"
        ),
    };
    if spec_path.as_os_str().is_empty() {
        anyhow::bail!("no spec file given");
    }
    let spec = load_spec(&spec_path)?;

    let ask = interactive && file_cfg.is_none();

    let output = match args.output {
        Some(output) => output,
        None if ask => PathBuf::from(prompt_text("Output directory", Some(cfg.output.clone()))?),
        None => PathBuf::from(&cfg.output),
    };

    let module_name = match args.module_name.or_else(|| cfg.module_name.clone()) {
        Some(name) => Some(name),
        None if ask => Some(prompt_text(
            "Module name",
            Some(name_normalizer::module_name(spec.title())),
        )?),
        None => None,
    };
    if let Some(name) = &module_name {
        input::validate_module_name(name)?;
    }

    let base_url = match args.base_url.or_else(|| cfg.base_url.clone()) {
        Some(url) => Some(url),
        None if ask => Some(prompt_text("Base URL (empty to require -BaseUri)", spec.base_url())?)
            .filter(|url| !url.trim().is_empty()),
        None => None,
    };
    let base_url = base_url
        .map(|url| input::validate_base_uri(&url))
        .transpose()?;

    let level = match args.level {
        Some(level) => level,
        None if ask => prompt_level()?,
        None => cfg.level,
    };

    let mut options = cfg.transform_options();
    options.module_name = module_name;
    options.base_url = base_url;
    options.level = level;

    let module = transform::transform_with_options(&spec, &options);
    if module.functions.is_empty() {
        log::warn!("{} declares no operations", spec_path.display());
    }

    eprintln!(
        "Generating {} ({} functions, {} level) → {}",
        module.name,
        module.functions.len(),
        module.level,
        output.display()
    );
    let files = PowerShellGenerator.generate(&module, &EmitOptions::default())?;

    fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;
    write_files(&output, &files)?;

    eprintln!("Generated {} files in {}", files.len(), output.display());
    eprintln!("Import with: Import-Module {}", output.join(format!("{}.psd1", module.name)).display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = load_spec(&input)?;

    eprintln!(
        "Valid {} {} spec: {}",
        if spec.version().is_swagger2() { "Swagger" } else { "OpenAPI" },
        spec.version().as_str(),
        spec.title()
    );
    eprintln!("  Version: {}", spec.api_version());
    eprintln!("  Paths: {}", spec.paths().count());
    match spec.base_url() {
        Some(url) => eprintln!("  Base URL: {url}"),
        None => eprintln!("  Base URL: none (generated functions will require -BaseUri)"),
    }

    // Also validate that it transforms into functions
    let module = transform::transform(&spec);
    let parameters: usize = module.functions.iter().map(|f| f.parameters.len()).sum();
    let capped = module
        .functions
        .iter()
        .filter(|f| !f.omitted_query_parameters.is_empty())
        .count();
    eprintln!("  Functions: {}", module.functions.len());
    eprintln!("  Parameters: {parameters}");
    if capped > 0 {
        eprintln!("  Functions with capped query parameters: {capped}");
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat, level: Option<EnhancementLevel>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let spec = load_spec(&input)?;

    let mut options = cfg.transform_options();
    if let Some(level) = level {
        options.level = level;
    }
    let module = transform::transform_with_options(&spec, &options);
    let summary = build_inspect_summary(&module);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(module: &ModuleDescriptor) -> serde_json::Value {
    serde_json::json!({
        "name": module.name,
        "info": module.info,
        "base_url": module.base_url,
        "level": module.level,
        "client": module.client,
        "functions": module.executable_functions(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
