use opsgen_core::CodeGenerator;
use opsgen_core::ir::EnhancementLevel;
use opsgen_core::parse;
use opsgen_core::transform::{self, TransformOptions};
use opsgen_powershell::{EmitOptions, PowerShellGenerator};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn generate(level: EnhancementLevel) -> Vec<opsgen_core::GeneratedFile> {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let options = TransformOptions {
        level,
        ..TransformOptions::default()
    };
    let module = transform::transform_with_options(&spec, &options);
    PowerShellGenerator
        .generate(&module, &EmitOptions::default())
        .expect("generation should succeed")
}

fn content<'a>(files: &'a [opsgen_core::GeneratedFile], path: &str) -> &'a str {
    &files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("should emit {path}"))
        .content
}

#[test]
fn petstore_single_module() {
    let files = generate(EnhancementLevel::Standard);
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["SwaggerPetstore.psm1", "SwaggerPetstore.psd1"]);

    let psm1 = content(&files, "SwaggerPetstore.psm1");
    assert!(psm1.starts_with("# SwaggerPetstore: PowerShell client for Swagger Petstore 1.0.0\n"));
    assert!(psm1.contains("function Get-PetsList {"));
    assert!(psm1.contains("function Get-Pets1 {"));
    assert!(psm1.contains("function Invoke-Health {"));
    assert!(psm1.contains("[string]$BaseUri = 'https://api.petstore.example.com/v1'"));
    assert!(psm1.contains("$uri = $BaseUri.TrimEnd('/') + \"/pets/$([uri]::EscapeDataString([string]$petId))\""));
    assert!(psm1.contains("Method      = 'Delete'"));
    assert!(psm1.contains("Write-Warning 'Remove-Pets is deprecated.'"));
    assert!(psm1.contains("This operation is deprecated."));
    assert!(psm1.contains("Enhancement level: Standard"));
    assert!(psm1.contains("$requestParams['TimeoutSec'] = $TimeoutSec"));
    // query and body wait for Advanced
    assert!(!psm1.contains("$query"));
    assert!(!psm1.contains("ConvertTo-Json"));
    assert!(psm1.ends_with(")\n"));

    let psd1 = content(&files, "SwaggerPetstore.psd1");
    assert!(psd1.contains("RootModule        = 'SwaggerPetstore.psm1'"));
    assert!(psd1.contains("ModuleVersion     = '1.0.0'"));
    assert!(psd1.contains("Description       = 'A sample API that uses a petstore as an example.'"));
    assert!(psd1.contains("        'Invoke-Health'\n    )"));
}

#[test]
fn advanced_module_sends_query_and_body() {
    let files = generate(EnhancementLevel::Advanced);
    let psm1 = content(&files, "SwaggerPetstore.psm1");
    assert!(psm1.contains("if ($PSBoundParameters.ContainsKey('limit')) {"));
    assert!(psm1.contains("[ValidateRange(1, 100)]"));
    assert!(psm1.contains("[ValidatePattern('(?-i)^[A-Za-z0-9]+$')]"));
    assert!(psm1.contains("[ValidateSet('name', 'email')]"));
    assert!(psm1.contains("[uri]::EscapeDataString('fields[user]')"));
    assert!(psm1.contains("[Parameter(Mandatory = $true)]\n        [object]$Body,"));
    assert!(psm1.contains("ConvertTo-Json -InputObject $Body -Depth 10"));
    assert!(!psm1.contains("Start-Sleep"));
}

#[test]
fn expert_module_retries() {
    let files = generate(EnhancementLevel::Expert);
    let psm1 = content(&files, "SwaggerPetstore.psm1");
    assert!(psm1.contains("[ValidateSet('Default', 'Ignore', 'Retry')]"));
    assert!(psm1.contains("Start-Sleep -Milliseconds $delayMs"));
    assert_eq!(psm1.matches("for ($attempt = 1;").count(), 14);
}

#[test]
fn large_modules_are_split() {
    let paths: Vec<String> = (0..51)
        .map(|i| format!(r#""/resource{i}": {{"get": {{}}}}"#))
        .collect();
    let json = format!(
        r#"{{"openapi": "3.0.0", "info": {{"title": "Big Api", "version": "2.0"}}, "paths": {{{}}}}}"#,
        paths.join(",")
    );
    let module = transform::transform(&parse::from_json(&json).unwrap());
    let files = PowerShellGenerator
        .generate(&module, &EmitOptions::default())
        .unwrap();

    assert_eq!(files.len(), 53);
    assert_eq!(files[0].path, "Public/Get-Resource0List.ps1");
    assert!(files[0].content.contains("function Get-Resource0List {"));
    assert!(files[0].content.ends_with("}\n"));

    let psm1 = content(&files, "BigApi.psm1");
    assert!(psm1.contains(". (Join-Path $PSScriptRoot \"Public/$name.ps1\")"));
    assert!(psm1.contains("    'Get-Resource50List'\n)"));
    assert!(!psm1.contains("function Get-Resource0List"));

    // no server declared: BaseUri is mandatory
    assert!(files[0].content.contains("[Parameter(Mandatory = $true)]\n        [ValidateNotNullOrEmpty()]\n        [string]$BaseUri,"));

    let psd1 = content(&files, "BigApi.psd1");
    assert!(psd1.contains("ModuleVersion     = '2.0'"));
    assert!(psd1.contains("Description       = 'PowerShell client for Big Api'"));
}

#[test]
fn split_threshold_is_configurable() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);
    let files = PowerShellGenerator
        .generate(&module, &EmitOptions { split_threshold: 10 })
        .unwrap();
    assert_eq!(
        files.iter().filter(|f| f.path.starts_with("Public/")).count(),
        14
    );
}
