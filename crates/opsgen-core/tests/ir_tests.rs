use opsgen_core::ir::{HttpMethod, ParamType, ParameterLocation, StandardParam};
use opsgen_core::parse;
use opsgen_core::transform::{self, TransformOptions};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const SWAGGER2: &str = include_str!("fixtures/swagger2.json");
const EDGE_CASES: &str = include_str!("fixtures/edge-cases.yaml");

#[test]
fn transform_petstore() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);

    assert_eq!(module.name, "SwaggerPetstore");
    assert_eq!(module.info.title, "Swagger Petstore");
    assert_eq!(module.info.version, "1.0.0");
    assert_eq!(
        module.base_url.as_deref(),
        Some("https://api.petstore.example.com/v1")
    );
    assert_eq!(module.functions.len(), 14);
}

#[test]
fn petstore_function_names() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);
    let names = module
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!("petstore_function_names", names);
}

#[test]
fn petstore_list_parameters() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);
    let list = module
        .functions
        .iter()
        .find(|f| f.name == "Get-PetsList")
        .expect("should have Get-PetsList");

    assert_eq!(list.method, HttpMethod::Get);
    assert_eq!(list.summary, "List all pets");
    assert!(!list.has_body);
    let names: Vec<&str> = list.parameters.iter().map(|p| p.safe_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["limit", "page_token", "tags", "BaseUri", "AuthToken", "NoThrow"]
    );

    let limit = &list.parameters[0];
    assert_eq!(limit.param_type, ParamType::Integer);
    assert!(!limit.required);
    let constraints = limit.constraints.as_ref().expect("limit should be bounded");
    assert_eq!(constraints.minimum, Some(1.0));
    assert_eq!(constraints.maximum, Some(100.0));

    // parameter $ref whose schema is itself a $ref
    let token = &list.parameters[1];
    assert_eq!(token.param_type, ParamType::String);
    let constraints = token.constraints.as_ref().expect("token should be constrained");
    assert_eq!(constraints.pattern.as_deref(), Some("^[A-Za-z0-9]+$"));
    assert_eq!(constraints.max_length, Some(64));

    assert_eq!(list.parameters[2].param_type, ParamType::StringArray);
}

#[test]
fn petstore_path_item_parameters_and_bodies() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);
    let by_name = |name: &str| {
        module
            .functions
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("should have {name}"))
    };

    let show = by_name("Get-Pets");
    let pet_id = show.path_parameters().next().expect("petId from path item");
    assert_eq!(pet_id.original_name, "petId");
    assert!(pet_id.required);
    assert_eq!(pet_id.description, "The id of the pet");

    let replace = by_name("Set-Pets");
    assert!(replace.has_body);
    assert!(replace.body_required);
    assert!(replace.body_parameter().is_some());

    let upload = by_name("Import-Photos");
    assert!(upload.has_body);
    assert!(!upload.body_required);

    let remove = by_name("Remove-Pets");
    assert!(remove.deprecated);
    assert_eq!(remove.description, "Deletes a pet");

    let inventory = by_name("Get-InventoryList");
    assert_eq!(inventory.summary, "Returns a map of status codes to quantities.");
    assert!(inventory.description.contains("Requires an api_key."));

    let update = by_name("Update-Users");
    let fields = update.query_parameters().next().expect("fields[user]");
    assert_eq!(fields.safe_name, "fields_user");
    assert_eq!(fields.original_name, "fields[user]");
    assert_eq!(
        fields.constraints.as_ref().unwrap().enum_values,
        vec!["name", "email"]
    );

    let v2 = by_name("Get-Pets1");
    assert_eq!(v2.path, "/v2/pets/{petId}");
    assert_eq!(v2.parameters[0].param_type, ParamType::Integer);

    let health = by_name("Invoke-Health");
    assert_eq!(health.method, HttpMethod::Head);
    assert_eq!(health.summary, "Calls HEAD /health.");
}

#[test]
fn every_function_carries_standard_parameters() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let module = transform::transform(&spec);
    for f in &module.functions {
        for kind in [StandardParam::BaseUri, StandardParam::AuthToken, StandardParam::NoThrow] {
            assert!(
                f.standard_parameter(kind).is_some(),
                "{} is missing {}",
                f.name,
                kind.name()
            );
        }
        let path_params: Vec<_> = f.path_parameters().collect();
        assert!(path_params.iter().all(|p| p.required));
        assert!(
            path_params
                .windows(2)
                .all(|w| w[0].original_name <= w[1].original_name)
        );
    }
}

#[test]
fn transform_swagger2() {
    let spec = parse::from_json(SWAGGER2).unwrap();
    assert!(spec.version().is_swagger2());
    let module = transform::transform(&spec);

    assert_eq!(module.name, "LegacyInventory");
    assert_eq!(module.info.version, "v2");
    assert_eq!(
        module.base_url.as_deref(),
        Some("http://inventory.example.com/api")
    );

    let names: Vec<&str> = module.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Search-Items", "Add-Items", "Remove-Items", "Update-Items"]
    );

    let search = &module.functions[0];
    let query: Vec<&str> = search
        .query_parameters()
        .map(|p| p.safe_name.as_str())
        .collect();
    assert_eq!(query, vec!["page", "q"]);
    assert_eq!(search.parameters[0].param_type, ParamType::Integer);
    assert_eq!(
        search.parameters[1].constraints.as_ref().unwrap().min_length,
        Some(2)
    );

    let add = &module.functions[1];
    assert!(add.has_body);
    assert!(add.body_required);

    let remove = &module.functions[2];
    assert_eq!(remove.path_parameters().count(), 1);

    let update = &module.functions[3];
    assert!(update.has_body);
    assert!(!update.body_required);
}

#[test]
fn operation_parameters_override_path_item() {
    let spec = parse::from_yaml(EDGE_CASES).unwrap();
    let module = transform::transform(&spec);
    let reports = &module.functions[0];
    assert_eq!(reports.name, "Get-ReportsList");

    let limit = reports
        .parameters
        .iter()
        .find(|p| p.original_name == "limit")
        .expect("should keep limit");
    assert_eq!(limit.param_type, ParamType::String);
    assert!(limit.required);
    assert_eq!(
        limit.constraints.as_ref().unwrap().enum_values,
        vec!["small", "large"]
    );
}

#[test]
fn unresolvable_parameters_are_skipped() {
    let spec = parse::from_yaml(EDGE_CASES).unwrap();
    let module = transform::transform(&spec);
    let reports = &module.functions[0];

    // missing, self-referencing and external refs are dropped, header and
    // cookie parameters are not exposed, reserved names get a suffix and
    // the second `filter_a` is dropped.
    let names: Vec<&str> = reports
        .parameters
        .iter()
        .map(|p| p.safe_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Verbose_query",
            "body_query",
            "filter_a",
            "limit",
            "BaseUri",
            "AuthToken",
            "NoThrow"
        ]
    );
    assert_eq!(reports.parameters[2].original_name, "filter.a");
    assert!(
        reports
            .parameters
            .iter()
            .all(|p| p.location != ParameterLocation::Body)
    );
}

#[test]
fn duplicate_names_get_numeric_suffixes() {
    let spec = parse::from_yaml(EDGE_CASES).unwrap();
    let module = transform::transform(&spec);
    let names: Vec<&str> = module.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Get-ReportsList",
            "New-Users",
            "New-Users1",
            "New-Users2",
            "Remove-Jobs"
        ]
    );
    assert_eq!(module.info.version, "2024-01");
}

#[test]
fn query_parameters_are_capped() {
    let params: Vec<String> = (0..30)
        .map(|i| format!(r#"{{"name": "q{i:02}", "in": "query", "schema": {{"type": "string"}}}}"#))
        .collect();
    let json = format!(
        r#"{{"openapi": "3.0.0", "info": {{"title": "Wide", "version": "1"}},
            "paths": {{"/search": {{"get": {{"parameters": [{}]}}}}}}}}"#,
        params.join(",")
    );
    let spec = parse::from_json(&json).unwrap();

    let module = transform::transform(&spec);
    let search = &module.functions[0];
    assert_eq!(search.query_parameters().count(), 20);
    assert_eq!(search.query_parameters().last().unwrap().original_name, "q19");
    assert_eq!(search.omitted_query_parameters.len(), 10);
    assert_eq!(search.omitted_query_parameters[0], "q20");

    let options = TransformOptions {
        max_query_params: 5,
        ..TransformOptions::default()
    };
    let module = transform::transform_with_options(&spec, &options);
    assert_eq!(module.functions[0].query_parameters().count(), 5);
    assert_eq!(module.functions[0].omitted_query_parameters.len(), 25);
}

#[test]
fn custom_verbs_and_aliases() {
    let spec = parse::from_json(
        r#"{"openapi": "3.0.0", "paths": {
            "/jobs/{id}": {"post": {"operationId": "archiveJob"}},
            "/jobs": {"get": {"operationId": "listJobs"}}
        }}"#,
    )
    .unwrap();
    assert_eq!(transform::transform(&spec).functions[0].name, "New-Jobs");

    let mut options = TransformOptions::default();
    options
        .verbs
        .insert("archive".to_string(), "Remove".to_string());
    options
        .aliases
        .insert("Get-JobsList".to_string(), "Get-AllJobs".to_string());
    let module = transform::transform_with_options(&spec, &options);
    assert_eq!(module.functions[0].name, "Remove-Jobs");
    assert_eq!(module.functions[1].name, "Get-AllJobs");
}

#[test]
fn health_check_round_trip() {
    let spec = parse::from_json(
        r#"{"openapi": "3.0.0", "info": {"title": "Status", "version": "1.0.0"},
            "paths": {"/health": {"get": {"summary": "Health check"}}}}"#,
    )
    .unwrap();
    let module = transform::transform(&spec);
    assert_eq!(module.functions.len(), 1);

    let health = &module.functions[0];
    assert_eq!(health.name, "Get-HealthList");
    assert_eq!(health.path, "/health");
    assert_eq!(health.description, "Health check");
    let names: Vec<&str> = health.parameters.iter().map(|p| p.safe_name.as_str()).collect();
    assert_eq!(names, vec!["BaseUri", "AuthToken", "NoThrow"]);
    assert!(module.base_url.is_none());
}
