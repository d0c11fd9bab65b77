use std::fs;
use std::path::PathBuf;

use clap::Parser;
use plugin_modelgen::{ArtifactKind, CliArgs, GeneratorConfig, MarkerPolicy, ReportFormat};

#[test]
fn merges_config_file_and_cli_overrides() {
    let project = tempfile::tempdir().expect("project tempdir");
    let config_dir = tempfile::tempdir().expect("config tempdir");
    let config_path = config_dir.path().join("modelgen.yaml");
    let yaml = format!(
        "root: {}\nsource_dir: plugin/src\nmodel: models/params.toml\nmarkers: strict\nbackup: true\n",
        project.path().display()
    );
    fs::write(&config_path, yaml).expect("write config");

    let args = CliArgs::parse_from([
        "plugin-modelgen",
        "--config",
        config_path.to_str().unwrap(),
        "--resource-dir",
        "plugin/resource",
        "--markers",
        "lenient",
        "--report",
        "json",
    ]);
    let config = GeneratorConfig::from_args(args).expect("config");

    assert_eq!(config.root, project.path().to_path_buf());
    assert_eq!(config.source_dir, PathBuf::from("plugin/src"));
    assert_eq!(config.resource_dir, PathBuf::from("plugin/resource"));
    assert_eq!(config.marker_policy, MarkerPolicy::Lenient);
    assert_eq!(
        config.model,
        Some(project.path().join("models/params.toml"))
    );
    assert!(config.backup);
    assert!(config.validate_model);
    assert!(!config.check);
    assert_eq!(config.report, Some(ReportFormat::Json));
}

#[test]
fn toml_config_file_is_accepted() {
    let project = tempfile::tempdir().expect("project tempdir");
    let config_path = project.path().join("modelgen.toml");
    fs::write(
        &config_path,
        format!(
            "root = {:?}\nskip_validation = true\nmarkers = \"strict\"\n",
            project.path().display().to_string()
        ),
    )
    .expect("write config");

    let args = CliArgs {
        config: Some(config_path),
        ..CliArgs::default()
    };
    let config = GeneratorConfig::from_args(args).expect("config");

    assert_eq!(config.root, project.path().to_path_buf());
    assert!(!config.validate_model);
    assert_eq!(config.marker_policy, MarkerPolicy::Strict);
    assert_eq!(config.model, None);
}

#[test]
fn defaults_without_any_input() {
    let config = GeneratorConfig::from_args(CliArgs::default()).expect("config");

    assert_eq!(config.root, PathBuf::from("."));
    assert_eq!(config.marker_policy, MarkerPolicy::Lenient);
    assert!(config.validate_model);
    assert!(!config.backup);
    assert_eq!(
        config.artifact_path(ArtifactKind::ParamIds),
        PathBuf::from("./src/paramids.h")
    );
}

#[test]
fn artifact_paths_follow_directories() {
    let config = GeneratorConfig {
        root: PathBuf::from("/work/plugin"),
        resource_dir: PathBuf::from("/shared/resource"),
        ..GeneratorConfig::default()
    };

    assert_eq!(
        config.artifact_path(ArtifactKind::Header),
        PathBuf::from("/work/plugin/src/vst.h")
    );
    assert_eq!(
        config.artifact_path(ArtifactKind::Controller),
        PathBuf::from("/work/plugin/src/ui/controller.cpp")
    );
    assert_eq!(
        config.artifact_path(ArtifactKind::UiDescriptor),
        PathBuf::from("/shared/resource/plugin.uidesc")
    );
}

#[test]
fn absolute_model_path_is_kept() {
    let project = tempfile::tempdir().expect("project tempdir");
    let model = project.path().join("params.yaml");
    let args = CliArgs {
        root: Some(PathBuf::from("/elsewhere")),
        model: Some(model.clone()),
        ..CliArgs::default()
    };

    let config = GeneratorConfig::from_args(args).expect("config");
    assert_eq!(config.model, Some(model));
}

#[test]
fn missing_root_is_error() {
    let project = tempfile::tempdir().expect("project tempdir");
    let config = GeneratorConfig {
        root: project.path().join("missing"),
        ..GeneratorConfig::default()
    };

    let err = config.validate().expect_err("missing root");
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn missing_model_file_is_error() {
    let project = tempfile::tempdir().expect("project tempdir");
    let config = GeneratorConfig {
        root: project.path().to_path_buf(),
        model: Some(project.path().join("params.toml")),
        ..GeneratorConfig::default()
    };

    let err = config.validate().expect_err("missing model");
    assert!(err.to_string().contains("model file"));
}

#[test]
fn unknown_config_extension_is_error() {
    let project = tempfile::tempdir().expect("project tempdir");
    let config_path = project.path().join("modelgen.ini");
    fs::write(&config_path, "root = .").expect("write config");

    let args = CliArgs {
        config: Some(config_path),
        ..CliArgs::default()
    };
    let err = GeneratorConfig::from_args(args).expect_err("unsupported");
    assert!(err.to_string().contains("unsupported config extension"));
}
