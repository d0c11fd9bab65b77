use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactKind;

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_RESOURCE_DIR: &str = "resource";

/// What to do when a target file lacks a region's markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// Skip the region and log a warning
    #[default]
    Lenient,
    /// Abort the run
    Strict,
}

impl std::fmt::Display for MarkerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerPolicy::Lenient => write!(f, "lenient"),
            MarkerPolicy::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Plugin project root every other path is resolved against
    pub root: PathBuf,
    pub source_dir: PathBuf,
    pub resource_dir: PathBuf,
    /// Model file; the bundled model is used when absent
    pub model: Option<PathBuf>,
    pub marker_policy: MarkerPolicy,
    pub validate_model: bool,
    /// Compute everything, write nothing
    pub check: bool,
    pub backup: bool,
    pub report: Option<ReportFormat>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            model: None,
            marker_policy: MarkerPolicy::default(),
            validate_model: true,
            check: false,
            backup: false,
            report: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            root: cli_root,
            source_dir: cli_source_dir,
            resource_dir: cli_resource_dir,
            model: cli_model,
            markers: cli_markers,
            skip_validation: cli_skip_validation,
            check,
            backup: cli_backup,
            report,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            root: file_root,
            source_dir: file_source_dir,
            resource_dir: file_resource_dir,
            model: file_model,
            markers: file_markers,
            skip_validation: file_skip_validation,
            backup: file_backup,
        } = file_config;

        let root = cli_root.or(file_root).unwrap_or_else(|| PathBuf::from("."));

        let source_dir = cli_source_dir
            .or(file_source_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
        let resource_dir = cli_resource_dir
            .or(file_resource_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR));

        let model = cli_model.or(file_model).map(|path| {
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        });

        let marker_policy = cli_markers.or(file_markers).unwrap_or_default();
        let skip_validation = cli_skip_validation || file_skip_validation.unwrap_or(false);
        let backup = cli_backup || file_backup.unwrap_or(false);

        Ok(Self {
            root,
            source_dir,
            resource_dir,
            model,
            marker_policy,
            validate_model: !skip_validation,
            check,
            backup,
            report,
        })
    }

    /// Fail fast on paths that cannot work before any file is touched.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.root.exists(), "project root {:?} does not exist", self.root);
        anyhow::ensure!(self.root.is_dir(), "project root {:?} is not a directory", self.root);
        if let Some(model) = self.model.as_ref() {
            anyhow::ensure!(model.exists(), "model file {:?} does not exist", model);
            anyhow::ensure!(model.is_file(), "model file {:?} is not a file", model);
        }
        Ok(())
    }

    pub fn resolve_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.root.join(relative)
        }
    }

    /// Location of an artifact's target file.
    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        let dir = if kind.is_resource() {
            &self.resource_dir
        } else {
            &self.source_dir
        };
        self.resolve_path(dir).join(kind.file_name())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "plugin-modelgen",
    about = "Regenerate plugin parameter boilerplate from the parameter model",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML, JSON or TOML)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_MODELGEN_ROOT",
        value_name = "DIR",
        help = "Plugin project root containing the source and resource directories"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_MODELGEN_SOURCE_DIR",
        value_name = "DIR",
        help = "Source directory relative to the root (default: src)"
    )]
    pub source_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_MODELGEN_RESOURCE_DIR",
        value_name = "DIR",
        help = "Resource directory relative to the root (default: resource)"
    )]
    pub resource_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_MODELGEN_MODEL",
        value_name = "FILE",
        help = "Parameter model file (TOML, YAML or JSON); defaults to the bundled model"
    )]
    pub model: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_MODELGEN_MARKERS",
        value_enum,
        value_name = "POLICY",
        help = "How to treat missing region markers (lenient or strict)"
    )]
    pub markers: Option<MarkerPolicy>,

    #[arg(long, help = "Generate even when model validation reports errors")]
    pub skip_validation: bool,

    #[arg(long, help = "Report files that would change without writing them")]
    pub check: bool,

    #[arg(long, help = "Keep a .bak copy of every file before rewriting it")]
    pub backup: bool,

    #[arg(long, value_enum, value_name = "FORMAT", help = "Print a generation report to stdout")]
    pub report: Option<ReportFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    root: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    resource_dir: Option<PathBuf>,
    model: Option<PathBuf>,
    markers: Option<MarkerPolicy>,
    skip_validation: Option<bool>,
    backup: Option<bool>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        "toml" => toml::from_str(&contents)
            .with_context(|| format!("failed to parse TOML config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
