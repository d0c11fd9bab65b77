//! Orchestrates one generation run.
//!
//! Artifacts are processed one at a time in [`ArtifactKind`] order. Each one
//! is a single read, an in-memory merge of all its regions, and at most one
//! write. The first failure aborts the run. Artifacts already written stay
//! written and later ones are never touched.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::artifacts::{ArtifactGenerator, ArtifactKind, all_generators};
use crate::config::{GeneratorConfig, MarkerPolicy};
use crate::error::{GenerateError, GenerateResult};
use crate::model::validate::{Severity, validate};
use crate::model::{ParameterModel, ResolvedParameter};
use crate::store::ArtifactStore;

/// Outcome for one target file.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub regions_replaced: Vec<String>,
    pub regions_missing: Vec<String>,
    /// Merged content differs from what was on disk
    pub changed: bool,
    /// SHA-256 of the merged content
    pub digest: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub parameters: usize,
    pub check_only: bool,
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    pub fn changed(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|artifact| artifact.changed)
    }

    pub fn is_up_to_date(&self) -> bool {
        self.changed().next().is_none()
    }

    pub fn missing_region_count(&self) -> usize {
        self.artifacts
            .iter()
            .map(|artifact| artifact.regions_missing.len())
            .sum()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.check_only { "would change" } else { "changed" };
        writeln!(f, "{} parameter(s)", self.parameters)?;
        for artifact in &self.artifacts {
            let state = if artifact.changed { verb } else { "unchanged" };
            write!(
                f,
                "{}: {} ({} region(s) replaced",
                artifact.path.display(),
                state,
                artifact.regions_replaced.len()
            )?;
            if !artifact.regions_missing.is_empty() {
                write!(f, ", missing: {}", artifact.regions_missing.join(", "))?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

pub struct Pipeline<'c, S> {
    config: &'c GeneratorConfig,
    store: S,
    generators: Vec<Box<dyn ArtifactGenerator>>,
}

impl<'c, S: ArtifactStore> Pipeline<'c, S> {
    pub fn new(config: &'c GeneratorConfig, store: S) -> Self {
        Self {
            config,
            store,
            generators: all_generators(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&self, model: &ParameterModel) -> GenerateResult<GenerationReport> {
        if self.config.validate_model {
            check_model(model)?;
        }

        let params = model.resolve();
        let mut artifacts = Vec::with_capacity(self.generators.len());
        for generator in &self.generators {
            artifacts.push(self.generate(generator.as_ref(), &params)?);
        }

        Ok(GenerationReport {
            parameters: params.len(),
            check_only: self.config.check,
            artifacts,
        })
    }

    fn generate(
        &self,
        generator: &dyn ArtifactGenerator,
        params: &[ResolvedParameter<'_>],
    ) -> GenerateResult<ArtifactReport> {
        let kind = generator.kind();
        let path = self.config.artifact_path(kind);
        let span = tracing::info_span!("artifact", artifact = %kind, path = %path.display());
        let _enter = span.enter();

        let original = self.store.read(&path)?;
        let mut content = original.clone();
        let mut regions_replaced = Vec::new();
        let mut regions_missing = Vec::new();

        for region_lines in generator.render(params) {
            let region = &region_lines.region;
            match region.try_apply(&content, &region_lines.lines) {
                Some(merged) => {
                    tracing::debug!(region = region.name(), lines = region_lines.lines.len(), "region replaced");
                    content = merged;
                    regions_replaced.push(region.name().to_string());
                }
                None if self.config.marker_policy == MarkerPolicy::Strict => {
                    return Err(GenerateError::MissingRegion {
                        path,
                        region: region.name().to_string(),
                    });
                }
                None => {
                    tracing::warn!(
                        region = region.name(),
                        start = region.start(),
                        "region markers not found, skipping"
                    );
                    regions_missing.push(region.name().to_string());
                }
            }
        }

        let changed = content != original;
        if changed && !self.config.check {
            self.store.write(&path, &content)?;
            tracing::info!("artifact updated");
        } else if changed {
            tracing::info!("artifact is stale");
        } else {
            tracing::debug!("artifact already up to date");
        }

        Ok(ArtifactReport {
            kind,
            path,
            regions_replaced,
            regions_missing,
            changed,
            digest: sha256_hex(&content),
        })
    }
}

/// Log model warnings and reject the model on errors.
fn check_model(model: &ParameterModel) -> GenerateResult<()> {
    let (errors, warnings): (Vec<_>, Vec<_>) = validate(model)
        .into_iter()
        .partition(|issue| issue.severity == Severity::Error);

    for issue in &warnings {
        tracing::warn!(location = %issue.location, "{}", issue.message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(GenerateError::InvalidModel { issues: errors })
    }
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    use crate::artifacts::test_support::spec;
    use crate::model::ValueKind;

    /// In-memory store recording every write.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        writes: RefCell<Vec<PathBuf>>,
    }

    impl MemoryStore {
        fn with_all_targets(config: &GeneratorConfig, body: &str) -> Self {
            let store = Self::default();
            for generator in all_generators() {
                store
                    .files
                    .borrow_mut()
                    .insert(config.artifact_path(generator.kind()), body.to_string());
            }
            store
        }
    }

    impl ArtifactStore for MemoryStore {
        fn read(&self, path: &Path) -> GenerateResult<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| GenerateError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not seeded"),
                })
        }

        fn write(&self, path: &Path, content: &str) -> GenerateResult<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            self.writes.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    const ONLY_DEFAULT_BLOCK: &str = "head\n// --- AUTO-GENERATED START\n// --- AUTO-GENERATED END\ntail\n";

    fn model() -> ParameterModel {
        ParameterModel::new(vec![spec("gain", ValueKind::Linear)])
    }

    #[test]
    fn lenient_policy_records_missing_regions() {
        let config = GeneratorConfig::default();
        let pipeline = Pipeline::new(&config, MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK));

        let report = pipeline.run(&model()).expect("run");

        let processor = &report.artifacts[2];
        assert_eq!(processor.kind, ArtifactKind::Processor);
        assert!(processor.regions_replaced.is_empty());
        assert_eq!(processor.regions_missing.len(), 7);
        assert!(!processor.changed);

        let controller = &report.artifacts[3];
        assert_eq!(controller.regions_replaced, vec!["DEFAULT"]);
        assert!(controller.changed);
        assert_eq!(report.missing_region_count(), 7 + 4 + 2);
    }

    #[test]
    fn strict_policy_fails_on_first_missing_region() {
        let config = GeneratorConfig {
            marker_policy: MarkerPolicy::Strict,
            ..GeneratorConfig::default()
        };
        let pipeline = Pipeline::new(&config, MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK));

        let err = pipeline.run(&model()).expect_err("strict");
        match err {
            GenerateError::MissingRegion { path, region } => {
                assert_eq!(path, config.artifact_path(ArtifactKind::Processor));
                assert_eq!(region, "PROCESS");
            }
            other => panic!("unexpected error: {other}"),
        }
        // id table and header were written before the processor failed
        assert_eq!(pipeline.store().writes.borrow().len(), 2);
    }

    #[test]
    fn check_mode_never_writes() {
        let config = GeneratorConfig {
            check: true,
            ..GeneratorConfig::default()
        };
        let pipeline = Pipeline::new(&config, MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK));

        let report = pipeline.run(&model()).expect("run");
        assert!(!report.is_up_to_date());
        assert!(report.check_only);
        assert!(pipeline.store().writes.borrow().is_empty());
    }

    #[test]
    fn invalid_model_is_rejected_before_any_read() {
        let config = GeneratorConfig::default();
        let pipeline = Pipeline::new(&config, MemoryStore::default());
        let model = ParameterModel::new(vec![spec("gain", ValueKind::Linear), spec("gain", ValueKind::Bool)]);

        let err = pipeline.run(&model).expect_err("duplicate");
        assert!(matches!(err, GenerateError::InvalidModel { ref issues } if issues.len() == 1));
    }

    #[test]
    fn skipping_validation_generates_duplicates_verbatim() {
        let config = GeneratorConfig {
            validate_model: false,
            ..GeneratorConfig::default()
        };
        let pipeline = Pipeline::new(&config, MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK));
        let model = ParameterModel::new(vec![spec("gain", ValueKind::Linear), spec("gain", ValueKind::Linear)]);

        pipeline.run(&model).expect("run");
        let ids = pipeline
            .store()
            .read(&config.artifact_path(ArtifactKind::ParamIds))
            .expect("ids");
        assert!(ids.contains("kGainId = 0,"));
        assert!(ids.contains("kGainId = 1,"));
    }

    #[test]
    fn unreadable_file_aborts_remaining_artifacts() {
        let config = GeneratorConfig::default();
        let store = MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK);
        store
            .files
            .borrow_mut()
            .remove(&config.artifact_path(ArtifactKind::Header));
        let pipeline = Pipeline::new(&config, store);

        let err = pipeline.run(&model()).expect_err("missing header");
        assert!(matches!(err, GenerateError::Read { .. }));
        assert_eq!(
            *pipeline.store().writes.borrow(),
            vec![config.artifact_path(ArtifactKind::ParamIds)]
        );
    }

    #[test]
    fn report_text_lists_every_artifact() {
        let config = GeneratorConfig::default();
        let pipeline = Pipeline::new(&config, MemoryStore::with_all_targets(&config, ONLY_DEFAULT_BLOCK));
        let text = pipeline.run(&model()).expect("run").to_string();

        assert!(text.starts_with("1 parameter(s)\n"));
        assert!(text.contains("paramids.h: changed (1 region(s) replaced)"));
        assert!(text.contains("plugin.uidesc: unchanged (0 region(s) replaced, missing: CONTROLS, TAGS)"));
    }

    #[test]
    fn digest_is_stable_hex() {
        assert_eq!(sha256_hex("abc"), sha256_hex("abc"));
        assert_eq!(sha256_hex("abc").len(), 64);
    }
}
