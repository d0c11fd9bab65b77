//! Regenerates the parameter boilerplate of a VST3 plugin.
//!
//! One [`ParameterModel`] is projected into five hand-maintained files: the
//! identifier table, the processor header, the processor and controller
//! sources and the editor description. Only the interior of marker-delimited
//! regions is rewritten; everything else in those files is left alone.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod region;
pub mod store;

pub use artifacts::{ArtifactGenerator, ArtifactKind, RegionLines};
pub use config::{CliArgs, GeneratorConfig, MarkerPolicy, ReportFormat};
pub use error::{GenerateError, GenerateResult};
pub use logging::{LoggingConfig, init_logging};
pub use model::{Literal, ParameterModel, ParameterSpec, UiRect, ValueKind, ValueSpec};
pub use naming::DerivedNames;
pub use pipeline::{ArtifactReport, GenerationReport, Pipeline};
pub use region::Region;
pub use store::{ArtifactStore, FsStore};

/// Load the configured model and run every generator against the
/// filesystem.
pub fn generate(config: &GeneratorConfig) -> GenerateResult<GenerationReport> {
    let model = match config.model.as_deref() {
        Some(path) => ParameterModel::load(path)?,
        None => ParameterModel::builtin(),
    };

    tracing::info!(
        root = %config.root.display(),
        parameters = model.len(),
        markers = %config.marker_policy,
        check = config.check,
        "generating plugin model"
    );

    let store = FsStore::new().with_backups(config.backup);
    Pipeline::new(config, store).run(&model)
}
