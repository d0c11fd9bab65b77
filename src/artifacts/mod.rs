//! Artifact generators.
//!
//! Each generator turns the resolved model into one line list per named
//! region of its target file. Generators never touch storage; the pipeline
//! merges their output through [`crate::region`].

mod controller;
mod header;
mod param_ids;
mod processor;
mod ui_descriptor;

pub use controller::ControllerSource;
pub use header::ParameterHeader;
pub use param_ids::ParamIdTable;
pub use processor::ProcessorSource;
pub use ui_descriptor::UiDescriptor;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use crate::model::ResolvedParameter;
use crate::region::Region;

/// Target file kinds, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    ParamIds,
    Header,
    Processor,
    Controller,
    UiDescriptor,
}

impl ArtifactKind {
    /// File name below the source or resource directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::ParamIds => "paramids.h",
            ArtifactKind::Header => "vst.h",
            ArtifactKind::Processor => "vst.cpp",
            ArtifactKind::Controller => "ui/controller.cpp",
            ArtifactKind::UiDescriptor => "plugin.uidesc",
        }
    }

    /// `true` for files living in the resource directory.
    pub fn is_resource(&self) -> bool {
        matches!(self, ArtifactKind::UiDescriptor)
    }
}

/// Lines destined for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLines {
    pub region: Region,
    pub lines: Vec<String>,
}

pub trait ArtifactGenerator {
    fn kind(&self) -> ArtifactKind;

    /// Line lists for every region this artifact owns, in merge order.
    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines>;
}

/// All generators in their fixed run order.
pub fn all_generators() -> Vec<Box<dyn ArtifactGenerator>> {
    vec![
        Box::new(ParamIdTable),
        Box::new(ParameterHeader),
        Box::new(ProcessorSource),
        Box::new(ControllerSource),
        Box::new(UiDescriptor),
    ]
}

/// Split per-entry rows into per-region columns.
///
/// Row `n` always lands at position `n` of every column, so parallel regions
/// stay aligned no matter how a row is built.
pub(crate) fn fan_out<const N: usize>(
    regions: [Region; N],
    rows: impl IntoIterator<Item = [String; N]>,
) -> Vec<RegionLines> {
    let mut columns: [Vec<String>; N] = std::array::from_fn(|_| Vec::new());
    for row in rows {
        for (column, fragment) in columns.iter_mut().zip(row) {
            column.push(fragment);
        }
    }
    regions
        .into_iter()
        .zip(columns)
        .map(|(region, lines)| RegionLines { region, lines })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn generators_run_in_artifact_order() {
        let kinds: Vec<_> = all_generators().iter().map(|g| g.kind()).collect();
        let expected: Vec<_> = ArtifactKind::iter().collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn fan_out_keeps_rows_aligned() {
        let rows = vec![
            ["a0".to_string(), "b0".to_string()],
            ["a1".to_string(), "b1".to_string()],
        ];
        let out = fan_out([Region::comment("A"), Region::comment("B")], rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].region.name(), "A");
        assert_eq!(out[0].lines, vec!["a0", "a1"]);
        assert_eq!(out[1].lines, vec!["b0", "b1"]);
    }

    #[test]
    fn fan_out_of_no_rows_yields_empty_regions() {
        let out = fan_out([Region::markup("CONTROLS"), Region::markup("TAGS")], Vec::new());
        assert!(out.iter().all(|region| region.lines.is_empty()));
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ArtifactKind::UiDescriptor.to_string(), "ui_descriptor");
        assert_eq!(ArtifactKind::ParamIds.as_ref(), "param_ids");
    }
}
