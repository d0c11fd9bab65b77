use super::{ArtifactGenerator, ArtifactKind, RegionLines};
use crate::model::ResolvedParameter;
use crate::region::Region;

const FIELD_TYPE: &str = "float";

/// Model fields declared in `vst.h`.
pub struct ParameterHeader;

impl ArtifactGenerator for ParameterHeader {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Header
    }

    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines> {
        let lines = params
            .iter()
            .map(|param| {
                format!(
                    "        {FIELD_TYPE} {} = {};    // {}",
                    param.names.model,
                    param.default_literal,
                    param.description()
                )
            })
            .collect();
        vec![RegionLines {
            region: Region::default_block(),
            lines,
        }]
    }
}
