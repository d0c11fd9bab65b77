use super::{ArtifactGenerator, ArtifactKind, RegionLines};
use crate::model::ResolvedParameter;
use crate::region::Region;

/// Identifier enum in `paramids.h`.
pub struct ParamIdTable;

impl ArtifactGenerator for ParamIdTable {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ParamIds
    }

    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines> {
        let lines = params.iter().map(id_line).collect();
        vec![RegionLines {
            region: Region::default_block(),
            lines,
        }]
    }
}

fn id_line(param: &ResolvedParameter<'_>) -> String {
    format!(
        "    {} = {},    // {}",
        param.names.param_id,
        param.index,
        param.description()
    )
}
