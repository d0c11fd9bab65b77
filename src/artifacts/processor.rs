//! Parameter dispatch and state (de)serialization in `vst.cpp`.

use super::{ArtifactGenerator, ArtifactKind, RegionLines, fan_out};
use crate::model::ResolvedParameter;
use crate::region::Region;

/// Processor source: seven regions, one row per parameter.
pub struct ProcessorSource;

/// Everything one parameter contributes to the processor source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorFragments {
    pub process: String,
    pub set_state_read: String,
    pub set_state_swap: String,
    pub set_state_apply: String,
    pub get_state_copy: String,
    pub get_state_swap: String,
    pub get_state_write: String,
}

impl ProcessorFragments {
    pub fn new(param: &ResolvedParameter<'_>) -> Self {
        let model = &param.names.model;
        let param_id = &param.names.param_id;
        let saved = &param.names.saved;
        let to_save = &param.names.to_save;

        Self {
            process: format!(
                r#"
                    case {param_id}:
                        if ( paramQueue->getPoint( numPoints - 1, sampleOffset, value ) == kResultTrue )
                            {model} = ( float ) value;
                        break;"#
            ),
            set_state_read: format!(
                r#"
    float {saved} = 0.f;
    if ( state->read( &{saved}, sizeof ( float )) != kResultOk )
        return kResultFalse;"#
            ),
            set_state_swap: format!("   SWAP_32( {saved} )"),
            set_state_apply: format!("    {model} = {saved};"),
            get_state_copy: format!("    float {to_save} = {model};"),
            get_state_swap: format!("   SWAP_32( {to_save} )"),
            get_state_write: format!("    state->write( &{to_save}, sizeof( float ));"),
        }
    }

    fn into_row(self) -> [String; 7] {
        [
            self.process,
            self.set_state_read,
            self.set_state_swap,
            self.set_state_apply,
            self.get_state_copy,
            self.get_state_swap,
            self.get_state_write,
        ]
    }
}

impl ArtifactGenerator for ProcessorSource {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Processor
    }

    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines> {
        fan_out(
            [
                Region::comment("PROCESS"),
                Region::comment("SETSTATE"),
                Region::comment("SETSTATE SWAP"),
                Region::comment("SETSTATE APPLY"),
                Region::comment("GETSTATE"),
                Region::comment("GETSTATE SWAP"),
                Region::comment("GETSTATE APPLY"),
            ],
            params
                .iter()
                .map(|param| ProcessorFragments::new(param).into_row()),
        )
    }
}
