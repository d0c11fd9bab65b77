//! Parameter registration, state restore and value formatting in
//! `ui/controller.cpp`.

use super::{ArtifactGenerator, ArtifactKind, RegionLines, fan_out};
use crate::model::{ControlKind, DisplayFormat, ResolvedParameter};
use crate::region::Region;

/// Controller source: registration, restore triad and display text.
pub struct ControllerSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerFragments {
    pub registration: String,
    pub set_state_read: String,
    pub set_state_swap: String,
    pub set_param: String,
    pub display: String,
}

impl ControllerFragments {
    pub fn new(param: &ResolvedParameter<'_>) -> Self {
        let param_id = &param.names.param_id;
        let saved = &param.names.saved;

        Self {
            registration: registration(param),
            set_state_read: format!(
                r#"
        float {saved} = 1.f;
        if ( state->read( &{saved}, sizeof( float )) != kResultOk )
            return kResultFalse;"#
            ),
            set_state_swap: format!("    SWAP_32( {saved} )"),
            set_param: format!("        setParamNormalized( {param_id}, {saved} );"),
            display: display_case(param),
        }
    }

    fn into_row(self) -> [String; 5] {
        [
            self.registration,
            self.set_state_read,
            self.set_state_swap,
            self.set_param,
            self.display,
        ]
    }
}

impl ArtifactGenerator for ControllerSource {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines> {
        fan_out(
            [
                Region::default_block(),
                Region::comment("SETSTATE"),
                Region::comment("SETSTATE SWAP"),
                Region::comment("SETSTATE SETPARAM"),
                Region::comment("GETPARAM"),
            ],
            params
                .iter()
                .map(|param| ControllerFragments::new(param).into_row()),
        )
    }
}

fn registration(param: &ResolvedParameter<'_>) -> String {
    let descr = param.description();
    let param_id = &param.names.param_id;
    let (min, max, def) = (param.min(), param.max(), param.default_literal);

    match param.control {
        ControlKind::Toggle => format!(
            r#"
    parameters.addParameter(
        USTRING( "{descr}" ), {min}, {max}, {def}, ParameterInfo::kCanAutomate, {param_id}, unitId
    );"#
        ),
        ControlKind::Range => {
            let object = &param.names.param;
            let unit = param.unit();
            format!(
                r#"
    RangeParameter* {object} = new RangeParameter(
        USTRING( "{descr}" ), {param_id}, USTRING( "{unit}" ),
        {min}, {max}, {def},
        0, ParameterInfo::kCanAutomate, unitId
    );
    parameters.addParameter( {object} );"#
            )
        }
    }
}

fn display_case(param: &ResolvedParameter<'_>) -> String {
    let body = match param.display {
        DisplayFormat::Custom { statement } => statement.to_string(),
        DisplayFormat::OnOff => {
            r#"sprintf( text, "%s", ( valueNormalized == 0 ) ? "Off" : "On" );"#.to_string()
        }
        DisplayFormat::Percent => {
            r#"sprintf( text, "%.2d %%", ( int ) ( valueNormalized * 100.f ));"#.to_string()
        }
        DisplayFormat::Denormalized { unit } => format!(
            r#"sprintf( text, "%.2f {unit}", normalizedParamToPlain( tag, valueNormalized ));"#
        ),
        DisplayFormat::Raw => r#"sprintf( text, "%.2f", ( float ) valueNormalized );"#.to_string(),
    };

    format!(
        r#"
        case {}:
            {body}
            Steinberg::UString( string, 128 ).fromAscii( text );
            return kResultTrue;"#,
        param.names.param_id
    )
}
