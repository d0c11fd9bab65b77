//! Editor controls and control tags in `plugin.uidesc`.
//!
//! Only entries with a `ui` rectangle get a control. Tags number those
//! entries by their rank among the laid-out entries, independent of the
//! model-wide identifier.

use super::{ArtifactGenerator, ArtifactKind, RegionLines, fan_out};
use crate::model::{ControlKind, ResolvedParameter, UiRect};
use crate::region::Region;

const UNIT_SCOPE: &str = "Unit1";

pub struct UiDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiFragments {
    pub control: String,
    pub tag: String,
}

impl UiFragments {
    /// `tag` is the entry's position among entries that have a layout.
    pub fn new(param: &ResolvedParameter<'_>, rect: &UiRect, tag: usize) -> Self {
        let key = &param.names.param;
        Self {
            control: format!(
                "\n        <!-- {} -->\n        {}",
                param.description(),
                control_view(param, rect)
            ),
            tag: format!(r#"       <control-tag name="{UNIT_SCOPE}::{key}" tag="{tag}" />"#),
        }
    }

    fn into_row(self) -> [String; 2] {
        [self.control, self.tag]
    }
}

impl ArtifactGenerator for UiDescriptor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::UiDescriptor
    }

    fn render(&self, params: &[ResolvedParameter<'_>]) -> Vec<RegionLines> {
        let rows = params
            .iter()
            .filter_map(|param| param.ui().map(|rect| (param, rect)))
            .enumerate()
            .map(|(tag, (param, rect))| UiFragments::new(param, rect, tag).into_row());

        fan_out([Region::markup("CONTROLS"), Region::markup("TAGS")], rows)
    }
}

fn control_view(param: &ResolvedParameter<'_>, rect: &UiRect) -> String {
    let key = &param.names.param;
    let UiRect { x, y, w, h } = *rect;
    let (min, max, def) = (param.min(), param.max(), param.default_literal);

    match param.control {
        ControlKind::Toggle => {
            let title = param.description();
            format!(
                r#"<view control-tag="{UNIT_SCOPE}::{key}" class="CCheckBox" origin="{x}, {y}" size="{w}, {h}"
              max-value="{max}" min-value="{min}" default-value="{def}"
              background-offset="0, 0" boxfill-color="~ GreenCColor" autosize="bottom"
              boxframe-color="~ BlackCColor" checkmark-color="~ BlackCColor"
              draw-crossbox="true" font="~ NormalFontSmall" font-color="Light Grey"
              autosize-to-fit="false" frame-width="1"
              mouse-enabled="true" opacity="1" round-rect-radius="0"
              title="{title}" transparent="false" wants-focus="true" wheel-inc-value="0.1"
        />"#
            )
        }
        ControlKind::Range => format!(
            r#"<view control-tag="{UNIT_SCOPE}::{key}" class="CSlider" origin="{x}, {y}" size="{w}, {h}"
              max-value="{max}" min-value="{min}" default-value="{def}"
              background-offset="0, 0" bitmap="slider_background"
              bitmap-offset="0, 0" draw-back="false" draw-back-color="~ WhiteCColor" draw-frame="false"
              draw-frame-color="~ WhiteCColor" draw-value="false" draw-value-color="~ WhiteCColor" draw-value-from-center="false"
              draw-value-inverted="false" handle-bitmap="slider_handle" handle-offset="0, 0"
              mode="free click" mouse-enabled="true" opacity="1" orientation="horizontal" reverse-orientation="false"
              transparent="true" transparent-handle="true" wheel-inc-value="0.1" zoom-factor="10"
        />"#
        ),
    }
}
