//! Per-entry decision table.
//!
//! Optional fields and the value type are interpreted once here; generators
//! only match on the resolved enums.

use super::{Literal, ParameterModel, ParameterSpec, UiRect, ValueKind};
use crate::naming::DerivedNames;

/// How the controller registers the parameter and the editor draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// On/off parameter, checkbox control
    Toggle,
    /// Ranged parameter, slider control
    Range,
}

/// Value-to-text branch of the controller, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat<'a> {
    Custom { statement: &'a str },
    OnOff,
    Percent,
    Denormalized { unit: &'a str },
    Raw,
}

impl<'a> DisplayFormat<'a> {
    pub fn for_spec(spec: &'a ParameterSpec) -> Self {
        if let Some(statement) = spec.custom_description.as_deref() {
            return DisplayFormat::Custom { statement };
        }
        match spec.value.kind {
            ValueKind::Bool => DisplayFormat::OnOff,
            ValueKind::Percent => DisplayFormat::Percent,
            ValueKind::Linear if spec.normalized_description => DisplayFormat::Denormalized {
                unit: &spec.unit_description,
            },
            ValueKind::Linear => DisplayFormat::Raw,
        }
    }
}

/// A parameter with everything the generators need already decided.
#[derive(Debug, Clone)]
pub struct ResolvedParameter<'a> {
    /// Position in the model, the permanent numeric id
    pub index: usize,
    pub spec: &'a ParameterSpec,
    pub names: DerivedNames,
    pub default_literal: &'a Literal,
    pub control: ControlKind,
    pub display: DisplayFormat<'a>,
}

impl<'a> ResolvedParameter<'a> {
    pub fn new(index: usize, spec: &'a ParameterSpec) -> Self {
        let control = match spec.value.kind {
            ValueKind::Bool => ControlKind::Toggle,
            ValueKind::Linear | ValueKind::Percent => ControlKind::Range,
        };
        Self {
            index,
            spec,
            names: DerivedNames::derive(&spec.name),
            default_literal: spec.value.default_or_min(),
            control,
            display: DisplayFormat::for_spec(spec),
        }
    }

    pub fn description(&self) -> &'a str {
        &self.spec.description
    }

    pub fn unit(&self) -> &'a str {
        &self.spec.unit_description
    }

    pub fn min(&self) -> &'a Literal {
        &self.spec.value.min
    }

    pub fn max(&self) -> &'a Literal {
        &self.spec.value.max
    }

    pub fn ui(&self) -> Option<&'a UiRect> {
        self.spec.ui.as_ref()
    }
}

impl ParameterModel {
    /// Resolve every entry, keeping model order.
    pub fn resolve(&self) -> Vec<ResolvedParameter<'_>> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(index, spec)| ResolvedParameter::new(index, spec))
            .collect()
    }
}
