//! Model checks run before any file is touched.
//!
//! Errors describe models that would generate colliding or malformed
//! identifiers. Warnings flag entries that still generate but are likely
//! authoring mistakes.

use std::collections::HashMap;
use std::fmt;

use super::{ParameterModel, ParameterSpec, ValueKind};
use crate::naming::to_pascal_case;

/// A single problem found in the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIssue {
    /// Location such as `parameters[3].value.default`
    pub location: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks generation
    Error,
    /// Logged, generation proceeds
    Warning,
}

impl fmt::Display for ModelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", tag, self.location, self.message)
    }
}

/// Validate `model` and return every issue found, in model order.
pub fn validate(model: &ParameterModel) -> Vec<ModelIssue> {
    let mut issues = Vec::new();
    let mut seen_names: HashMap<&str, usize> = HashMap::new();
    let mut seen_pascal: HashMap<String, usize> = HashMap::new();

    for (idx, spec) in model.parameters.iter().enumerate() {
        let loc = format!("parameters[{idx}]");

        if spec.name.is_empty() {
            issues.push(error(format!("{loc}.name"), "name must not be empty".to_string()));
            continue;
        }

        if !is_identifier(&spec.name) {
            issues.push(error(
                format!("{loc}.name"),
                format!("name '{}' is not a valid identifier", spec.name),
            ));
        }

        if let Some(first) = seen_names.get(spec.name.as_str()) {
            issues.push(error(
                format!("{loc}.name"),
                format!("duplicate name '{}' (first used by parameters[{first}])", spec.name),
            ));
        } else {
            seen_names.insert(&spec.name, idx);

            let pascal = to_pascal_case(&spec.name);
            if let Some(first) = seen_pascal.get(&pascal) {
                issues.push(error(
                    format!("{loc}.name"),
                    format!(
                        "name '{}' derives the same identifiers as parameters[{first}]",
                        spec.name
                    ),
                ));
            } else {
                seen_pascal.insert(pascal, idx);
            }
        }

        check_range(spec, &loc, &mut issues);
        check_presentation(spec, &loc, &mut issues);
    }

    issues
}

/// `true` when `validate` reports no errors.
pub fn is_valid(model: &ParameterModel) -> bool {
    !validate(model)
        .iter()
        .any(|issue| issue.severity == Severity::Error)
}

fn check_range(spec: &ParameterSpec, loc: &str, issues: &mut Vec<ModelIssue>) {
    let value = &spec.value;
    let (Some(min), Some(max)) = (value.min.as_f64(), value.max.as_f64()) else {
        return;
    };

    if min > max {
        issues.push(warning(
            format!("{loc}.value"),
            format!("min {} is greater than max {}", value.min, value.max),
        ));
        return;
    }

    let Some(default) = value.default.as_ref() else {
        return;
    };
    if default.as_f64().is_some_and(|parsed| !(min..=max).contains(&parsed)) {
        issues.push(warning(
            format!("{loc}.value.default"),
            format!(
                "default {} lies outside [{}, {}]",
                default, value.min, value.max
            ),
        ));
    }
}

fn check_presentation(spec: &ParameterSpec, loc: &str, issues: &mut Vec<ModelIssue>) {
    if spec.description.contains('"') {
        issues.push(warning(
            format!("{loc}.description"),
            "description contains '\"' and will break the generated string literals".to_string(),
        ));
    }

    if let Some(ui) = spec.ui.as_ref().filter(|ui| ui.w == 0 || ui.h == 0) {
        issues.push(warning(
            format!("{loc}.ui"),
            format!("control size {}x{} is empty", ui.w, ui.h),
        ));
    }

    if spec.normalized_description
        && spec.custom_description.is_none()
        && spec.value.kind != ValueKind::Linear
    {
        issues.push(warning(
            format!("{loc}.normalized_description"),
            "ignored for bool and percent parameters".to_string(),
        ));
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn error(location: String, message: String) -> ModelIssue {
    ModelIssue {
        location,
        message,
        severity: Severity::Error,
    }
}

fn warning(location: String, message: String) -> ModelIssue {
    ModelIssue {
        location,
        message,
        severity: Severity::Warning,
    }
}
