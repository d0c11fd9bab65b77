//! Parameter model types and loaders.
//!
//! A [`ParameterModel`] is the single authored description every artifact is
//! projected from. The position of an entry is its permanent numeric id, so
//! the sequence is append-only in practice.

pub mod resolve;
pub mod validate;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, GenerateResult};

pub use resolve::{ControlKind, DisplayFormat, ResolvedParameter};

const BUILTIN_MODEL: &str = include_str!("../../models/default.toml");

/// Ordered parameter list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterModel {
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// One authored parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Lower-camel identifier that seeds every derived name
    pub name: String,
    /// Label shown by the host and the editor
    pub description: String,
    /// Unit label, e.g. `%` or `Hz`
    #[serde(default)]
    pub unit_description: String,
    pub value: ValueSpec,
    /// Editor placement; entries without one get no control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiRect>,
    /// Display the host-denormalized value with the unit label
    #[serde(default)]
    pub normalized_description: bool,
    /// Raw formatting statement replacing the per-type display branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub min: Literal,
    pub max: Literal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, rename = "type")]
    pub kind: ValueKind,
}

impl ValueSpec {
    /// `default`, falling back to `min`.
    pub fn default_or_min(&self) -> &Literal {
        self.default.as_ref().unwrap_or(&self.min)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    #[serde(alias = "float")]
    Linear,
    #[serde(alias = "boolean")]
    Bool,
    #[serde(alias = "pct")]
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// A numeric literal token in the target language, kept verbatim.
///
/// Model files may spell literals as strings (`"0.5f"`) or as plain numbers;
/// numbers are rendered with their `Display` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawLiteral", into = "String")]
pub struct Literal(String);

impl Literal {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the token is a plain float, ignoring an `f` suffix.
    pub fn as_f64(&self) -> Option<f64> {
        let token = self.0.trim();
        let token = token
            .strip_suffix('f')
            .or_else(|| token.strip_suffix('F'))
            .unwrap_or(token);
        token.parse().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        literal.0
    }
}

impl From<&str> for Literal {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLiteral {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawLiteral> for Literal {
    fn from(raw: RawLiteral) -> Self {
        match raw {
            RawLiteral::Text(token) => Self(token),
            RawLiteral::Integer(value) => Self(value.to_string()),
            RawLiteral::Float(value) => Self(value.to_string()),
        }
    }
}

impl ParameterModel {
    pub fn new(parameters: Vec<ParameterSpec>) -> Self {
        Self { parameters }
    }

    /// The model bundled with the generator (`models/default.toml`).
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_MODEL).expect("bundled model is valid TOML")
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Load a model file, picking the format from its extension.
    pub fn load(path: &Path) -> GenerateResult<Self> {
        let ext = path
            .extension()
            .and_then(|os| os.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let contents = fs::read_to_string(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| GenerateError::ModelParse {
            path: path.to_path_buf(),
            message,
        };

        let model = match ext.as_str() {
            "toml" => Self::from_toml_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            "yaml" | "yml" => {
                Self::from_yaml_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            "json" => Self::from_json_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            _ => {
                return Err(GenerateError::UnsupportedModelFormat {
                    path: path.to_path_buf(),
                    extension: ext,
                });
            }
        };

        tracing::debug!(
            path = %path.display(),
            parameters = model.parameters.len(),
            "loaded parameter model"
        );
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Entries that carry an editor rectangle, in model order.
    pub fn with_ui(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|spec| spec.ui.is_some())
    }
}
